use bitgraph::prelude::*;
use rayon::prelude::*;

/// Per-node inference applied when a branching vertex is rejected.
///
/// Vertex `i` is dominated by `j` when `N(i) ∖ N(j) ∖ {j}` is empty: any
/// clique through `i` stays a clique when `i` is swapped for `j`, so once `j`
/// has been rejected, `i` can be rejected too.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CcoInference {
    /// No action.
    None,
    /// Precompute the domination relation; on rejecting `v`, drop everything
    /// `v` dominates from the candidate set.
    GlobalDomination,
    /// As `GlobalDomination`, and additionally skip branching on a vertex
    /// that inference has already removed from the candidate set.
    GlobalDominationSkip,
    /// Domination rows are computed on first use and memoised.
    LazyGlobalDomination,
}

#[derive(Clone)]
pub(crate) struct InferenceState<const W: usize> {
    kind: CcoInference,
    unsets: Vec<FixedBitSet<W>>,
    lazy: Vec<Option<FixedBitSet<W>>>,
}

impl<const W: usize> InferenceState<W> {
    pub(crate) fn new(kind: CcoInference, graph: &FixedBitGraph<W>) -> Self {
        let n = graph.size();
        let unsets = match kind {
            CcoInference::GlobalDomination | CcoInference::GlobalDominationSkip => (0..n)
                .into_par_iter()
                .map(|j| dominated_by(graph, j))
                .collect(),
            _ => Vec::new(),
        };
        let lazy = match kind {
            CcoInference::LazyGlobalDomination => vec![None; n],
            _ => Vec::new(),
        };
        Self { kind, unsets, lazy }
    }

    /// Called after the not-take step on `v`.
    pub(crate) fn propagate_no(
        &mut self,
        graph: &FixedBitGraph<W>,
        v: usize,
        p: &mut FixedBitSet<W>,
    ) {
        match self.kind {
            CcoInference::None => {}
            CcoInference::GlobalDomination | CcoInference::GlobalDominationSkip => {
                p.intersect_with_complement(&self.unsets[v]);
            }
            CcoInference::LazyGlobalDomination => {
                let row = self.lazy[v].get_or_insert_with(|| dominated_by(graph, v));
                p.intersect_with_complement(row);
            }
        }
    }

    /// Whether branching on `v` should be skipped outright.
    pub(crate) fn skip(&self, v: usize, p: &FixedBitSet<W>) -> bool {
        match self.kind {
            CcoInference::GlobalDominationSkip => !p.test(v),
            _ => false,
        }
    }
}

/// The set of vertices dominated by `j`.
fn dominated_by<const W: usize>(graph: &FixedBitGraph<W>, j: usize) -> FixedBitSet<W> {
    let n = graph.size();
    let mut row = FixedBitSet::new(n);
    for i in 0..n {
        if i == j {
            continue;
        }
        let mut ni = *graph.neighbourhood(i);
        ni.intersect_with_complement(graph.neighbourhood(j));
        ni.unset(j);
        if ni.is_empty() {
            row.set(i);
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(graph: &Graph) -> FixedBitGraph<1> {
        let order: Vec<usize> = (0..graph.size()).collect();
        FixedBitGraph::from_graph_with_order(graph, &order)
    }

    #[test]
    fn twins_dominate_each_other() {
        // 0 and 1 are non-adjacent twins hanging off the edge 2-3
        let graph = Graph::from_edges(4, &[(0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let bits = encode(&graph);
        let row = dominated_by(&bits, 1);
        assert!(row.test(0));
        let row = dominated_by(&bits, 0);
        assert!(row.test(1));
    }

    #[test]
    fn high_degree_vertex_dominates_pendant() {
        // 2 sees everything 1 sees (and more), so rejecting 2 rejects 1
        let graph = Graph::from_edges(4, &[(0, 1), (0, 2), (1, 2), (2, 3)]);
        let bits = encode(&graph);
        assert!(dominated_by(&bits, 2).test(1));
        assert!(!dominated_by(&bits, 1).test(2));
    }

    #[test]
    fn lazy_matches_eager() {
        let graph = gnp(24, 0.5, 7);
        let bits = encode(&graph);
        let eager = InferenceState::<1>::new(CcoInference::GlobalDomination, &bits);
        let mut lazy = InferenceState::<1>::new(CcoInference::LazyGlobalDomination, &bits);
        for v in 0..24 {
            let mut p_eager = FixedBitSet::<1>::new(24);
            p_eager.set_all();
            let mut p_lazy = p_eager;
            let mut eager = eager.clone();
            eager.propagate_no(&bits, v, &mut p_eager);
            lazy.propagate_no(&bits, v, &mut p_lazy);
            assert_eq!(p_eager, p_lazy);
        }
    }
}
