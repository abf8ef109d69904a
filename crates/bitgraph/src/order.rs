use std::cmp::Reverse;

use crate::graph::Graph;

/// Initial vertex ordering for a solver.
///
/// Every variant is a pure function of the graph: given the identity
/// permutation it returns the permutation the solver will index its
/// bit-encoded graph by. Ties always break towards the smaller vertex id, so
/// orderings are deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexOrdering {
    /// Input order as-is.
    None,
    /// Input order reversed.
    Reverse,
    /// Non-increasing degree.
    Degree,
    /// Non-increasing ex-degree (degree plus sum of neighbour degrees).
    ExDegree,
    /// Repeatedly takes the remaining vertex of largest ex-degree, with
    /// ex-degrees recomputed on the shrinking graph.
    DynExDegree,
    /// Matula–Beck min-width: peel minimum-degree vertices, filling the
    /// order from the back.
    MinWidth,
}

impl VertexOrdering {
    pub const NAMES: &'static [(&'static str, VertexOrdering)] = &[
        ("none", VertexOrdering::None),
        ("rev", VertexOrdering::Reverse),
        ("deg", VertexOrdering::Degree),
        ("exdeg", VertexOrdering::ExDegree),
        ("dynexdeg", VertexOrdering::DynExDegree),
        ("mw", VertexOrdering::MinWidth),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, o)| o)
    }

    pub fn apply(self, graph: &Graph, order: &mut Vec<usize>) {
        match self {
            VertexOrdering::None => {}
            VertexOrdering::Reverse => order.reverse(),
            VertexOrdering::Degree => degree_sort(graph, order),
            VertexOrdering::ExDegree => exdegree_sort(graph, order),
            VertexOrdering::DynExDegree => dynexdegree_sort(graph, order),
            VertexOrdering::MinWidth => min_width_sort(graph, order),
        }
    }
}

/// Sorts by non-increasing degree, stable on ties.
pub fn degree_sort(graph: &Graph, order: &mut [usize]) {
    order.sort_by_key(|&v| Reverse(graph.degree(v)));
}

/// Sorts by non-increasing ex-degree, stable on ties.
pub fn exdegree_sort(graph: &Graph, order: &mut [usize]) {
    order.sort_by_key(|&v| Reverse(graph.exdegree(v)));
}

/// Greedily takes the remaining vertex with the largest ex-degree, where both
/// degrees and neighbour sums only count vertices not yet taken.
pub fn dynexdegree_sort(graph: &Graph, order: &mut Vec<usize>) {
    let n = graph.size();
    let mut remaining: Vec<usize> = order.clone();
    let mut degrees: Vec<u64> = (0..n).map(|v| graph.degree(v) as u64).collect();
    let mut taken = vec![false; n];
    order.clear();

    while !remaining.is_empty() {
        let (pos, &best) = remaining
            .iter()
            .enumerate()
            .max_by_key(|&(_, &v)| {
                let exdeg: u64 = degrees[v]
                    + graph
                        .neighbours(v)
                        .filter(|&u| !taken[u])
                        .map(|u| degrees[u])
                        .sum::<u64>();
                (exdeg, Reverse(v))
            })
            .unwrap();
        remaining.swap_remove(pos);
        taken[best] = true;
        for u in graph.neighbours(best) {
            degrees[u] = degrees[u].saturating_sub(1);
        }
        order.push(best);
    }
}

/// Matula–Beck peeling: the minimum-degree vertex of the remaining graph is
/// removed and placed at the back, so early positions have small width.
pub fn min_width_sort(graph: &Graph, order: &mut Vec<usize>) {
    let n = graph.size();
    let mut degrees: Vec<u32> = (0..n).map(|v| graph.degree(v)).collect();
    let mut removed = vec![false; n];
    let candidates: Vec<usize> = order.clone();
    order.clear();
    order.resize(candidates.len(), 0);

    for slot in (0..candidates.len()).rev() {
        let &v = candidates
            .iter()
            .filter(|&&v| !removed[v])
            .min_by_key(|&&v| (degrees[v], v))
            .unwrap();
        removed[v] = true;
        for u in graph.neighbours(v) {
            degrees[u] = degrees[u].saturating_sub(1);
        }
        order[slot] = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_plus_edge() -> Graph {
        // 0 is the hub of a star over {1,2,3}; 4-5 is a pendant edge
        Graph::from_edges(6, &[(0, 1), (0, 2), (0, 3), (4, 5)])
    }

    #[test]
    fn degree_sort_puts_hub_first() {
        let graph = star_plus_edge();
        let mut order: Vec<usize> = (0..6).collect();
        degree_sort(&graph, &mut order);
        assert_eq!(order[0], 0);
        // ties keep ascending id
        assert_eq!(&order[1..], &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn orderings_are_permutations() {
        let graph = star_plus_edge();
        for &(_, ordering) in VertexOrdering::NAMES {
            let mut order: Vec<usize> = (0..6).collect();
            ordering.apply(&graph, &mut order);
            let mut sorted = order.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..6).collect::<Vec<_>>(), "{ordering:?}");
        }
    }

    #[test]
    fn min_width_peels_leaves_first() {
        // path 0-1-2-3: ends are peeled first, so they land at the back
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut order: Vec<usize> = (0..4).collect();
        min_width_sort(&graph, &mut order);
        assert_eq!(order[3], 0);
    }

    #[test]
    fn name_registry_round_trips() {
        assert_eq!(VertexOrdering::from_name("deg"), Some(VertexOrdering::Degree));
        assert_eq!(VertexOrdering::from_name("nope"), None);
    }
}
