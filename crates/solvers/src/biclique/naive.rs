use std::sync::atomic::Ordering;

use bitgraph::prelude::*;

use super::{BicliqueSymmetryRemoval, MaxBicliqueParams, MaxBicliqueResult};

/// Branch and bound for maximum balanced biclique with the plain additive
/// bound instead of a clique cover. The expansion alternates sides on every
/// recursion, exactly like the cover-based solvers.
pub fn naive_max_biclique(
    graph: &Graph,
    params: &MaxBicliqueParams,
) -> Result<MaxBicliqueResult, Error> {
    struct Run<'a> {
        graph: &'a Graph,
        params: &'a MaxBicliqueParams,
    }

    impl SizedRun for Run<'_> {
        type Output = MaxBicliqueResult;

        fn run<const W: usize>(self) -> MaxBicliqueResult {
            Naive::<W>::new(self.graph, self.params).run()
        }
    }

    dispatch_graph_size(graph.size(), Run { graph, params })
}

struct Naive<'a, const W: usize> {
    graph: FixedBitGraph<W>,
    params: &'a MaxBicliqueParams,
    order: Vec<usize>,
    result: MaxBicliqueResult,
}

impl<'a, const W: usize> Naive<'a, W> {
    fn new(graph: &'a Graph, params: &'a MaxBicliqueParams) -> Self {
        let mut order: Vec<usize> = (0..graph.size()).collect();
        params.ordering.apply(graph, &mut order);
        Self {
            graph: FixedBitGraph::from_graph_with_order(graph, &order),
            params,
            order,
            result: MaxBicliqueResult::default(),
        }
    }

    fn run(mut self) -> MaxBicliqueResult {
        self.result.size = self.params.initial_bound;
        let n = self.graph.size();
        if n == 0 {
            return self.result;
        }

        let mut ca = FixedBitSet::new(n);
        let mut cb = FixedBitSet::new(n);
        let mut pa = FixedBitSet::new(n);
        pa.set_all();
        let mut pb = pa;

        self.expand(&mut ca, &mut cb, &mut pa, &mut pb);
        self.result.aborted = self.params.abort.load(Ordering::SeqCst);
        self.result
    }

    fn record(&mut self, ca: &FixedBitSet<W>, cb: &FixedBitSet<W>) {
        self.result.size = ca.popcount();
        self.result.members_a = ca.iter().map(|v| self.order[v]).collect();
        self.result.members_b = cb.iter().map(|v| self.order[v]).collect();
        if let Some(callback) = &self.params.on_incumbent {
            callback(self.result.size);
        }
    }

    fn expand(
        &mut self,
        ca: &mut FixedBitSet<W>,
        cb: &mut FixedBitSet<W>,
        pa: &mut FixedBitSet<W>,
        pb: &mut FixedBitSet<W>,
    ) {
        self.result.nodes += 1;

        while let Some(v) = pa.first_set_bit() {
            if self.result.size >= self.params.stop_after_finding
                || self.params.abort.load(Ordering::Relaxed)
            {
                return;
            }

            // candidates shared by both sides can only serve one of them
            let mut common = *pa;
            common.intersect_with(pb);
            let bound =
                ca.popcount() + pa.popcount() + cb.popcount() + pb.popcount() - common.popcount();
            if bound <= 2 * self.result.size {
                return;
            }

            // consider taking v into side A
            ca.set(v);
            pa.unset(v);

            let mut new_pa = *pa;
            let mut new_pb = *pb;
            self.graph.intersect_with_row_complement(v, &mut new_pa);
            self.graph.intersect_with_row(v, &mut new_pb);

            if ca.popcount() == cb.popcount() && ca.popcount() > self.result.size {
                self.record(ca, cb);
            }

            if !new_pb.is_empty() {
                // swap sides
                self.expand(cb, ca, &mut new_pb, &mut new_pa);
            }

            // now consider not taking v
            ca.unset(v);

            if matches!(self.params.symmetry, BicliqueSymmetryRemoval::Remove) && cb.is_empty() {
                pb.unset(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_has_balanced_biclique_one() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let result = naive_max_biclique(&graph, &MaxBicliqueParams::default()).unwrap();
        assert_eq!(result.size, 1);
    }

    #[test]
    fn four_cycle_is_its_own_biclique() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let result = naive_max_biclique(&graph, &MaxBicliqueParams::default()).unwrap();
        assert_eq!(result.size, 2);
        let a: Vec<usize> = result.members_a.iter().copied().collect();
        let b: Vec<usize> = result.members_b.iter().copied().collect();
        assert!(is_biclique(&graph, &a, &b));
    }

    #[test]
    fn complete_graph_has_independent_sides_of_one() {
        let mut graph = Graph::new(5);
        for u in 0..5 {
            for v in (u + 1)..5 {
                graph.add_edge(u, v);
            }
        }
        let result = naive_max_biclique(&graph, &MaxBicliqueParams::default()).unwrap();
        assert_eq!(result.size, 1);
    }
}
