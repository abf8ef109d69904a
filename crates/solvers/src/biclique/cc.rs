use std::sync::atomic::Ordering;

use bitgraph::prelude::*;

use super::cover::clique_cover_order;
use super::{BicliqueSymmetryRemoval, MaxBicliqueParams, MaxBicliqueResult};

/// Clique-cover-bounded branch and bound for maximum balanced biclique.
///
/// Each node covers the A-side candidates with greedy cliques: at most one
/// vertex per cover class can join the (independent) A side, which prunes far
/// ahead of the additive bound. Taking a vertex keeps only its non-neighbours
/// on its own side and its neighbours on the other, then the sides swap.
pub fn cc_max_biclique(
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
            Cc::<W>::new(self.graph, self.params).run()
        }
    }

    dispatch_graph_size(graph.size(), Run { graph, params })
}

struct Cc<'a, const W: usize> {
    graph: FixedBitGraph<W>,
    params: &'a MaxBicliqueParams,
    order: Vec<usize>,
    result: MaxBicliqueResult,
}

impl<'a, const W: usize> Cc<'a, W> {
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

        let mut pa_order = VertexArray::new();
        let mut cliques = VertexArray::new();
        clique_cover_order(&self.graph, pa, &mut pa_order, &mut cliques);

        let mut ca_popcount = ca.popcount();
        let cb_popcount = cb.popcount();
        let pa_popcount = pa.popcount();
        let mut pb_popcount = pb.popcount();

        for n in (0..pa_popcount as usize).rev() {
            if self.result.size >= self.params.stop_after_finding
                || self.params.abort.load(Ordering::Relaxed)
            {
                return;
            }

            // cover bound on this side, cardinality bound on the other
            if cliques[n] + ca_popcount <= self.result.size {
                return;
            }
            if pb_popcount + cb_popcount <= self.result.size {
                return;
            }

            // consider taking v
            let v = pa_order[n] as usize;
            ca.set(v);
            ca_popcount += 1;
            pa.unset(v);

            let mut new_pa = *pa;
            let mut new_pb = *pb;
            self.graph.intersect_with_row_complement(v, &mut new_pa);
            self.graph.intersect_with_row(v, &mut new_pb);

            if ca_popcount == cb_popcount && ca_popcount > self.result.size {
                self.record(ca, cb);
            }

            if !new_pb.is_empty() {
                // swap sides
                self.expand(cb, ca, &mut new_pb, &mut new_pa);
            }

            // now consider not taking v
            ca.unset(v);
            ca_popcount -= 1;

            if matches!(self.params.symmetry, BicliqueSymmetryRemoval::Remove) && cb.is_empty() {
                pb.unset(v);
                pb_popcount = pb.popcount();
            }
        }
    }
}
