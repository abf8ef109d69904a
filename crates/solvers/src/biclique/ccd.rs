use std::sync::atomic::Ordering;

use bitgraph::prelude::*;
use log::debug;

use super::cover::clique_cover_order;
use super::{BicliqueSymmetryRemoval, MaxBicliqueParams, MaxBicliqueResult};

/// The cover-bounded biclique search with an independence fallback.
///
/// Once a side's cover degenerates into all-singleton classes, that side is
/// an independent set and recomputing the cover cannot tighten anything; when
/// both sides get there, the remaining subtree runs a plain expansion with
/// the cardinality bound instead.
pub fn ccd_max_biclique(
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
            Ccd::<W>::new(self.graph, self.params).run()
        }
    }

    dispatch_graph_size(graph.size(), Run { graph, params })
}

struct Ccd<'a, const W: usize> {
    graph: FixedBitGraph<W>,
    params: &'a MaxBicliqueParams,
    order: Vec<usize>,
    result: MaxBicliqueResult,
}

impl<'a, const W: usize> Ccd<'a, W> {
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

        let mut position = Vec::with_capacity(n);
        position.push(0);

        self.expand(&mut ca, &mut cb, &mut pa, &mut pb, false, false, &mut position);
        self.result.aborted = self.params.abort.load(Ordering::SeqCst);
        self.result
    }

    fn record(&mut self, ca: &FixedBitSet<W>, cb: &FixedBitSet<W>, position: &[i32]) {
        self.result.size = ca.popcount();
        self.result.members_a = ca.iter().map(|v| self.order[v]).collect();
        self.result.members_b = cb.iter().map(|v| self.order[v]).collect();
        debug!("new incumbent of size {} at {position:?}", self.result.size);
        if let Some(callback) = &self.params.on_incumbent {
            callback(self.result.size);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &mut self,
        ca: &mut FixedBitSet<W>,
        cb: &mut FixedBitSet<W>,
        pa: &mut FixedBitSet<W>,
        pb: &mut FixedBitSet<W>,
        pa_is_independent: bool,
        pb_is_independent: bool,
        position: &mut Vec<i32>,
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
            *position.last_mut().unwrap() += 1;

            if self.result.size >= self.params.stop_after_finding
                || self.params.abort.load(Ordering::Relaxed)
            {
                return;
            }

            if cliques[n] + ca_popcount <= self.result.size {
                return;
            }
            if pb_popcount + cb_popcount <= self.result.size {
                return;
            }

            // an all-singleton cover means this side is independent already
            let new_pa_is_independent =
                pa_is_independent || (n > 1 && cliques[n] == n as u32 + 1);

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
                self.record(ca, cb, position);
            }

            if !new_pb.is_empty() {
                // swap sides
                position.push(0);
                if new_pa_is_independent && pb_is_independent {
                    self.naive_expand(cb, ca, &mut new_pb, &mut new_pa, position);
                } else {
                    self.expand(
                        cb,
                        ca,
                        &mut new_pb,
                        &mut new_pa,
                        pb_is_independent,
                        new_pa_is_independent,
                        position,
                    );
                }
                position.pop();
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

    fn naive_expand(
        &mut self,
        ca: &mut FixedBitSet<W>,
        cb: &mut FixedBitSet<W>,
        pa: &mut FixedBitSet<W>,
        pb: &mut FixedBitSet<W>,
        position: &mut Vec<i32>,
    ) {
        self.result.nodes += 1;

        let mut ca_popcount = ca.popcount();
        let cb_popcount = cb.popcount();
        let mut pa_popcount = pa.popcount();
        let pb_popcount = pb.popcount();

        while !pa.is_empty() {
            *position.last_mut().unwrap() += 1;

            if self.result.size >= self.params.stop_after_finding
                || self.params.abort.load(Ordering::Relaxed)
            {
                return;
            }

            if pa_popcount + ca_popcount <= self.result.size {
                return;
            }
            if pb_popcount + cb_popcount <= self.result.size {
                return;
            }

            // consider taking v
            let v = pa.last_set_bit().unwrap();
            ca.set(v);
            ca_popcount += 1;
            pa.unset(v);
            pa_popcount -= 1;

            let mut new_pa = *pa;
            let mut new_pb = *pb;
            self.graph.intersect_with_row_complement(v, &mut new_pa);
            self.graph.intersect_with_row(v, &mut new_pb);

            if ca_popcount == cb_popcount && ca_popcount > self.result.size {
                self.record(ca, cb, position);
            }

            if !new_pb.is_empty() {
                // swap sides
                position.push(0);
                self.naive_expand(cb, ca, &mut new_pb, &mut new_pa, position);
                position.pop();
            }

            // now consider not taking v
            ca.unset(v);
            ca_popcount -= 1;

            if matches!(self.params.symmetry, BicliqueSymmetryRemoval::Remove) && cb.is_empty() {
                pb.unset(v);
            }
        }
    }
}
