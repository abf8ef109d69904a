use std::sync::atomic::Ordering;

use bitgraph::prelude::*;
use log::debug;

use super::lcco::{expand, LccoContext, LccoDelegate};
use super::{MaxLabelledCliqueParams, MaxLabelledCliqueResult};
use crate::colour::{CcoPermutations, ColourClassOrder};
use crate::parallel::{
    pack_labelled, run_work_stealing, unpack_labelled, AtomicIncumbent, StealPoints, Subproblem,
};

struct Tlcco<'a, const W: usize> {
    context: LccoContext<W>,
    params: &'a MaxLabelledCliqueParams,
    permutations: CcoPermutations,
    best_anywhere: AtomicIncumbent,
}

impl<'a, const W: usize> Tlcco<'a, W> {
    fn new(
        graph: &'a Graph,
        params: &'a MaxLabelledCliqueParams,
        permutations: CcoPermutations,
    ) -> Self {
        Self {
            context: LccoContext::new(graph, params),
            params,
            permutations,
            best_anywhere: AtomicIncumbent::new(),
        }
    }

    fn run(&self) -> MaxLabelledCliqueResult {
        let n = self.context.graph.size();
        let mut global = MaxLabelledCliqueResult {
            size: self.params.initial_bound,
            ..MaxLabelledCliqueResult::default()
        };
        if n == 0 {
            return global;
        }

        self.best_anywhere
            .update(pack_labelled(self.params.initial_bound, 0));

        let steal_depths = self.params.split_depth.saturating_sub(1);

        // the incumbent carries across the passes; only the work queues are
        // rebuilt
        for pass_2 in [false, true] {
            debug!("labelled clique pass {}", if pass_2 { 2 } else { 1 });
            let locals = run_work_stealing(
                self.params.n_threads,
                self.params.split_depth.max(1),
                n,
                |subproblem, local: &mut MaxLabelledCliqueResult, my_points| {
                    let mut worker = TlccoWorker {
                        shared: self,
                        colour: ColourClassOrder::new(self.permutations, n),
                        local,
                        subproblem,
                        steal_points: my_points,
                        steal_depths,
                    };

                    let mut c = Vec::with_capacity(n);
                    let mut p = FixedBitSet::new(n);
                    p.set_all();
                    let mut position = Vec::with_capacity(n);
                    position.push(0);

                    expand(&mut worker, pass_2, &mut c, &mut p, 0, &mut position);
                },
            );

            for (local, busy) in locals {
                global.merge(local);
                global.times.push(busy);
            }
        }

        global.aborted = self.params.abort.load(Ordering::SeqCst);
        global
    }
}

struct TlccoWorker<'a, 'b, const W: usize> {
    shared: &'a Tlcco<'b, W>,
    colour: ColourClassOrder<W>,
    local: &'a mut MaxLabelledCliqueResult,
    subproblem: &'a Subproblem,
    steal_points: &'a StealPoints,
    steal_depths: usize,
}

impl<const W: usize> LccoDelegate<W> for TlccoWorker<'_, '_, W> {
    fn graph(&self) -> &FixedBitGraph<W> {
        &self.shared.context.graph
    }

    fn label_mask(&self, v: usize) -> u64 {
        self.shared.context.label_masks[v]
    }

    fn should_abort(&self) -> bool {
        self.shared.params.abort.load(Ordering::Relaxed)
    }

    fn increment_nodes(&mut self) {
        self.local.nodes += 1;
    }

    fn colour_class_order(
        &mut self,
        p: &FixedBitSet<W>,
        p_order: &mut VertexArray<W>,
        colours: &mut VertexArray<W>,
    ) {
        self.colour
            .colour_class_order(&self.shared.context.graph, p, p_order, colours);
    }

    fn best_size_anywhere(&self) -> u32 {
        unpack_labelled(self.shared.best_anywhere.get()).0
    }

    fn potential_new_best(&mut self, c: &[u32], cost: u32, position: &[i32]) {
        let size = c.len() as u32;
        if self
            .shared
            .best_anywhere
            .update(pack_labelled(size, cost))
        {
            self.local.size = size;
            self.local.cost = cost;
            self.local.members = c
                .iter()
                .map(|&v| self.shared.context.order[v as usize])
                .collect();
            debug!("new labelled incumbent {size} at cost {cost}, {position:?}");
            if let Some(callback) = &self.shared.params.on_incumbent {
                callback(size, cost);
            }
        }
    }

    fn recurse(
        &mut self,
        pass_2: bool,
        c: &mut Vec<u32>,
        p: &mut FixedBitSet<W>,
        used: u64,
        position: &mut Vec<i32>,
    ) -> bool {
        let depth = c.len();
        if depth < self.steal_depths {
            self.steal_points.points[depth - 1].publish(position);
        }
        expand(self, pass_2, c, p, used, position);
        if depth < self.steal_depths {
            self.steal_points.points[depth - 1].unpublish_and_keep_going()
        } else {
            true
        }
    }

    fn skip_and_stop(&self, c_len: usize) -> (i32, bool) {
        if c_len < self.subproblem.offsets.len() {
            (self.subproblem.offsets[c_len], false)
        } else {
            (0, true)
        }
    }
}

/// Threaded two-pass labelled max clique over the work-stealing driver, with
/// the packed size/cost incumbent shared between workers and passes.
pub fn tlcco_max_labelled_clique(
    graph: &Graph,
    params: &MaxLabelledCliqueParams,
    permutations: CcoPermutations,
) -> Result<MaxLabelledCliqueResult, Error> {
    struct Run<'a> {
        graph: &'a Graph,
        params: &'a MaxLabelledCliqueParams,
        permutations: CcoPermutations,
    }

    impl SizedRun for Run<'_> {
        type Output = MaxLabelledCliqueResult;

        fn run<const W: usize>(self) -> MaxLabelledCliqueResult {
            Tlcco::<W>::new(self.graph, self.params, self.permutations).run()
        }
    }

    dispatch_graph_size(
        graph.size(),
        Run {
            graph,
            params,
            permutations,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelled::lcco_max_labelled_clique;

    fn labels_mod(n: usize, k: u8) -> Vec<u8> {
        (0..n).map(|v| (v % k as usize) as u8).collect()
    }

    #[test]
    fn matches_sequential_objective() {
        for seed in 0..3 {
            let graph = gnp(24, 0.5, 200 + seed);
            let labels = labels_mod(24, 4);
            let sequential = lcco_max_labelled_clique(
                &graph,
                &MaxLabelledCliqueParams::new(labels.clone()),
                CcoPermutations::None,
            )
            .unwrap();
            let mut params = MaxLabelledCliqueParams::new(labels);
            params.n_threads = 4;
            let threaded =
                tlcco_max_labelled_clique(&graph, &params, CcoPermutations::None).unwrap();
            assert_eq!(threaded.size, sequential.size, "seed {seed}");
            assert_eq!(threaded.cost, sequential.cost, "seed {seed}");
            let members: Vec<usize> = threaded.members.iter().copied().collect();
            assert!(is_clique(&graph, &members));
        }
    }

    #[test]
    fn two_passes_report_two_time_sets() {
        let graph = gnp(16, 0.4, 1);
        let mut params = MaxLabelledCliqueParams::new(labels_mod(16, 2));
        params.n_threads = 2;
        let result = tlcco_max_labelled_clique(&graph, &params, CcoPermutations::Defer1).unwrap();
        assert_eq!(result.times.len(), 4);
    }
}
