use std::collections::BTreeSet;
use std::sync::atomic::Ordering;

use bitgraph::prelude::*;
use log::debug;
use parking_lot::Mutex;

use super::cco::{expand, CcoDelegate};
use super::{CcoConfig, CcoMerge, MaxCliqueParams, MaxCliqueResult};
use crate::colour::ColourClassOrder;
use crate::inference::InferenceState;
use crate::merge::merge_cliques;
use crate::parallel::{run_work_stealing, AtomicIncumbent, StealPoints, Subproblem};

struct Tcco<'a, const W: usize> {
    graph: FixedBitGraph<W>,
    original: &'a Graph,
    params: &'a MaxCliqueParams,
    config: CcoConfig,
    order: Vec<usize>,
    inferer: InferenceState<W>,
    best_anywhere: AtomicIncumbent,
    previouses: Mutex<Vec<BTreeSet<usize>>>,
}

impl<'a, const W: usize> Tcco<'a, W> {
    fn new(graph: &'a Graph, params: &'a MaxCliqueParams, config: CcoConfig) -> Self {
        let mut order: Vec<usize> = (0..graph.size()).collect();
        params.ordering.apply(graph, &mut order);
        let bit_graph = FixedBitGraph::from_graph_with_order(graph, &order);
        let inferer = InferenceState::new(config.inference, &bit_graph);
        Self {
            graph: bit_graph,
            original: graph,
            params,
            config,
            order,
            inferer,
            best_anywhere: AtomicIncumbent::new(),
            previouses: Mutex::new(Vec::new()),
        }
    }

    fn run(&self) -> MaxCliqueResult {
        let n = self.graph.size();
        let mut global = MaxCliqueResult {
            size: self.params.initial_bound,
            ..MaxCliqueResult::default()
        };
        if n == 0 {
            return global;
        }

        self.best_anywhere.update(self.params.initial_bound);

        // the root colouring is shared by every subproblem: each one re-walks
        // its forced prefix from a full candidate set
        let mut initial_p_order = VertexArray::new();
        let mut initial_colours = VertexArray::new();
        {
            let mut colour = ColourClassOrder::new(self.config.permutations, n);
            let mut initial_p = FixedBitSet::new(n);
            initial_p.set_all();
            colour.colour_class_order(
                &self.graph,
                &initial_p,
                &mut initial_p_order,
                &mut initial_colours,
            );
        }
        global.initial_colour_bound = initial_colours[n - 1];

        let steal_depths = self.params.split_depth.saturating_sub(1);

        let locals = run_work_stealing(
            self.params.n_threads,
            self.params.split_depth.max(1),
            n,
            |subproblem, local: &mut MaxCliqueResult, my_points| {
                let mut worker = TccoWorker {
                    shared: self,
                    colour: ColourClassOrder::new(self.config.permutations, n),
                    inferer: self.inferer.clone(),
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

                expand(
                    &mut worker,
                    &mut c,
                    &mut p,
                    &initial_p_order,
                    &initial_colours,
                    &mut position,
                );
            },
        );

        for (local, busy) in locals {
            global.merge(local);
            global.times.push(busy);
        }
        global.aborted = self.params.abort.load(Ordering::SeqCst);
        global
    }
}

struct TccoWorker<'a, 'b, const W: usize> {
    shared: &'a Tcco<'b, W>,
    colour: ColourClassOrder<W>,
    inferer: InferenceState<W>,
    local: &'a mut MaxCliqueResult,
    subproblem: &'a Subproblem,
    steal_points: &'a StealPoints,
    steal_depths: usize,
}

impl<const W: usize> TccoWorker<'_, '_, W> {
    fn depermute(&self, c: &[u32]) -> BTreeSet<usize> {
        c.iter().map(|&v| self.shared.order[v as usize]).collect()
    }

    fn note_incumbent(&mut self, size: u32, position: &[i32]) {
        self.local
            .incumbent_times
            .push(self.shared.params.start_time.elapsed());
        if let Some(callback) = &self.shared.params.on_incumbent {
            callback(size, position);
        }
    }

    /// Leaf-event merging against the shared incumbent history.
    fn merge_at_leaf(&mut self, new_members: &BTreeSet<usize>, position: &[i32]) {
        let shared = self.shared;
        let mut merged_results = Vec::new();
        {
            let mut previouses = shared.previouses.lock();
            let priors: Vec<usize> = match shared.config.merge {
                CcoMerge::Previous => previouses.len().checked_sub(1).into_iter().collect(),
                _ => (0..previouses.len()).collect(),
            };
            for i in priors {
                let merged = merge_cliques(shared.original, &previouses[i], new_members);
                if shared.best_anywhere.update(merged.len() as u32) {
                    debug!(
                        "merged {} and {} to get {}",
                        previouses[i].len(),
                        new_members.len(),
                        merged.len()
                    );
                    previouses.push(merged.clone());
                    merged_results.push(merged);
                }
            }
            previouses.push(new_members.clone());
        }
        for merged in merged_results {
            self.local.size = merged.len() as u32;
            self.local.members = merged;
            let size = self.local.size;
            self.note_incumbent(size, position);
        }
    }
}

impl<const W: usize> CcoDelegate<W> for TccoWorker<'_, '_, W> {
    fn graph(&self) -> &FixedBitGraph<W> {
        &self.shared.graph
    }

    fn should_abort(&self) -> bool {
        self.shared.params.abort.load(Ordering::Relaxed)
    }

    fn stop_after_finding(&self) -> u32 {
        self.shared.params.stop_after_finding
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
            .colour_class_order(&self.shared.graph, p, p_order, colours);
    }

    fn propagate_no(&mut self, v: usize, p: &mut FixedBitSet<W>) {
        self.inferer.propagate_no(&self.shared.graph, v, p);
    }

    fn skip_vertex(&self, v: usize, p: &FixedBitSet<W>) -> bool {
        self.inferer.skip(v, p)
    }

    fn best_anywhere(&self) -> u32 {
        self.shared.best_anywhere.get()
    }

    fn potential_new_best(&mut self, c: &[u32], position: &[i32]) {
        let size = c.len() as u32;
        if self.shared.params.enumerate {
            if self.shared.best_anywhere.beaten_by(size) {
                self.local.result_count += 1;
                self.local.size = size;
                self.local.members = self.depermute(c);
            }
        } else {
            if self.shared.best_anywhere.update(size) {
                self.local.size = size;
                self.local.members = self.depermute(c);
                self.note_incumbent(size, position);
            }
            if !matches!(self.shared.config.merge, CcoMerge::None) {
                let new_members = self.depermute(c);
                self.merge_at_leaf(&new_members, position);
            }
        }
    }

    fn recurse(
        &mut self,
        c: &mut Vec<u32>,
        p: &mut FixedBitSet<W>,
        p_order: &VertexArray<W>,
        colours: &VertexArray<W>,
        position: &mut Vec<i32>,
    ) -> bool {
        let depth = c.len();
        if depth < self.steal_depths {
            self.steal_points.points[depth - 1].publish(position);
        }
        expand(self, c, p, p_order, colours, position);
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

/// Threaded colour-ordered branch and bound for maximum clique: the
/// sequential expansion run under the work-stealing driver with a shared
/// atomic incumbent.
pub fn tcco_max_clique(
    graph: &Graph,
    params: &MaxCliqueParams,
    config: CcoConfig,
) -> Result<MaxCliqueResult, Error> {
    struct Run<'a> {
        graph: &'a Graph,
        params: &'a MaxCliqueParams,
        config: CcoConfig,
    }

    impl SizedRun for Run<'_> {
        type Output = MaxCliqueResult;

        fn run<const W: usize>(self) -> MaxCliqueResult {
            Tcco::<W>::new(self.graph, self.params, self.config).run()
        }
    }

    dispatch_graph_size(
        graph.size(),
        Run {
            graph,
            params,
            config,
        },
    )
}
