use std::collections::BTreeSet;
use std::sync::atomic::Ordering;

use bitgraph::prelude::*;
use log::debug;

use super::{CcoConfig, CcoMerge, MaxCliqueParams, MaxCliqueResult};
use crate::colour::ColourClassOrder;
use crate::inference::InferenceState;
use crate::merge::merge_cliques;

/// The hooks a colour-ordered search supplies to [`expand`].
///
/// The sequential searcher and the threaded worker both implement this; the
/// expansion routine itself is shared. Mirrors the classic design where the
/// branch loop is written once and specialised by who keeps the incumbent.
pub(crate) trait CcoDelegate<const W: usize> {
    fn graph(&self) -> &FixedBitGraph<W>;
    fn should_abort(&self) -> bool;
    fn stop_after_finding(&self) -> u32;
    fn increment_nodes(&mut self);
    fn colour_class_order(
        &mut self,
        p: &FixedBitSet<W>,
        p_order: &mut VertexArray<W>,
        colours: &mut VertexArray<W>,
    );
    fn propagate_no(&mut self, v: usize, p: &mut FixedBitSet<W>);
    fn skip_vertex(&self, v: usize, p: &FixedBitSet<W>) -> bool;
    fn best_anywhere(&self) -> u32;
    fn potential_new_best(&mut self, c: &[u32], position: &[i32]);
    /// Recurse into a child node. Returns `false` if siblings at this depth
    /// must not be explored (their responsibility was handed off).
    fn recurse(
        &mut self,
        c: &mut Vec<u32>,
        p: &mut FixedBitSet<W>,
        p_order: &VertexArray<W>,
        colours: &VertexArray<W>,
        position: &mut Vec<i32>,
    ) -> bool;
    /// `(skip, keep_going)` for this depth: how many branch positions belong
    /// to someone else, and whether to continue past the first owned branch.
    fn skip_and_stop(&self, c_len: usize) -> (i32, bool);
}

/// One node of the colour-ordered branch-and-bound: iterate the candidate
/// set from the weakest bound downward, take / not-take each vertex, prune
/// on `|C| + colours[n]`.
pub(crate) fn expand<const W: usize, D: CcoDelegate<W>>(
    delegate: &mut D,
    c: &mut Vec<u32>,
    p: &mut FixedBitSet<W>,
    p_order: &VertexArray<W>,
    colours: &VertexArray<W>,
    position: &mut Vec<i32>,
) {
    delegate.increment_nodes();

    let (mut skip, mut keep_going) = delegate.skip_and_stop(c.len());

    for n in (0..p.popcount() as usize).rev() {
        *position.last_mut().unwrap() += 1;

        // bound, early exit or cancellation
        let best = delegate.best_anywhere();
        if c.len() as u32 + colours[n] <= best
            || best >= delegate.stop_after_finding()
            || delegate.should_abort()
        {
            return;
        }

        let v = p_order[n] as usize;

        if skip > 0 || delegate.skip_vertex(v, p) {
            skip -= 1;
            p.unset(v);
            delegate.propagate_no(v, p);
        } else {
            // consider taking v
            c.push(v as u32);
            let mut new_p = *p;
            delegate.graph().intersect_with_row(v, &mut new_p);

            if new_p.is_empty() {
                delegate.potential_new_best(c, position);
            } else {
                position.push(0);
                let mut new_p_order = VertexArray::new();
                let mut new_colours = VertexArray::new();
                delegate.colour_class_order(&new_p, &mut new_p_order, &mut new_colours);
                keep_going =
                    delegate.recurse(c, &mut new_p, &new_p_order, &new_colours, position)
                        && keep_going;
                position.pop();
            }

            // now consider not taking v
            c.pop();
            p.unset(v);
            delegate.propagate_no(v, p);

            if !keep_going {
                break;
            }
        }
    }
}

struct Cco<'a, const W: usize> {
    graph: FixedBitGraph<W>,
    original: &'a Graph,
    params: &'a MaxCliqueParams,
    order: Vec<usize>,
    colour: ColourClassOrder<W>,
    inferer: InferenceState<W>,
    merge: CcoMerge,
    previouses: Vec<BTreeSet<usize>>,
    result: MaxCliqueResult,
}

impl<'a, const W: usize> Cco<'a, W> {
    fn new(graph: &'a Graph, params: &'a MaxCliqueParams, config: CcoConfig) -> Self {
        let mut order: Vec<usize> = (0..graph.size()).collect();
        params.ordering.apply(graph, &mut order);
        let bit_graph = FixedBitGraph::from_graph_with_order(graph, &order);
        let inferer = InferenceState::new(config.inference, &bit_graph);
        let colour = ColourClassOrder::new(config.permutations, graph.size());
        Self {
            graph: bit_graph,
            original: graph,
            params,
            order,
            colour,
            inferer,
            merge: config.merge,
            previouses: Vec::new(),
            result: MaxCliqueResult::default(),
        }
    }

    fn run(mut self) -> MaxCliqueResult {
        self.result.size = self.params.initial_bound;
        let n = self.graph.size();
        if n == 0 {
            return self.result;
        }

        let mut c = Vec::with_capacity(n);
        let mut p = FixedBitSet::new(n);
        p.set_all();

        let mut position = Vec::with_capacity(n);
        position.push(0);

        let mut initial_p_order = VertexArray::new();
        let mut initial_colours = VertexArray::new();
        self.colour
            .colour_class_order(&self.graph, &p, &mut initial_p_order, &mut initial_colours);
        self.result.initial_colour_bound = initial_colours[n - 1];
        debug!(
            "initial colouring used {} colours",
            self.result.initial_colour_bound
        );

        expand(
            &mut self,
            &mut c,
            &mut p,
            &initial_p_order,
            &initial_colours,
            &mut position,
        );

        if self.params.enumerate {
            self.result.size = self.result.members.len() as u32;
        }
        self.result.aborted = self.params.abort.load(Ordering::SeqCst);
        self.result
    }

    fn depermute(&self, c: &[u32]) -> BTreeSet<usize> {
        c.iter().map(|&v| self.order[v as usize]).collect()
    }

    fn note_incumbent(&mut self, size: u32, position: &[i32]) {
        self.result
            .incumbent_times
            .push(self.params.start_time.elapsed());
        if let Some(callback) = &self.params.on_incumbent {
            callback(size, position);
        }
    }
}

impl<const W: usize> CcoDelegate<W> for Cco<'_, W> {
    fn graph(&self) -> &FixedBitGraph<W> {
        &self.graph
    }

    fn should_abort(&self) -> bool {
        self.params.abort.load(Ordering::Relaxed)
    }

    fn stop_after_finding(&self) -> u32 {
        self.params.stop_after_finding
    }

    fn increment_nodes(&mut self) {
        self.result.nodes += 1;
    }

    fn colour_class_order(
        &mut self,
        p: &FixedBitSet<W>,
        p_order: &mut VertexArray<W>,
        colours: &mut VertexArray<W>,
    ) {
        self.colour
            .colour_class_order(&self.graph, p, p_order, colours);
    }

    fn propagate_no(&mut self, v: usize, p: &mut FixedBitSet<W>) {
        self.inferer.propagate_no(&self.graph, v, p);
    }

    fn skip_vertex(&self, v: usize, p: &FixedBitSet<W>) -> bool {
        self.inferer.skip(v, p)
    }

    fn best_anywhere(&self) -> u32 {
        self.result.size
    }

    fn potential_new_best(&mut self, c: &[u32], position: &[i32]) {
        match self.merge {
            CcoMerge::None => {
                if c.len() as u32 > self.result.size {
                    if self.params.enumerate {
                        self.result.result_count += 1;
                        self.result.size = c.len() as u32 - 1;
                    } else {
                        self.result.size = c.len() as u32;
                    }
                    self.result.members = self.depermute(c);
                    self.note_incumbent(c.len() as u32, position);
                }
            }
            CcoMerge::Previous => {
                let new_members = self.depermute(c);
                let merged = merge_cliques(self.original, &self.result.members, &new_members);
                if merged.len() as u32 > self.result.size {
                    self.result.size = merged.len() as u32;
                    self.result.members = merged;
                    self.note_incumbent(self.result.size, position);
                }
            }
            CcoMerge::All => {
                let new_members = self.depermute(c);
                if self.previouses.is_empty() {
                    self.result.size = new_members.len() as u32;
                    self.result.members = new_members;
                    self.previouses.push(self.result.members.clone());
                    self.note_incumbent(self.result.size, position);
                } else {
                    // merges may append while we scan, and appended entries
                    // get scanned too
                    let mut i = 0;
                    while i < self.previouses.len() {
                        let merged =
                            merge_cliques(self.original, &self.previouses[i], &new_members);
                        if merged.len() as u32 > self.result.size {
                            self.result.size = merged.len() as u32;
                            self.result.members = merged;
                            self.previouses.push(self.result.members.clone());
                            self.note_incumbent(self.result.size, position);
                        }
                        i += 1;
                    }
                }
                self.previouses.push(self.result.members.clone());
                debug!("previouses is now {}", self.previouses.len());
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
        expand(self, c, p, p_order, colours, position);
        true
    }

    fn skip_and_stop(&self, _c_len: usize) -> (i32, bool) {
        (0, true)
    }
}

/// Sequential colour-ordered branch and bound for maximum clique.
pub fn cco_max_clique(
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
            Cco::<W>::new(self.graph, self.params, self.config).run()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::CcoPermutations;
    use crate::inference::CcoInference;
    use std::sync::Arc;

    fn petersen() -> Graph {
        Graph::from_edges(
            10,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 0),
                (0, 5),
                (1, 6),
                (2, 7),
                (3, 8),
                (4, 9),
                (5, 7),
                (7, 9),
                (9, 6),
                (6, 8),
                (8, 5),
            ],
        )
    }

    fn solve(graph: &Graph, config: CcoConfig) -> MaxCliqueResult {
        cco_max_clique(graph, &MaxCliqueParams::default(), config).unwrap()
    }

    fn all_configs() -> Vec<CcoConfig> {
        let mut configs = Vec::new();
        for permutations in [
            CcoPermutations::None,
            CcoPermutations::Defer1,
            CcoPermutations::Sort,
            CcoPermutations::RepairAll,
            CcoPermutations::RepairSelectedFast,
        ] {
            for inference in [
                CcoInference::None,
                CcoInference::GlobalDomination,
                CcoInference::GlobalDominationSkip,
                CcoInference::LazyGlobalDomination,
            ] {
                configs.push(CcoConfig {
                    permutations,
                    inference,
                    merge: CcoMerge::None,
                });
            }
        }
        configs.push(CcoConfig {
            merge: CcoMerge::Previous,
            ..CcoConfig::default()
        });
        configs.push(CcoConfig {
            merge: CcoMerge::All,
            ..CcoConfig::default()
        });
        configs
    }

    #[test]
    fn path_has_clique_number_two() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        for config in all_configs() {
            let result = solve(&graph, config);
            assert_eq!(result.size, 2, "{config:?}");
            let members: Vec<usize> = result.members.iter().copied().collect();
            assert!(is_clique(&graph, &members), "{config:?}");
        }
    }

    #[test]
    fn empty_graph_has_clique_number_zero() {
        let graph = Graph::new(0);
        let result = solve(&graph, CcoConfig::default());
        assert_eq!(result.size, 0);
        assert!(result.members.is_empty());
    }

    #[test]
    fn edgeless_graph_has_clique_number_one() {
        let graph = Graph::new(6);
        let result = solve(&graph, CcoConfig::default());
        assert_eq!(result.size, 1);
    }

    #[test]
    fn complete_graph_is_its_own_clique() {
        let mut graph = Graph::new(7);
        for u in 0..7 {
            for v in (u + 1)..7 {
                graph.add_edge(u, v);
            }
        }
        for config in all_configs() {
            let result = solve(&graph, config);
            assert_eq!(result.size, 7, "{config:?}");
            assert_eq!(result.members.len(), 7, "{config:?}");
        }
    }

    #[test]
    fn petersen_has_clique_number_two() {
        for config in all_configs() {
            let result = solve(&petersen(), config);
            assert_eq!(result.size, 2, "{config:?}");
        }
    }

    #[test]
    fn petersen_has_fifteen_maximum_cliques() {
        let params = MaxCliqueParams {
            enumerate: true,
            ..MaxCliqueParams::default()
        };
        let result = cco_max_clique(&petersen(), &params, CcoConfig::default()).unwrap();
        assert_eq!(result.size, 2);
        assert_eq!(result.result_count, 15);
    }

    #[test]
    fn initial_bound_suppresses_smaller_cliques() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let params = MaxCliqueParams {
            initial_bound: 3,
            ..MaxCliqueParams::default()
        };
        let result = cco_max_clique(&graph, &params, CcoConfig::default()).unwrap();
        assert_eq!(result.size, 3);
        assert!(result.members.is_empty());
    }

    #[test]
    fn abort_before_first_node_returns_the_seed() {
        let params = MaxCliqueParams::default();
        params.abort.store(true, Ordering::SeqCst);
        let result = cco_max_clique(&petersen(), &params, CcoConfig::default()).unwrap();
        assert_eq!(result.size, 0);
        assert!(result.members.is_empty());
        assert!(result.aborted);
    }

    #[test]
    fn stop_after_finding_halts_early() {
        let mut graph = Graph::new(8);
        for u in 0..8 {
            for v in (u + 1)..8 {
                graph.add_edge(u, v);
            }
        }
        let params = MaxCliqueParams {
            stop_after_finding: 3,
            ..MaxCliqueParams::default()
        };
        let result = cco_max_clique(&graph, &params, CcoConfig::default()).unwrap();
        assert!(result.size >= 3);
    }

    #[test]
    fn incumbent_callback_sees_improvements() {
        use std::sync::atomic::AtomicU32;

        let best_seen = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&best_seen);
        let params = MaxCliqueParams {
            on_incumbent: Some(Arc::new(move |size, _| {
                seen.store(size, Ordering::SeqCst);
            })),
            ..MaxCliqueParams::default()
        };
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2)]);
        let result = cco_max_clique(&graph, &params, CcoConfig::default()).unwrap();
        assert_eq!(result.size, 3);
        assert_eq!(best_seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn agrees_with_naive_on_random_graphs() {
        for seed in 0..6 {
            let graph = gnp(26, 0.5, seed);
            let expected = crate::clique::naive_max_clique(&graph, &MaxCliqueParams::default())
                .unwrap()
                .size;
            for config in all_configs() {
                let result = solve(&graph, config);
                assert_eq!(result.size, expected, "seed {seed}, {config:?}");
                let members: Vec<usize> = result.members.iter().copied().collect();
                assert!(is_clique(&graph, &members));
                assert_eq!(members.len() as u32, result.size);
            }
        }
    }
}
