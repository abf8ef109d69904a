use std::sync::atomic::Ordering;

use bitgraph::prelude::*;

use super::{MaxLabelledCliqueParams, MaxLabelledCliqueResult};
use crate::colour::{CcoPermutations, ColourClassOrder};
use crate::parallel::{pack_labelled, unpack_labelled, AtomicIncumbent};

/// Hooks for the labelled colour-ordered expansion, implemented by the
/// sequential searcher and the threaded worker.
pub(crate) trait LccoDelegate<const W: usize> {
    fn graph(&self) -> &FixedBitGraph<W>;
    /// The label of a search-index vertex, as a one-bit mask.
    fn label_mask(&self, v: usize) -> u64;
    fn should_abort(&self) -> bool;
    fn increment_nodes(&mut self);
    fn colour_class_order(
        &mut self,
        p: &FixedBitSet<W>,
        p_order: &mut VertexArray<W>,
        colours: &mut VertexArray<W>,
    );
    fn best_size_anywhere(&self) -> u32;
    fn potential_new_best(&mut self, c: &[u32], cost: u32, position: &[i32]);
    fn recurse(
        &mut self,
        pass_2: bool,
        c: &mut Vec<u32>,
        p: &mut FixedBitSet<W>,
        used: u64,
        position: &mut Vec<i32>,
    ) -> bool;
    fn skip_and_stop(&self, c_len: usize) -> (i32, bool);
}

/// As the plain CCO expansion, but the path accumulates the set of labels
/// used. Pass 1 prunes subtrees that cannot exceed the incumbent size; pass 2
/// keeps equal-size subtrees alive, so cheaper label sets of the optimal size
/// are still reachable.
pub(crate) fn expand<const W: usize, D: LccoDelegate<W>>(
    delegate: &mut D,
    pass_2: bool,
    c: &mut Vec<u32>,
    p: &mut FixedBitSet<W>,
    used: u64,
    position: &mut Vec<i32>,
) {
    delegate.increment_nodes();

    let mut p_order = VertexArray::new();
    let mut colours = VertexArray::new();
    delegate.colour_class_order(p, &mut p_order, &mut colours);

    let (mut skip, mut keep_going) = delegate.skip_and_stop(c.len());

    for n in (0..p.popcount() as usize).rev() {
        *position.last_mut().unwrap() += 1;

        let best_size = delegate.best_size_anywhere();
        let bound = c.len() as u32 + colours[n];
        let cut = if pass_2 {
            bound < best_size
        } else {
            bound <= best_size
        };
        if cut || delegate.should_abort() {
            return;
        }

        let v = p_order[n] as usize;

        if skip > 0 {
            skip -= 1;
            p.unset(v);
        } else {
            // consider taking v
            let new_used = used | delegate.label_mask(v);
            c.push(v as u32);
            let mut new_p = *p;
            delegate.graph().intersect_with_row(v, &mut new_p);

            if new_p.is_empty() {
                delegate.potential_new_best(c, new_used.count_ones(), position);
            } else {
                position.push(0);
                keep_going =
                    delegate.recurse(pass_2, c, &mut new_p, new_used, position) && keep_going;
                position.pop();
            }

            // now consider not taking v
            c.pop();
            p.unset(v);

            if !keep_going {
                break;
            }
        }
    }
}

/// Shared per-solve context: the re-encoded graph and the label mask of each
/// search-index vertex.
pub(crate) struct LccoContext<const W: usize> {
    pub(crate) graph: FixedBitGraph<W>,
    pub(crate) order: Vec<usize>,
    pub(crate) label_masks: Vec<u64>,
}

impl<const W: usize> LccoContext<W> {
    pub(crate) fn new(graph: &Graph, params: &MaxLabelledCliqueParams) -> Self {
        assert_eq!(params.labels.len(), graph.size(), "one label per vertex");
        assert!(
            params.labels.iter().all(|&l| l < 64),
            "label ids must be below 64"
        );
        let mut order: Vec<usize> = (0..graph.size()).collect();
        params.ordering.apply(graph, &mut order);
        let bit_graph = FixedBitGraph::from_graph_with_order(graph, &order);
        let label_masks = order.iter().map(|&v| 1u64 << params.labels[v]).collect();
        Self {
            graph: bit_graph,
            order,
            label_masks,
        }
    }
}

struct Lcco<'a, const W: usize> {
    context: LccoContext<W>,
    params: &'a MaxLabelledCliqueParams,
    colour: ColourClassOrder<W>,
    best_anywhere: AtomicIncumbent,
    result: MaxLabelledCliqueResult,
}

impl<'a, const W: usize> Lcco<'a, W> {
    fn new(graph: &'a Graph, params: &'a MaxLabelledCliqueParams, permutations: CcoPermutations) -> Self {
        let context = LccoContext::new(graph, params);
        let colour = ColourClassOrder::new(permutations, graph.size());
        Self {
            context,
            params,
            colour,
            best_anywhere: AtomicIncumbent::new(),
            result: MaxLabelledCliqueResult::default(),
        }
    }

    fn run(mut self) -> MaxLabelledCliqueResult {
        self.result.size = self.params.initial_bound;
        let n = self.context.graph.size();
        if n == 0 {
            return self.result;
        }

        self.best_anywhere
            .update(pack_labelled(self.params.initial_bound, 0));

        for pass_2 in [false, true] {
            let mut c = Vec::with_capacity(n);
            let mut p = FixedBitSet::new(n);
            p.set_all();
            let mut position = Vec::with_capacity(n);
            position.push(0);
            expand(&mut self, pass_2, &mut c, &mut p, 0, &mut position);
        }

        self.result.aborted = self.params.abort.load(Ordering::SeqCst);
        self.result
    }
}

impl<const W: usize> LccoDelegate<W> for Lcco<'_, W> {
    fn graph(&self) -> &FixedBitGraph<W> {
        &self.context.graph
    }

    fn label_mask(&self, v: usize) -> u64 {
        self.context.label_masks[v]
    }

    fn should_abort(&self) -> bool {
        self.params.abort.load(Ordering::Relaxed)
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
            .colour_class_order(&self.context.graph, p, p_order, colours);
    }

    fn best_size_anywhere(&self) -> u32 {
        unpack_labelled(self.best_anywhere.get()).0
    }

    fn potential_new_best(&mut self, c: &[u32], cost: u32, position: &[i32]) {
        let size = c.len() as u32;
        if self.best_anywhere.update(pack_labelled(size, cost)) {
            self.result.size = size;
            self.result.cost = cost;
            self.result.members = c
                .iter()
                .map(|&v| self.context.order[v as usize])
                .collect();
            log::debug!("new labelled incumbent {size} at cost {cost}, {position:?}");
            if let Some(callback) = &self.params.on_incumbent {
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
        expand(self, pass_2, c, p, used, position);
        true
    }

    fn skip_and_stop(&self, _c_len: usize) -> (i32, bool) {
        (0, true)
    }
}

/// Sequential two-pass labelled max clique: maximise size, then prove the
/// cheapest label set for that size.
pub fn lcco_max_labelled_clique(
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
            Lcco::<W>::new(self.graph, self.params, self.permutations).run()
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
