use std::sync::atomic::Ordering;

use bitgraph::prelude::*;

use super::{MaxCliqueParams, MaxCliqueResult};

/// Bitset branch and bound with the plain `|C| + |P|` bound and no
/// colouring. Hopeless on anything hard, handy as an oracle.
pub fn naive_max_clique(
    graph: &Graph,
    params: &MaxCliqueParams,
) -> Result<MaxCliqueResult, Error> {
    struct Run<'a> {
        graph: &'a Graph,
        params: &'a MaxCliqueParams,
    }

    impl SizedRun for Run<'_> {
        type Output = MaxCliqueResult;

        fn run<const W: usize>(self) -> MaxCliqueResult {
            naive::<W>(self.graph, self.params)
        }
    }

    dispatch_graph_size(graph.size(), Run { graph, params })
}

fn naive<const W: usize>(graph: &Graph, params: &MaxCliqueParams) -> MaxCliqueResult {
    let mut result = MaxCliqueResult {
        size: params.initial_bound,
        ..MaxCliqueResult::default()
    };
    let n = graph.size();
    if n == 0 {
        return result;
    }

    let mut order: Vec<usize> = (0..n).collect();
    params.ordering.apply(graph, &mut order);
    let bit_graph: FixedBitGraph<W> = FixedBitGraph::from_graph_with_order(graph, &order);

    let mut c = FixedBitSet::new(n);
    let mut p = FixedBitSet::new(n);
    p.set_all();

    expand(&bit_graph, params, &mut result, &order, &mut c, &mut p);
    result.aborted = params.abort.load(Ordering::SeqCst);
    result
}

fn expand<const W: usize>(
    graph: &FixedBitGraph<W>,
    params: &MaxCliqueParams,
    result: &mut MaxCliqueResult,
    order: &[usize],
    c: &mut FixedBitSet<W>,
    p: &mut FixedBitSet<W>,
) {
    result.nodes += 1;

    while let Some(v) = p.first_set_bit() {
        // bound, early exit or cancellation
        if c.popcount() + p.popcount() <= result.size
            || result.size >= params.stop_after_finding
            || params.abort.load(Ordering::Relaxed)
        {
            return;
        }

        // consider taking v
        c.set(v);
        p.unset(v);

        let mut new_p = *p;
        graph.intersect_with_row(v, &mut new_p);

        if new_p.is_empty() {
            if c.popcount() > result.size {
                result.size = c.popcount();
                result.members = c.iter().map(|i| order[i]).collect();
            }
        } else {
            expand(graph, params, result, order, c, &mut new_p);
        }

        // now consider not taking v
        c.unset(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_triangle() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4)]);
        let result = naive_max_clique(&graph, &MaxCliqueParams::default()).unwrap();
        assert_eq!(result.size, 3);
        assert_eq!(result.members.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn empty_and_edgeless() {
        let result = naive_max_clique(&Graph::new(0), &MaxCliqueParams::default()).unwrap();
        assert_eq!(result.size, 0);
        let result = naive_max_clique(&Graph::new(3), &MaxCliqueParams::default()).unwrap();
        assert_eq!(result.size, 1);
    }
}
