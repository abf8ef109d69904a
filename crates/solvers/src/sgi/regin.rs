use fxhash::FxHashSet;
use petgraph::algo::{maximum_matching, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

use bitgraph::FixedBitSet;

use super::cb::Domain;

/// Régin's all-different filtering over the value graph.
///
/// Pattern vertices must take pairwise distinct target vertices. Build the
/// bipartite value graph, take a maximum matching; if it leaves a pattern
/// vertex unmatched the constraint is already unsatisfiable. Otherwise orient
/// matched edges pattern→target and the rest target→pattern: a value edge
/// survives iff it is matched, lies on an alternating path from a free target
/// vertex, or sits inside a strongly connected component. Everything else
/// can appear in no maximum matching and is pruned from the domains.
pub(crate) fn regin_all_different<const W: usize>(
    domains: &mut [Domain<W>],
    pattern_size: usize,
    target_size: usize,
) -> bool {
    // nothing to do while every domain is still wide open
    let tight = domains
        .iter()
        .filter(|d| d.values.popcount() < pattern_size as u32)
        .count();
    if tight == 0 {
        return true;
    }

    let mut value_graph: UnGraph<(), ()> = UnGraph::default();
    let nodes: Vec<NodeIndex> = (0..pattern_size + target_size)
        .map(|_| value_graph.add_node(()))
        .collect();
    for d in domains.iter() {
        for j in d.values.iter() {
            value_graph.add_edge(nodes[d.v], nodes[pattern_size + j], ());
        }
    }

    let matching = maximum_matching(&value_graph);

    let mate: Vec<Option<usize>> = (0..pattern_size)
        .map(|i| matching.mate(nodes[i]).map(|m| m.index()))
        .collect();
    if mate.iter().filter(|m| m.is_some()).count() != pattern_size {
        return false;
    }

    // orient: matched pattern→target, unmatched target→pattern
    let mut oriented: DiGraph<(), ()> = DiGraph::default();
    let oriented_nodes: Vec<NodeIndex> = (0..pattern_size + target_size)
        .map(|_| oriented.add_node(()))
        .collect();
    let mut unused: FxHashSet<(usize, usize)> = FxHashSet::default();
    for d in domains.iter() {
        for j in d.values.iter() {
            unused.insert((d.v, j));
            if mate[d.v] == Some(pattern_size + j) {
                oriented.add_edge(oriented_nodes[d.v], oriented_nodes[pattern_size + j], ());
            } else {
                oriented.add_edge(oriented_nodes[pattern_size + j], oriented_nodes[d.v], ());
            }
        }
    }

    // free target vertices seed the alternating paths
    let matched_targets: FxHashSet<usize> = mate.iter().flatten().copied().collect();
    let mut pending: Vec<usize> = (pattern_size..pattern_size + target_size)
        .filter(|t| !matched_targets.contains(t))
        .collect();
    let mut seen = vec![false; pattern_size + target_size];

    while let Some(v) = pending.pop() {
        if seen[v] {
            continue;
        }
        seen[v] = true;
        for w in oriented.neighbors(oriented_nodes[v]) {
            let w = w.index();
            if w >= pattern_size {
                unused.remove(&(v, w - pattern_size));
            } else {
                unused.remove(&(w, v - pattern_size));
            }
            pending.push(w);
        }
    }

    // edges inside a strongly connected component swap along a cycle
    let components = tarjan_scc(&oriented);
    let mut component_of = vec![0usize; pattern_size + target_size];
    for (id, component) in components.iter().enumerate() {
        for node in component {
            component_of[node.index()] = id;
        }
    }
    unused.retain(|&(i, j)| component_of[i] != component_of[pattern_size + j]);

    for (i, j) in unused {
        if mate[i] != Some(pattern_size + j) {
            domains[i].values.unset(j);
        }
    }

    true
}

/// Helper for tests: a domain over `target_size` values.
#[cfg(test)]
fn domain<const W: usize>(v: usize, pattern_size: usize, target_size: usize, values: &[usize]) -> Domain<W> {
    let mut d = Domain {
        v,
        popcount: 0,
        values: FixedBitSet::new(target_size),
        conflicts: FixedBitSet::new(pattern_size),
    };
    for &j in values {
        d.values.set(j);
    }
    d.popcount = d.values.popcount();
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaturable_domains_fail() {
        // three pattern vertices squeezed into two values
        let mut domains: Vec<Domain<1>> = vec![
            domain(0, 3, 4, &[0, 1]),
            domain(1, 3, 4, &[0, 1]),
            domain(2, 3, 4, &[0, 1]),
        ];
        assert!(!regin_all_different(&mut domains, 3, 4));
    }

    #[test]
    fn forced_values_prune_their_rivals() {
        // 0 must take value 0, so 1 loses it
        let mut domains: Vec<Domain<1>> = vec![
            domain(0, 2, 3, &[0]),
            domain(1, 2, 3, &[0, 1]),
        ];
        assert!(regin_all_different(&mut domains, 2, 3));
        assert!(!domains[1].values.test(0));
        assert!(domains[1].values.test(1));
    }

    #[test]
    fn wide_open_domains_are_left_alone() {
        let mut domains: Vec<Domain<1>> = vec![
            domain(0, 2, 4, &[0, 1, 2, 3]),
            domain(1, 2, 4, &[0, 1, 2, 3]),
        ];
        assert!(regin_all_different(&mut domains, 2, 4));
        assert_eq!(domains[0].values.popcount(), 4);
    }

    #[test]
    fn alternating_structure_keeps_exchangeable_values() {
        // 0 and 1 share {0,1} in a perfect exchange; nothing should be cut
        let mut domains: Vec<Domain<1>> = vec![
            domain(0, 3, 3, &[0, 1]),
            domain(1, 3, 3, &[0, 1]),
            domain(2, 3, 3, &[2]),
        ];
        assert!(regin_all_different(&mut domains, 3, 3));
        assert_eq!(domains[0].values.popcount(), 2);
        assert_eq!(domains[1].values.popcount(), 2);
    }
}
