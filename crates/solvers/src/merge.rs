use std::collections::BTreeSet;

use bitgraph::prelude::*;

/// Tries to grow a clique out of two incumbents.
///
/// If `a ∪ b` is a clique, every vertex adjacent to all of it is a candidate
/// extension; candidates are added greedily, higher degree first. If the
/// union is not a clique, the larger input wins unchanged.
pub fn merge_cliques(graph: &Graph, a: &BTreeSet<usize>, b: &BTreeSet<usize>) -> BTreeSet<usize> {
    let mut merged: BTreeSet<usize> = a.union(b).copied().collect();

    let union_is_clique = merged
        .iter()
        .all(|&u| merged.iter().all(|&v| u == v || graph.adjacent(u, v)));
    if !union_is_clique {
        return if b.len() > a.len() { b.clone() } else { a.clone() };
    }

    let mut candidates: Vec<usize> = (0..graph.size())
        .filter(|v| !merged.contains(v))
        .filter(|&v| merged.iter().all(|&u| graph.adjacent(u, v)))
        .collect();
    candidates.sort_by_key(|&v| std::cmp::Reverse(graph.degree(v)));

    for v in candidates {
        if merged.iter().all(|&u| graph.adjacent(u, v)) {
            merged.insert(v);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(vs: &[usize]) -> BTreeSet<usize> {
        vs.iter().copied().collect()
    }

    #[test]
    fn compatible_cliques_merge_and_extend() {
        // K4 on {0,1,2,3}
        let graph = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let merged = merge_cliques(&graph, &set(&[0, 1]), &set(&[2]));
        assert_eq!(merged, set(&[0, 1, 2, 3]));
    }

    #[test]
    fn incompatible_union_falls_back_to_larger() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (3, 4)]);
        let merged = merge_cliques(&graph, &set(&[0, 1]), &set(&[3, 4]));
        assert_eq!(merged.len(), 2);

        let merged = merge_cliques(&graph, &set(&[1]), &set(&[3, 4]));
        assert_eq!(merged, set(&[3, 4]));
    }

    #[test]
    fn result_never_shrinks_below_inputs() {
        let graph = gnp(20, 0.5, 11);
        let a = set(&[0]);
        let merged = merge_cliques(&graph, &a, &a);
        assert!(merged.len() >= 1);
        assert!(is_clique(
            &graph,
            &merged.iter().copied().collect::<Vec<_>>()
        ));
    }
}
