use std::collections::VecDeque;

use crate::graph::Graph;

/// The complement graph: `(u, v)` is an edge iff `u != v` and it is not an
/// edge of the input. Vertex names carry over.
pub fn complement(graph: &Graph) -> Graph {
    let n = graph.size();
    let mut result = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if !graph.adjacent(u, v) {
                result.add_edge(u, v);
            }
        }
    }
    result.set_vertex_names((0..n).map(|v| graph.vertex_name(v)).collect());
    result
}

/// The `k`-th power: `(u, v)` is an edge iff their distance in the input is
/// between 1 and `k`. Solving max clique on the power graph solves
/// max `k`-clique on the input.
pub fn power(graph: &Graph, k: u32) -> Graph {
    let n = graph.size();
    let mut result = Graph::new(n);
    let mut distance = vec![u32::MAX; n];
    let mut queue = VecDeque::new();

    for start in 0..n {
        distance.iter_mut().for_each(|d| *d = u32::MAX);
        distance[start] = 0;
        queue.clear();
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            if distance[u] == k {
                break;
            }
            for v in graph.neighbours(u) {
                if distance[v] == u32::MAX {
                    distance[v] = distance[u] + 1;
                    result.add_edge(start, v);
                    queue.push_back(v);
                }
            }
        }
    }

    result.set_vertex_names((0..n).map(|v| graph.vertex_name(v)).collect());
    result
}

/// Whether `members` are pairwise adjacent.
pub fn is_clique(graph: &Graph, members: &[usize]) -> bool {
    members
        .iter()
        .enumerate()
        .all(|(i, &u)| members[i + 1..].iter().all(|&v| graph.adjacent(u, v)))
}

/// Whether `(a, b)` is a biclique with independent sides: the sides are
/// disjoint, every cross pair is adjacent, and no side has an internal edge.
pub fn is_biclique(graph: &Graph, a: &[usize], b: &[usize]) -> bool {
    if a.iter().any(|u| b.contains(u)) {
        return false;
    }
    let cross = a.iter().all(|&u| b.iter().all(|&v| graph.adjacent(u, v)));
    let independent = |side: &[usize]| {
        side.iter()
            .enumerate()
            .all(|(i, &u)| side[i + 1..].iter().all(|&v| !graph.adjacent(u, v)))
    };
    cross && independent(a) && independent(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_is_an_involution() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (3, 4), (0, 4)]);
        let back = complement(&complement(&graph));
        for u in 0..5 {
            for v in 0..5 {
                assert_eq!(graph.adjacent(u, v), back.adjacent(u, v));
            }
        }
    }

    #[test]
    fn power_one_is_identity() {
        let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3)]);
        let p1 = power(&graph, 1);
        for u in 0..5 {
            for v in 0..5 {
                assert_eq!(graph.adjacent(u, v), p1.adjacent(u, v));
            }
        }
    }

    #[test]
    fn square_of_a_path_joins_distance_two() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let p2 = power(&graph, 2);
        assert!(p2.adjacent(0, 2));
        assert!(p2.adjacent(1, 3));
        assert!(!p2.adjacent(0, 3));
        assert!(!p2.adjacent(0, 0));
    }

    #[test]
    fn clique_and_biclique_checks() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
        assert!(is_clique(&graph, &[0, 1, 2]));
        assert!(!is_clique(&graph, &[0, 1, 3]));
        assert!(is_clique(&graph, &[]));

        let k22 = Graph::from_edges(4, &[(0, 2), (0, 3), (1, 2), (1, 3)]);
        assert!(is_biclique(&k22, &[0, 1], &[2, 3]));
        assert!(!is_biclique(&k22, &[0, 2], &[1, 3]));
    }
}
