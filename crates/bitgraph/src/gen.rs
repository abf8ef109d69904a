use nanorand::{Rng, WyRand};

use crate::graph::Graph;

/// An Erdős–Rényi `G(n, p)` graph with a fixed seed, so fixtures are
/// reproducible across runs and platforms.
pub fn gnp(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = WyRand::new_seed(seed);
    let mut graph = Graph::new(n);
    // strict threshold keeps p = 0 edgeless and p = 1 complete
    let threshold = p * (u32::MAX as f64 + 1.0);
    for u in 0..n {
        for v in (u + 1)..n {
            if (rng.generate::<u32>() as f64) < threshold {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_per_seed() {
        let a = gnp(30, 0.4, 42);
        let b = gnp(30, 0.4, 42);
        for u in 0..30 {
            for v in 0..30 {
                assert_eq!(a.adjacent(u, v), b.adjacent(u, v));
            }
        }
    }

    #[test]
    fn extreme_probabilities() {
        let empty = gnp(10, 0.0, 1);
        assert_eq!(empty.edge_count(), 0);
        let complete = gnp(10, 1.0, 1);
        assert_eq!(complete.edge_count(), 45);
    }
}
