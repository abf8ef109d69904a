use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bitgraph::prelude::*;

use crate::colour::CcoPermutations;
use crate::inference::CcoInference;

pub mod cco;
pub mod naive;
pub mod tcco;

pub use cco::cco_max_clique;
pub use naive::naive_max_clique;
pub use tcco::tcco_max_clique;

/// Invoked whenever the incumbent strictly improves, with the new size and
/// the branch-position trace that produced it. May be called from any worker
/// thread, out of search-tree order.
pub type IncumbentCallback = Arc<dyn Fn(u32, &[i32]) + Send + Sync>;

/// How candidate cliques found at leaves update the incumbent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CcoMerge {
    /// Accept a candidate iff it is strictly larger than the best.
    None,
    /// Try to merge the candidate with the previous incumbent first.
    Previous,
    /// Keep every incumbent ever found and try to merge the candidate with
    /// each of them.
    All,
}

/// Policy selection for a CCO run, fixed at construction.
#[derive(Copy, Clone, Debug)]
pub struct CcoConfig {
    pub permutations: CcoPermutations,
    pub inference: CcoInference,
    pub merge: CcoMerge,
}

impl Default for CcoConfig {
    fn default() -> Self {
        Self {
            permutations: CcoPermutations::None,
            inference: CcoInference::None,
            merge: CcoMerge::None,
        }
    }
}

pub struct MaxCliqueParams {
    /// Seed for the incumbent; only strictly larger cliques are recorded.
    pub initial_bound: u32,
    /// Return as soon as the incumbent reaches this size.
    pub stop_after_finding: u32,
    /// Count all maximum cliques instead of stopping at one.
    pub enumerate: bool,
    /// Worker count for the threaded algorithms.
    pub n_threads: usize,
    /// Number of search-tree depths eligible for work distribution.
    pub split_depth: usize,
    /// Initial static vertex order.
    pub ordering: VertexOrdering,
    /// Shared cancel flag, polled at every node.
    pub abort: Arc<AtomicBool>,
    /// When the solve began; incumbent times are relative to this.
    pub start_time: Instant,
    pub on_incumbent: Option<IncumbentCallback>,
}

impl Default for MaxCliqueParams {
    fn default() -> Self {
        Self {
            initial_bound: 0,
            stop_after_finding: u32::MAX,
            enumerate: false,
            n_threads: num_cpus::get(),
            split_depth: 5,
            ordering: VertexOrdering::Degree,
            abort: Arc::new(AtomicBool::new(false)),
            start_time: Instant::now(),
            on_incumbent: None,
        }
    }
}

#[derive(Clone, Default)]
pub struct MaxCliqueResult {
    /// Size of the best clique found.
    pub size: u32,
    /// Members of the best clique found, as original vertex ids.
    pub members: BTreeSet<usize>,
    /// Search-tree nodes processed.
    pub nodes: u64,
    /// Number of hits under `enumerate`.
    pub result_count: u64,
    /// The colour bound of the root colouring.
    pub initial_colour_bound: u32,
    /// Per-worker busy times; the caller prepends the wall-clock total.
    pub times: Vec<Duration>,
    /// When each incumbent improvement landed, relative to the start time.
    pub incumbent_times: Vec<Duration>,
    /// Whether the abort flag was observed.
    pub aborted: bool,
}

impl MaxCliqueResult {
    /// Folds a worker-local result into this one.
    pub fn merge(&mut self, other: MaxCliqueResult) {
        if other.size > self.size {
            self.size = other.size;
            self.members = other.members;
        }
        self.nodes += other.nodes;
        self.result_count += other.result_count;
        self.incumbent_times.extend(other.incumbent_times);
        self.aborted |= other.aborted;
    }
}
