use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bitgraph::prelude::*;

pub mod cc;
pub mod ccd;
pub mod cover;
pub mod naive;

pub use cc::cc_max_biclique;
pub use ccd::ccd_max_biclique;
pub use naive::naive_max_biclique;

/// Called on every incumbent improvement with the new side size.
pub type BicliqueIncumbentCallback = Arc<dyn Fn(u32) + Send + Sync>;

/// Whether to break the A↔B relabelling symmetry.
///
/// `Remove` drops the branching vertex from the B side after its not-take
/// step while the B side is still empty, so a biclique is only generated with
/// its lexicographically first orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BicliqueSymmetryRemoval {
    None,
    Remove,
}

pub struct MaxBicliqueParams {
    pub initial_bound: u32,
    pub stop_after_finding: u32,
    pub symmetry: BicliqueSymmetryRemoval,
    pub ordering: VertexOrdering,
    pub abort: Arc<AtomicBool>,
    pub start_time: Instant,
    pub on_incumbent: Option<BicliqueIncumbentCallback>,
}

impl Default for MaxBicliqueParams {
    fn default() -> Self {
        Self {
            initial_bound: 0,
            stop_after_finding: u32::MAX,
            symmetry: BicliqueSymmetryRemoval::None,
            ordering: VertexOrdering::Degree,
            abort: Arc::new(AtomicBool::new(false)),
            start_time: Instant::now(),
            on_incumbent: None,
        }
    }
}

#[derive(Clone, Default)]
pub struct MaxBicliqueResult {
    /// Size of each side of the best biclique found.
    pub size: u32,
    /// The two sides, as original vertex ids.
    pub members_a: BTreeSet<usize>,
    pub members_b: BTreeSet<usize>,
    pub nodes: u64,
    pub times: Vec<Duration>,
    pub aborted: bool,
}
