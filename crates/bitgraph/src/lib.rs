//! A building block for exact branch-and-bound graph solvers.
//!
//! The search kernels in the companion `graph_solvers` crate spend almost all
//! of their time intersecting candidate sets with adjacency rows. This crate
//! provides the substrate that makes those operations cheap: a fixed-capacity
//! bitset whose word count is a compile-time parameter, a dense bit-encoded
//! adjacency matrix built on top of it, and a dispatcher that picks the
//! smallest capacity for a given instance so that every hot-path loop runs
//! over a constant number of words.
//!
//! A plain [`Graph`] type carries the instance between the file readers and
//! the solvers. It is deliberately simple: a dense symmetric adjacency with
//! optional vertex names, built once and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use bitgraph::prelude::*;
//!
//! let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
//!
//! assert_eq!(graph.size(), 4);
//! assert!(graph.adjacent(1, 2));
//! assert_eq!(graph.degree(1), 2);
//! ```

pub mod bitset;
pub mod dispatch;
pub mod gen;
pub mod graph;
pub mod input;
pub mod order;
pub mod prelude;
pub mod transform;

pub use crate::bitset::{FixedBitSet, VertexArray, BITS_PER_WORD};
pub use crate::dispatch::{dispatch_graph_size, SizedRun, MAX_GRAPH_WORDS};
pub use crate::graph::{FixedBitGraph, Graph};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error while reading graph")]
    IoError {
        #[from]
        source: std::io::Error,
    },
    #[error("{file}: invalid DIMACS input: {message}")]
    InvalidDimacs { file: String, message: String },
    #[error("{file}: invalid LAD input: {message}")]
    InvalidLad { file: String, message: String },
    #[error("graph with {size} vertices exceeds the largest supported capacity")]
    GraphTooBig { size: usize },
}
