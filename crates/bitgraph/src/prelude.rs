pub use crate::bitset::{FixedBitSet, VertexArray, BITS_PER_WORD};
pub use crate::dispatch::{dispatch_graph_size, SizedRun, MAX_GRAPH_WORDS};
pub use crate::gen::gnp;
pub use crate::graph::{FixedBitGraph, Graph};
pub use crate::input::{read_dimacs, read_graph, read_lad, GraphFormat};
pub use crate::order::VertexOrdering;
pub use crate::transform::{complement, is_biclique, is_clique, power};
pub use crate::Error;
