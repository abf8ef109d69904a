//! The work-stealing machinery shared by the threaded solvers: bounded work
//! queues stratified by depth, per-thread steal points over a small prefix of
//! the search tree, a CAS-updated incumbent, and the worker loop that ties
//! them together.

pub mod driver;
pub mod incumbent;
pub mod queue;
pub mod steal;

pub use driver::{run_work_stealing, Subproblem};
pub use incumbent::{pack_labelled, unpack_labelled, AtomicIncumbent};
pub use queue::Queue;
pub use steal::{StealPoint, StealPoints};
