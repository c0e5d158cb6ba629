//! Lane-parallel execution of elementwise kernels.
//!
//! Every kernel, whatever its formula, is invoked through one calling
//! contract: an [`ArgSet`] of buffer handles with per-argument addressing
//! metadata, an opaque [`ExecContext`], and a [`LaneSpan`] describing the
//! strided subset of the dispatch's index space the invocation must cover.
//! The [`Dispatcher`] partitions a work-item space across a fixed number of
//! concurrent lanes; buffer staging around dispatches lives in
//! [`ewise_device`].
//!
//! # Example
//!
//! ```ignore
//! let buffer = Buffer::allocate(Arc::new(CpuAllocator), 64)?;
//! let mut args = ArgSet::new();
//! unsafe { args.push_buffer(&buffer, 0, 64, 8)? };
//!
//! let dispatcher = Dispatcher::default();
//! unsafe { dispatcher.dispatch_by_name(ExecContext::default(), "eye8", &args, 64)? };
//! ```

pub mod args;
pub mod dispatch;
pub mod error;
pub mod kernel;
pub mod kernels;
pub mod registry;
pub mod work;

#[cfg(test)]
mod test;

pub use args::{Arg, ArgSet};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use kernel::{ExecContext, FnKernel, Kernel};
pub use kernels::{Eye, FillPair, PeriodicRamp, SquarePair};
pub use registry::{KernelRegistry, registry};
pub use work::{DEFAULT_LANE_COUNT, LaneSpan, WorkItemSpace};
