//! Host-owned native buffers for elementwise kernel dispatch.
//!
//! Buffers live entirely on the host: kernels receive raw-address handles,
//! never ownership. This crate provides the allocator seam, the `Buffer`
//! view type, and the marshaling primitives that stage values between
//! host arrays and native memory around dispatches.

pub mod allocator;
pub mod buffer;
pub mod error;
pub mod handle;

#[cfg(test)]
mod test;

pub use allocator::{Allocator, CpuAllocator, PoolAllocator, RawBuffer};
pub use buffer::Buffer;
pub use error::{Error, Result};
pub use handle::BufferHandle;
