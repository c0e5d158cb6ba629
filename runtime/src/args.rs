//! Argument descriptor sets consumed by every kernel.
//!
//! An [`ArgSet`] holds parallel sequences of buffer handles, offsets, sizes
//! and leading dimensions. The metadata sequences use `i32` to match the
//! calling convention; offsets and sizes are element counts, and the leading
//! dimension is stride metadata for multi-dimensional addressing that 1-D
//! kernels ignore.
//!
//! Descriptor sets are constructed fresh per dispatch and discarded
//! afterward. Nothing here is validated: an offset or size inconsistent with
//! the true extent of the addressed buffer is undefined behavior once a
//! kernel runs.

use ewise_device::{Buffer, BufferHandle};
use smallvec::SmallVec;
use snafu::ResultExt;

use crate::error::{DeviceSnafu, Result};

/// Parallel descriptor sequences for one dispatch.
///
/// `Send + Sync` because handles are plain integer addresses; exclusive
/// access to the addressed memory during a dispatch is the host's
/// obligation.
#[derive(Debug, Clone, Default)]
pub struct ArgSet {
    buffers: SmallVec<[BufferHandle; 4]>,
    offsets: SmallVec<[i32; 4]>,
    sizes: SmallVec<[i32; 4]>,
    leading_dims: SmallVec<[i32; 4]>,
}

impl ArgSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument descriptor.
    pub fn push(&mut self, handle: BufferHandle, offset: i32, size: i32, leading_dim: i32) -> &mut Self {
        self.buffers.push(handle);
        self.offsets.push(offset);
        self.sizes.push(size);
        self.leading_dims.push(leading_dim);
        self
    }

    /// Append a descriptor addressing `buffer`, allocating it if needed.
    ///
    /// # Safety
    ///
    /// The handle recorded here bypasses the buffer's lifetime: `buffer`
    /// must stay alive until every dispatch consuming this set completes.
    pub unsafe fn push_buffer(&mut self, buffer: &Buffer, offset: i32, size: i32, leading_dim: i32) -> Result<&mut Self> {
        buffer.ensure_allocated().context(DeviceSnafu)?;
        // SAFETY: forwarded from the caller
        let handle = unsafe { buffer.handle() };
        Ok(self.push(handle, offset, size, leading_dim))
    }

    /// Argument count of this set.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// One argument's descriptor tuple. Panics if out of range.
    pub fn arg(&self, index: usize) -> Arg {
        Arg {
            handle: self.buffers[index],
            offset: self.offsets[index],
            size: self.sizes[index],
            leading_dim: self.leading_dims[index],
        }
    }

    /// All descriptors in argument order.
    pub fn args(&self) -> impl Iterator<Item = Arg> + '_ {
        (0..self.len()).map(|index| self.arg(index))
    }
}

/// One argument: a buffer handle plus its addressing metadata.
///
/// Kernels extract their `Arg` aliases once at entry and address elements
/// relative to `offset` through [`Arg::read`] and [`Arg::write`].
#[derive(Debug, Clone, Copy)]
pub struct Arg {
    handle: BufferHandle,
    /// Element index where this logical argument begins inside its buffer.
    pub offset: i32,
    /// Element count visible to this view.
    pub size: i32,
    /// Stride for multi-dimensional addressing; ignorable for 1-D kernels.
    pub leading_dim: i32,
}

impl Arg {
    pub fn handle(self) -> BufferHandle {
        self.handle
    }

    /// Read `buffer[offset + index]`.
    ///
    /// # Safety
    ///
    /// `offset + index` must lie within the addressed allocation and no
    /// concurrent write may target it.
    pub unsafe fn read(self, index: u64) -> f64 {
        // SAFETY: forwarded from the caller
        unsafe { *self.handle.as_ptr().add(self.offset as usize + index as usize) }
    }

    /// Write `value` to `buffer[offset + index]`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Arg::read`]; additionally no other lane may write
    /// the same position during the dispatch unless the write is idempotent.
    pub unsafe fn write(self, index: u64, value: f64) {
        // SAFETY: forwarded from the caller
        unsafe { *self.handle.as_ptr().add(self.offset as usize + index as usize) = value };
    }
}
