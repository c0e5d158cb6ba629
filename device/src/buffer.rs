use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};

use snafu::ensure;

use crate::allocator::{Allocator, RawBuffer};
use crate::error::{InvalidViewSnafu, Result, SizeMismatchSnafu};
use crate::handle::BufferHandle;

/// Shared buffer data that can be referenced by multiple views.
#[derive(Debug)]
struct BufferData {
    /// Lazily-initialized raw buffer (lock-free after first allocation).
    raw: OnceLock<RawBuffer>,
    allocator: Arc<dyn Allocator>,
    /// Total length of the underlying allocation in elements.
    total_len: usize,
}

impl BufferData {
    fn new(allocator: Arc<dyn Allocator>, len: usize) -> Self {
        Self { raw: OnceLock::new(), allocator, total_len: len }
    }

    /// Ensure the buffer is allocated, allocating if necessary.
    fn ensure_allocated(&self) -> Result<()> {
        if self.raw.get().is_some() {
            return Ok(());
        }

        let raw = self.allocator.alloc(self.total_len)?;

        // If another thread beat us, return this allocation to the allocator
        if let Err(raw) = self.raw.set(raw) {
            self.allocator.free(raw);
        }

        Ok(())
    }

    fn is_allocated(&self) -> bool {
        self.raw.get().is_some()
    }

    /// Get raw buffer reference (buffer must be allocated).
    fn raw(&self) -> &RawBuffer {
        self.raw.get().expect("buffer not allocated")
    }
}

impl Drop for BufferData {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.allocator.free(raw);
        }
    }
}

/// A host buffer of `f64` elements that may be a view into another buffer.
///
/// Buffers are owned entirely by the host; kernels reference them only
/// through the integer [`BufferHandle`] handed out at the interop boundary
/// and never allocate or free.
///
/// This type is `!Send + !Sync`; concurrent access during a dispatch goes
/// through raw pointers whose exclusivity the host guarantees.
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Shared data for the base allocation.
    data: Rc<BufferData>,
    /// Offset into the base buffer (in elements).
    offset: usize,
    /// Length of this view (in elements).
    len: usize,
    /// Marker to make Buffer `!Send + !Sync`.
    _not_send_sync: PhantomData<Rc<()>>,
}

impl Buffer {
    /// Create a new buffer with lazy allocation.
    pub fn new(allocator: Arc<dyn Allocator>, len: usize) -> Self {
        Self { data: Rc::new(BufferData::new(allocator, len)), offset: 0, len, _not_send_sync: PhantomData }
    }

    /// Create a new buffer with immediate allocation.
    pub fn allocate(allocator: Arc<dyn Allocator>, len: usize) -> Result<Self> {
        let buffer = Self::new(allocator, len);
        buffer.ensure_allocated()?;
        Ok(buffer)
    }

    /// Create a view into this buffer.
    pub fn view(&self, offset: usize, len: usize) -> Result<Self> {
        if offset + len > self.len {
            return InvalidViewSnafu { offset, len, buffer_len: self.len }.fail();
        }

        Ok(Self { data: Rc::clone(&self.data), offset: self.offset + offset, len, _not_send_sync: PhantomData })
    }

    /// Ensure the underlying buffer is allocated.
    pub fn ensure_allocated(&self) -> Result<()> {
        self.data.ensure_allocated()
    }

    /// Check if the buffer is allocated.
    pub fn is_allocated(&self) -> bool {
        self.data.is_allocated()
    }

    /// Length of this buffer view in elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of this view in elements.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the allocator used by this buffer.
    pub fn allocator(&self) -> &dyn Allocator {
        &*self.data.allocator
    }

    /// Copy values from a host array into this buffer.
    pub fn copyin(&mut self, src: &[f64]) -> Result<()> {
        self.ensure_allocated()?;
        ensure!(src.len() == self.len, SizeMismatchSnafu { expected: self.len, actual: src.len() });

        match self.data.raw() {
            RawBuffer::Cpu { data } => {
                let mut data_mut = data.borrow_mut();
                data_mut[self.offset..self.offset + self.len].copy_from_slice(src);
                Ok(())
            }
        }
    }

    /// Copy values from this buffer into a host array.
    pub fn copyout(&self, dst: &mut [f64]) -> Result<()> {
        self.ensure_allocated()?;
        ensure!(dst.len() == self.len, SizeMismatchSnafu { expected: self.len, actual: dst.len() });

        match self.data.raw() {
            RawBuffer::Cpu { data } => {
                let data_ref = data.borrow();
                dst.copy_from_slice(&data_ref[self.offset..self.offset + self.len]);
                Ok(())
            }
        }
    }

    /// Get the raw pointer to the first element of this view.
    ///
    /// This is the interop boundary: the pointer bypasses the `RefCell`
    /// borrow discipline entirely.
    ///
    /// # Safety
    ///
    /// The buffer must be allocated (panics otherwise). The caller must
    /// guarantee the buffer outlives every use of the pointer and that no
    /// `copyin`/`copyout` overlaps a concurrent raw access.
    pub unsafe fn as_raw_ptr(&self) -> *mut f64 {
        match self.data.raw() {
            RawBuffer::Cpu { data } => {
                let ptr = data.borrow_mut().as_mut_ptr();
                // SAFETY: the view range was validated on construction
                unsafe { ptr.add(self.offset) }
            }
        }
    }

    /// Get the opaque integer handle addressing this view.
    ///
    /// # Safety
    ///
    /// Same contract as [`Buffer::as_raw_ptr`]: the handle is only valid
    /// while the buffer is alive and allocated.
    pub unsafe fn handle(&self) -> BufferHandle {
        // SAFETY: forwarded from the caller
        BufferHandle::from_ptr(unsafe { self.as_raw_ptr() })
    }
}
