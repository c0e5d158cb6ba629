use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Mutex;

use snafu::OptionExt;

use crate::error::{AllocationFailedSnafu, Result};

/// Opaque handle to a host-owned block of native memory.
///
/// Uses `RefCell` for interior mutability with runtime borrow checking.
/// Safe for single-threaded use (Buffer is !Send + !Sync); during a dispatch
/// the raw pointer is handed out instead and the borrow discipline is the
/// dispatcher's obligation.
#[derive(Debug)]
pub enum RawBuffer {
    Cpu { data: RefCell<Box<[f64]>> },
}

impl RawBuffer {
    /// Length of the underlying allocation in elements.
    pub fn len(&self) -> usize {
        match self {
            RawBuffer::Cpu { data } => data.borrow().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait Allocator: Send + Sync + std::fmt::Debug {
    fn alloc(&self, len: usize) -> Result<RawBuffer>;
    fn free(&self, _buffer: RawBuffer) {}
    fn name(&self) -> &str;
}

/// CPU allocator using zero-initialized system memory.
#[derive(Debug, Clone)]
pub struct CpuAllocator;

impl Allocator for CpuAllocator {
    fn alloc(&self, len: usize) -> Result<RawBuffer> {
        let mut data = Vec::new();
        data.try_reserve_exact(len).ok().context(AllocationFailedSnafu { len })?;
        data.resize(len, 0.0);
        Ok(RawBuffer::Cpu { data: RefCell::new(data.into_boxed_slice()) })
    }

    fn name(&self) -> &str {
        "CPU"
    }
}

/// Allocator that caches freed buffers by length for reuse.
///
/// Hosts allocate and free buffers around sequences of dispatches, so
/// same-sized allocations repeat. Recycled blocks are re-zeroed to keep the
/// zero-initialization contract of the inner allocator.
#[derive(Debug)]
pub struct PoolAllocator {
    inner: Box<dyn Allocator>,
    cache: Mutex<HashMap<usize, Vec<RawBuffer>>>,
    max_buffers_per_len: usize,
    name: String,
}

impl PoolAllocator {
    pub fn new(inner: Box<dyn Allocator>) -> Self {
        Self::with_capacity(inner, 32)
    }

    pub fn with_capacity(inner: Box<dyn Allocator>, max_buffers_per_len: usize) -> Self {
        let name = inner.name().to_string();
        Self { inner, cache: Mutex::new(HashMap::new()), max_buffers_per_len, name }
    }

    /// Number of cached buffers of the given length (for testing reuse).
    pub fn cached(&self, len: usize) -> usize {
        self.cache.lock().unwrap().get(&len).map_or(0, Vec::len)
    }
}

impl Allocator for PoolAllocator {
    fn alloc(&self, len: usize) -> Result<RawBuffer> {
        // Try cache first
        {
            let mut cache = self.cache.lock().unwrap();
            if let Some(buffers) = cache.get_mut(&len)
                && let Some(buffer) = buffers.pop()
            {
                if buffers.is_empty() {
                    cache.remove(&len);
                }
                match &buffer {
                    RawBuffer::Cpu { data } => data.borrow_mut().fill(0.0),
                }
                return Ok(buffer);
            }
        } // Drop lock before the allocation

        // Cache miss - allocate from inner
        match self.inner.alloc(len) {
            Ok(buffer) => Ok(buffer),
            Err(e) => {
                // On allocation failure, drain the cache and retry once
                self.cache.lock().unwrap().clear();
                self.inner.alloc(len).map_err(|_| e)
            }
        }
    }

    fn free(&self, buffer: RawBuffer) {
        let mut cache = self.cache.lock().unwrap();
        let buffers = cache.entry(buffer.len()).or_default();
        if buffers.len() < self.max_buffers_per_len {
            buffers.push(buffer);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
