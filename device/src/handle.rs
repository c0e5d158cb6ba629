//! Opaque integer buffer handles and the marshaling primitives.
//!
//! A [`BufferHandle`] is the raw address of a buffer's first element, carried
//! as a plain integer so it can cross the kernel calling convention (and
//! thread boundaries) freely. The only operations it exposes are region reads
//! and region writes; everything else about the buffer stays on the host side.
//!
//! Nothing in this module validates anything: offsets and lengths outside the
//! true extent of the addressed allocation are undefined behavior by the
//! caller's contract, never a reported error.

/// Raw-address buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle {
    addr: usize,
}

impl BufferHandle {
    /// Wrap a raw element pointer. Recording the address is safe;
    /// every dereference through the handle is not.
    pub fn from_ptr(ptr: *mut f64) -> Self {
        Self { addr: ptr as usize }
    }

    /// Reconstruct a handle from an integer address.
    pub fn from_addr(addr: usize) -> Self {
        Self { addr }
    }

    /// The raw address as an integer.
    pub fn addr(self) -> usize {
        self.addr
    }

    /// The raw element pointer.
    ///
    /// # Safety
    ///
    /// The handle must address a live allocation; the pointer is only valid
    /// for the extent the host guarantees.
    pub unsafe fn as_ptr(self) -> *mut f64 {
        self.addr as *mut f64
    }

    /// Copy `len` elements starting at `offset` into a freshly allocated
    /// host array. Pure: the source is never mutated. Ownership of the
    /// returned array transfers to the caller.
    ///
    /// `len == 0` returns an empty array without touching the buffer.
    ///
    /// # Safety
    ///
    /// `[offset, offset + len)` must lie within the addressed allocation,
    /// and no concurrent write may overlap the range.
    pub unsafe fn read_region(self, offset: usize, len: usize) -> Vec<f64> {
        let mut out = vec![0.0; len];
        if len > 0 {
            // SAFETY: caller guarantees the source range is in bounds;
            // `out` is a fresh allocation, so the ranges cannot overlap.
            unsafe { std::ptr::copy_nonoverlapping(self.as_ptr().add(offset), out.as_mut_ptr(), len) };
        }
        out
    }

    /// Copy `len` elements from `src[src_offset..]` into the buffer at
    /// `offset`. Mutates only the destination; the source is read-only.
    ///
    /// `len == 0` is a no-op.
    ///
    /// # Safety
    ///
    /// `[offset, offset + len)` must lie within the addressed allocation,
    /// and no concurrent access may overlap the range.
    pub unsafe fn write_region(self, offset: usize, src: &[f64], src_offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        debug_assert!(src_offset + len <= src.len());
        // SAFETY: caller guarantees the destination range is in bounds;
        // the destination is never inside `src`.
        unsafe { std::ptr::copy_nonoverlapping(src.as_ptr().add(src_offset), self.as_ptr().add(offset), len) };
    }
}
