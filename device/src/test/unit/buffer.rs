use std::sync::Arc;

use crate::{Buffer, CpuAllocator, Error};

fn allocator() -> Arc<CpuAllocator> {
    Arc::new(CpuAllocator)
}

#[test]
fn test_lazy_allocation() {
    let buffer = Buffer::new(allocator(), 10);

    assert!(!buffer.is_allocated());
    buffer.ensure_allocated().unwrap();
    assert!(buffer.is_allocated());
}

#[test]
fn test_zero_initialized() {
    let buffer = Buffer::allocate(allocator(), 8).unwrap();

    let mut out = vec![1.0; 8];
    buffer.copyout(&mut out).unwrap();
    assert_eq!(out, vec![0.0; 8]);
}

#[test]
fn test_copyin_copyout_roundtrip() {
    let mut buffer = Buffer::allocate(allocator(), 5).unwrap();

    let values = [1.0, -2.5, 3.25, 0.0, 7.5];
    buffer.copyin(&values).unwrap();

    let mut out = [0.0; 5];
    buffer.copyout(&mut out).unwrap();
    assert_eq!(out, values);
}

#[test]
fn test_copyin_size_mismatch() {
    let mut buffer = Buffer::allocate(allocator(), 5).unwrap();

    let result = buffer.copyin(&[1.0, 2.0]);
    assert!(matches!(result, Err(Error::SizeMismatch { expected: 5, actual: 2 })));
}

#[test]
fn test_buffer_view() {
    let mut buffer = Buffer::allocate(allocator(), 10).unwrap();
    buffer.copyin(&(0..10).map(f64::from).collect::<Vec<_>>()).unwrap();

    let view = buffer.view(4, 3).unwrap();
    assert_eq!(view.offset(), 4);
    assert_eq!(view.len(), 3);

    let mut out = [0.0; 3];
    view.copyout(&mut out).unwrap();
    assert_eq!(out, [4.0, 5.0, 6.0]);
}

#[test]
fn test_invalid_view() {
    let buffer = Buffer::allocate(allocator(), 10).unwrap();

    // View exceeding the buffer length is rejected
    let result = buffer.view(8, 4);
    assert!(matches!(result, Err(Error::InvalidView { .. })));
}

#[test]
fn test_view_writes_through() {
    let buffer = Buffer::allocate(allocator(), 10).unwrap();

    let mut view = buffer.view(2, 2).unwrap();
    view.copyin(&[5.0, 6.0]).unwrap();

    let mut out = vec![0.0; 10];
    buffer.copyout(&mut out).unwrap();
    assert_eq!(out[2], 5.0);
    assert_eq!(out[3], 6.0);
    assert_eq!(out[0], 0.0);
}

#[test]
fn test_empty_buffer() {
    let mut buffer = Buffer::allocate(allocator(), 0).unwrap();

    assert!(buffer.is_empty());
    buffer.copyin(&[]).unwrap();
    buffer.copyout(&mut []).unwrap();
}

#[test]
fn test_handle_addresses_view_start() {
    let mut buffer = Buffer::allocate(allocator(), 10).unwrap();
    buffer.copyin(&(0..10).map(f64::from).collect::<Vec<_>>()).unwrap();

    let view = buffer.view(3, 5).unwrap();

    // SAFETY: buffer is allocated and outlives the handle uses below
    let (base, shifted) = unsafe { (buffer.handle(), view.handle()) };
    assert_eq!(shifted.addr(), base.addr() + 3 * std::mem::size_of::<f64>());

    let values = unsafe { shifted.read_region(0, 5) };
    assert_eq!(values, [3.0, 4.0, 5.0, 6.0, 7.0]);
}
