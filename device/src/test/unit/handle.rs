use std::sync::Arc;

use crate::{Buffer, BufferHandle, CpuAllocator};

/// Allocate a buffer seeded with `0.0, 1.0, 2.0, ...` and return it with
/// its handle.
fn seeded(len: usize) -> (Buffer, BufferHandle) {
    let mut buffer = Buffer::allocate(Arc::new(CpuAllocator), len).unwrap();
    buffer.copyin(&(0..len).map(|i| i as f64).collect::<Vec<_>>()).unwrap();
    // SAFETY: buffer is allocated; callers keep it alive alongside the handle
    let handle = unsafe { buffer.handle() };
    (buffer, handle)
}

#[test]
fn test_read_region() {
    let (_buffer, handle) = seeded(10);

    let values = unsafe { handle.read_region(2, 4) };
    assert_eq!(values, [2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_read_region_is_pure() {
    let (buffer, handle) = seeded(6);

    let _ = unsafe { handle.read_region(0, 6) };

    let mut out = vec![0.0; 6];
    buffer.copyout(&mut out).unwrap();
    assert_eq!(out, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_read_returns_fresh_array_per_call() {
    let (_buffer, handle) = seeded(4);

    let mut first = unsafe { handle.read_region(0, 4) };
    let second = unsafe { handle.read_region(0, 4) };

    first[0] = 99.0;
    assert_eq!(second[0], 0.0);
}

#[test]
fn test_write_region() {
    let (buffer, handle) = seeded(8);

    let src = [10.0, 20.0, 30.0, 40.0];
    unsafe { handle.write_region(3, &src, 1, 3) };

    let mut out = vec![0.0; 8];
    buffer.copyout(&mut out).unwrap();
    assert_eq!(out, [0.0, 1.0, 2.0, 20.0, 30.0, 40.0, 6.0, 7.0]);
}

#[test]
fn test_roundtrip() {
    let (_buffer, handle) = seeded(12);

    let values = [5.5, -6.5, 7.5];
    unsafe { handle.write_region(4, &values, 0, 3) };
    assert_eq!(unsafe { handle.read_region(4, 3) }, values);
}

#[test]
fn test_read_then_write_back_is_noop() {
    // read(h, 3, 5) followed by write(h, 3, result, 0, 5) leaves the
    // buffer unchanged.
    let (buffer, handle) = seeded(10);

    let staged = unsafe { handle.read_region(3, 5) };
    unsafe { handle.write_region(3, &staged, 0, 5) };

    let mut out = vec![0.0; 10];
    buffer.copyout(&mut out).unwrap();
    assert_eq!(out, (0..10).map(|i| i as f64).collect::<Vec<_>>());
}

#[test]
fn test_zero_length_calls_are_noops() {
    let (buffer, handle) = seeded(4);

    let values = unsafe { handle.read_region(2, 0) };
    assert!(values.is_empty());

    unsafe { handle.write_region(2, &[], 0, 0) };

    let mut out = vec![0.0; 4];
    buffer.copyout(&mut out).unwrap();
    assert_eq!(out, [0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_handle_roundtrips_through_integer() {
    let (_buffer, handle) = seeded(4);

    let reconstructed = BufferHandle::from_addr(handle.addr());
    assert_eq!(unsafe { reconstructed.read_region(1, 2) }, [1.0, 2.0]);
}
