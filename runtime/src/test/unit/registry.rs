use std::sync::Arc;

use crate::test::helpers::{buffer, run_single_output};
use crate::{ArgSet, Dispatcher, Error, ExecContext, FnKernel, KernelRegistry, registry};

#[test]
fn test_builtins_registered() {
    for name in ["eye8", "ramp20", "fill_pair", "square_pair"] {
        assert!(registry().contains(name), "missing builtin: {name}");
    }
}

#[test]
fn test_unknown_kernel() {
    let result = registry().get("no_such_kernel");
    assert!(matches!(result, Err(Error::KernelNotFound { .. })));
}

#[test]
fn test_register_and_get() {
    let local = KernelRegistry::new();
    assert!(!local.contains("negate"));

    local.register(Arc::new(FnKernel::new("negate", |_ctx, args, span| {
        let out = args.arg(0);
        for gid in span.indices() {
            unsafe { out.write(gid, -(gid as f64)) };
        }
    })));

    let kernel = local.get("negate").unwrap();
    assert_eq!(kernel.name(), "negate");

    let contents = run_single_output(kernel.as_ref(), 4, 2, 4);
    assert_eq!(contents, [0.0, -1.0, -2.0, -3.0]);
}

#[test]
fn test_names_lists_registered_kernels() {
    let local = KernelRegistry::with_builtins();
    let mut names = local.names();
    names.sort();
    assert_eq!(names, ["eye8", "fill_pair", "ramp20", "square_pair"]);
}

#[test]
fn test_dispatch_by_name() {
    let out = buffer(40);
    let mut args = ArgSet::new();
    // SAFETY: `out` outlives the dispatch
    unsafe { args.push_buffer(&out, 0, 40, 0).unwrap() };

    let dispatcher = Dispatcher::default();
    // SAFETY: descriptor addresses a live, correctly sized buffer
    unsafe { dispatcher.dispatch_by_name(ExecContext::default(), "ramp20", &args, 40).unwrap() };

    let mut contents = vec![0.0; 40];
    out.copyout(&mut contents).unwrap();
    assert_eq!(contents[0], -10.0);
    assert_eq!(contents[20], 10.0);
}

#[test]
fn test_dispatch_by_unknown_name() {
    let dispatcher = Dispatcher::default();
    let args = ArgSet::new();
    let result = unsafe { dispatcher.dispatch_by_name(ExecContext::default(), "missing", &args, 1) };
    assert!(matches!(result, Err(Error::KernelNotFound { .. })));
}
