//! The calling contract shared by every generated kernel.

use crate::args::ArgSet;
use crate::work::LaneSpan;

/// Opaque execution-context handle.
///
/// Represents the device/queue a dispatch runs against. Kernel formulas
/// never inspect it; it exists to keep the calling convention uniform across
/// kernels that might need queue-specific behavior in a fuller system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExecContext(u64);

impl ExecContext {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// An elementwise kernel formula in the shared calling contract.
///
/// One `apply` call is one lane's share of a dispatch: the kernel loops the
/// lane's strided indices and writes pure functions of the loop variable
/// (and, for reductions, buffer contents) into addressed buffers. Kernels
/// hold no state between dispatches; for a fixed argument set and lane span,
/// execution is deterministic.
pub trait Kernel: Send + Sync {
    /// Kernel name for registry lookup and tracing.
    fn name(&self) -> &str;

    /// Execute one lane.
    ///
    /// In-place buffer mutation is the only observable effect; there is no
    /// return value and no runtime-checked failure mode.
    ///
    /// # Safety
    ///
    /// Every descriptor in `args` must address a live allocation with
    /// `offset + size - 1` inside its true extent, and write sets of lanes
    /// running concurrently must be disjoint (or idempotent). Violations are
    /// undefined behavior, not recoverable errors.
    unsafe fn apply(&self, ctx: ExecContext, args: &ArgSet, span: LaneSpan);
}

/// A kernel defined by a closure.
///
/// Lets hosts register interpreted formulas next to the built-in ones
/// without a dedicated type per formula.
pub struct FnKernel<F> {
    name: String,
    body: F,
}

impl<F> FnKernel<F>
where
    F: Fn(ExecContext, &ArgSet, LaneSpan) + Send + Sync,
{
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self { name: name.into(), body }
    }
}

impl<F> Kernel for FnKernel<F>
where
    F: Fn(ExecContext, &ArgSet, LaneSpan) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn apply(&self, ctx: ExecContext, args: &ArgSet, span: LaneSpan) {
        (self.body)(ctx, args, span)
    }
}

impl<F> std::fmt::Debug for FnKernel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnKernel").field("name", &self.name).finish()
    }
}
