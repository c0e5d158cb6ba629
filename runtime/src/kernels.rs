//! Representative generated kernels.
//!
//! Each type here is one formula expressed in the shared calling contract;
//! the bodies are deliberately as small as the generated code they stand
//! for. Three shapes occur in practice:
//!
//! - *index-derived* ([`Eye`], [`PeriodicRamp`]): the written value is a pure
//!   function of the loop variable's residues and quotients under small
//!   constants, so identity patterns and periodic ramps are built without
//!   ever being stored.
//! - *constant-fill* ([`FillPair`]): fixed literals at fixed offsets,
//!   rewritten redundantly on every iteration of every lane. The write is
//!   idempotent, so the redundancy is harmless.
//! - *multi-output* ([`SquarePair`]): two related values per iteration into
//!   two arguments.

use crate::args::ArgSet;
use crate::kernel::{ExecContext, Kernel};
use crate::work::LaneSpan;

/// Identity pattern: `arg0[gid] = 1.0` where `gid / order == gid % order`,
/// else `0.0`. Over `order * order` elements this fills a flattened
/// identity matrix.
#[derive(Debug, Clone)]
pub struct Eye {
    name: String,
    order: u64,
}

impl Eye {
    pub fn new(order: u64) -> Self {
        debug_assert!(order > 0);
        Self { name: format!("eye{order}"), order }
    }
}

impl Kernel for Eye {
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn apply(&self, _ctx: ExecContext, args: &ArgSet, span: LaneSpan) {
        let out = args.arg(0);
        for gid in span.indices() {
            let value = if gid / self.order == gid % self.order { 1.0 } else { 0.0 };
            // SAFETY: forwarded from the caller
            unsafe { out.write(gid, value) };
        }
    }
}

/// Periodic ramp: `arg0[gid] = wrap(gid) - shift`, where `wrap(gid)` is
/// `period` at nonzero multiples of `period` and `gid % period` elsewhere.
#[derive(Debug, Clone)]
pub struct PeriodicRamp {
    name: String,
    period: u64,
    shift: f64,
}

impl PeriodicRamp {
    pub fn new(period: u64, shift: f64) -> Self {
        debug_assert!(period > 0);
        Self { name: format!("ramp{period}"), period, shift }
    }
}

impl Kernel for PeriodicRamp {
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn apply(&self, _ctx: ExecContext, args: &ArgSet, span: LaneSpan) {
        let out = args.arg(0);
        for gid in span.indices() {
            let residue = gid % self.period;
            let wrapped = if residue == 0 && gid != 0 { self.period } else { residue };
            // SAFETY: forwarded from the caller
            unsafe { out.write(gid, wrapped as f64 - self.shift) };
        }
    }
}

/// Constant fill: writes `first` at `arg0[0]` and `second` at `arg0[1]` on
/// every iteration, regardless of the loop variable. Idempotent, so the
/// repeated writes across lanes and iterations never race meaningfully.
#[derive(Debug, Clone, Copy)]
pub struct FillPair {
    first: f64,
    second: f64,
}

impl FillPair {
    pub fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }
}

impl Kernel for FillPair {
    fn name(&self) -> &str {
        "fill_pair"
    }

    unsafe fn apply(&self, _ctx: ExecContext, args: &ArgSet, span: LaneSpan) {
        let out = args.arg(0);
        for _gid in span.indices() {
            // SAFETY: forwarded from the caller
            unsafe {
                out.write(0, self.first);
                out.write(1, self.second);
            }
        }
    }
}

/// Multi-output: `arg0[gid] = gid` and `arg1[gid] = gid * gid` per
/// iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquarePair;

impl Kernel for SquarePair {
    fn name(&self) -> &str {
        "square_pair"
    }

    unsafe fn apply(&self, _ctx: ExecContext, args: &ArgSet, span: LaneSpan) {
        let ramp = args.arg(0);
        let squares = args.arg(1);
        for gid in span.indices() {
            let x = gid as f64;
            // SAFETY: forwarded from the caller
            unsafe {
                ramp.write(gid, x);
                squares.write(gid, x * x);
            }
        }
    }
}
