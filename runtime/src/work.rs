//! Work-item space partitioning for lane-parallel dispatch.
//!
//! A dispatch covers the index space `[0, total)` with a fixed number of
//! lanes. Lane `l` starts at global index `l` and advances by the lane count,
//! so the lanes tile the space exactly once for any lane count >= 1. The
//! stride every lane sees is the lane count of its dispatch by construction;
//! a mismatch would skip or duplicate elements, so no other stride is ever
//! handed out.

/// Lane count used by dispatchers unless configured otherwise.
pub const DEFAULT_LANE_COUNT: usize = 20;

/// The index space of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItemSpace {
    /// Total number of logical elements to cover.
    pub total: u64,
    /// Number of concurrent lanes partitioning the space.
    pub lane_count: usize,
}

impl WorkItemSpace {
    pub const fn new(total: u64, lane_count: usize) -> Self {
        Self { total, lane_count }
    }

    /// The strided subset of the space assigned to one lane.
    pub fn lane_span(&self, lane: usize) -> LaneSpan {
        debug_assert!(lane < self.lane_count);
        LaneSpan { start: lane as u64, total: self.total, stride: self.lane_count, lane }
    }

    /// Spans of all lanes, in lane order.
    pub fn spans(&self) -> impl Iterator<Item = LaneSpan> + '_ {
        (0..self.lane_count).map(|lane| self.lane_span(lane))
    }
}

/// One lane's share of a dispatch: the arithmetic progression
/// `start, start + stride, ... < total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSpan {
    /// First global index this lane covers.
    pub start: u64,
    /// Exclusive upper bound of the dispatch's index space.
    pub total: u64,
    /// Fixed step between consecutive indices; equals the lane count.
    pub stride: usize,
    /// Lane identifier in `[0, stride)`.
    pub lane: usize,
}

impl LaneSpan {
    /// Global indices this lane iterates. Empty when `start >= total`.
    pub fn indices(self) -> impl Iterator<Item = u64> {
        (self.start..self.total).step_by(self.stride)
    }

    /// Number of indices this lane covers.
    pub fn len(self) -> u64 {
        if self.start >= self.total {
            0
        } else {
            (self.total - self.start).div_ceil(self.stride as u64)
        }
    }

    pub fn is_empty(self) -> bool {
        self.start >= self.total
    }
}
