//! Error types for kernel dispatch.

use snafu::Snafu;

/// Result type for runtime operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while setting up a dispatch.
///
/// Contract violations inside a dispatch (offsets or sizes inconsistent with
/// the true buffer extent, dangling handles) are undefined behavior and are
/// never detected here.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Kernel name is not present in the registry.
    #[snafu(display("kernel '{name}' is not registered"))]
    KernelNotFound { name: String },

    /// A dispatcher needs at least one lane.
    #[snafu(display("invalid lane count: {lane_count}"))]
    InvalidLaneCount { lane_count: usize },

    /// Buffer error while binding arguments.
    #[snafu(display("device error: {source}"))]
    Device { source: ewise_device::Error },
}
