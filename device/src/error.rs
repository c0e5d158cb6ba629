use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Host array length does not match the buffer view length.
    #[snafu(display("size mismatch: expected {expected} elements, got {actual}"))]
    SizeMismatch { expected: usize, actual: usize },

    /// Invalid buffer view parameters.
    #[snafu(display("invalid view: offset {offset} + len {len} exceeds buffer length {buffer_len}"))]
    InvalidView { offset: usize, len: usize, buffer_len: usize },

    /// Failed to obtain memory for a buffer of the requested length.
    #[snafu(display("allocation of {len} elements failed"))]
    AllocationFailed { len: usize },
}
