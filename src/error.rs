//! Error types for microconv

use thiserror::Error;

/// Result type alias using microconv's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations detected before the pipeline runs.
///
/// The stages themselves never fail; everything here is caught either when a
/// shape is configured or when caller buffers are checked at entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A dimension was zero
    #[error("dimension '{name}' must be non-zero")]
    ZeroDimension {
        /// Which dimension
        name: &'static str,
    },

    /// The kernel does not fit inside the input
    #[error("kernel size {kernel} exceeds input size {in_size}")]
    KernelLargerThanInput {
        /// Kernel edge length
        kernel: usize,
        /// Input edge length
        in_size: usize,
    },

    /// A tensor length overflows usize
    #[error("tensor dimensions overflow usize")]
    DimensionOverflow,

    /// A caller-supplied buffer is shorter than the shape requires
    #[error("{buffer} buffer holds {got} elements, expected at least {expected}")]
    BufferTooSmall {
        /// Which buffer ("input", "weight" or "output")
        buffer: &'static str,
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },
}
