//! A fixed-shape 2D convolution kernel in Rust.
//!
//! One valid (stride 1, unpadded) convolution over a channel-minor feature
//! map, run as a staged pipeline: load input and weights into local buffers,
//! zero and accumulate a local output, write it back. Shapes are fixed at
//! build time with [`conv_shape!`] or validated at run time with
//! [`ConvDims`](shape::ConvDims).
//!
//! # Example
//!
//! ```
//! use microconv::conv::compute_convolution;
//!
//! microconv::conv_shape!(Tiny { in_size: 3, kernel: 2, channels: 1 });
//!
//! let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
//! let weight = [1.0, 0.0, 0.0, 1.0];
//! let mut output = [0.0; 4];
//! compute_convolution::<Tiny>(&input, &weight, &mut output);
//! assert_eq!(output, [6.0, 8.0, 12.0, 14.0]);
//! ```

/// Error type and result alias.
pub mod error;
/// Compile-time shapes and validated run-time dimensions.
pub mod shape;
/// Per-invocation local buffers.
pub mod tensor;
/// Loaders, engine, writer and entry points.
pub mod conv;
/// Stage timing and schedule benchmarking.
pub mod metrics;

pub use error::{Error, Result};

/// Element type of every tensor: IEEE-754 single precision.
pub type Datum = f32;
