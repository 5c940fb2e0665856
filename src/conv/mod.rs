//! The staged convolution pipeline.
//!
//! InputLoader and WeightLoader copy caller memory into local buffers, the
//! engine zeroes and accumulates the local output, and the writer copies it
//! back out. [`compute_convolution`] is the entry point for a compile-time
//! shape; [`Conv2dKernel`] drives the same pipeline from run-time dims.

mod engine;
mod loader;
mod reference;
mod simd;
mod writer;

use std::time::Instant;

pub use engine::{accumulate, accumulate_rows_parallel, convolve, zero_output};
pub use loader::{load_input, load_weight};
pub use reference::{conv2d_direct, conv2d_textbook, swap_weight_channels};
pub use simd::{axpy_f32, axpy_f32_scalar};
pub use writer::write_output;

use crate::error::{Error, Result};
use crate::metrics::StageTimings;
use crate::shape::{ConvDims, ConvShape};
use crate::tensor::{LocalInput, LocalWeight};
use crate::Datum;

/// Selects how the pipeline is executed.
///
/// Every schedule visits each output cell's terms in the same order, so the
/// choice only affects throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Reference loop nest on the calling thread.
    #[default]
    Sequential,
    /// Loaders run concurrently and the accumulation is split by output row
    /// across the rayon pool.
    RowParallel,
}

/// A convolution with fixed dimensions.
///
/// Holds no buffers: every call allocates its own local buffers and drops them
/// before returning, so one kernel can be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conv2dKernel {
    dims: ConvDims,
    schedule: Schedule,
}

impl Conv2dKernel {
    pub fn new(dims: ConvDims) -> Self {
        Conv2dKernel {
            dims,
            schedule: Schedule::Sequential,
        }
    }

    pub fn with_schedule(dims: ConvDims, schedule: Schedule) -> Self {
        Conv2dKernel { dims, schedule }
    }

    pub fn for_shape<S: ConvShape>() -> Self {
        Conv2dKernel::new(ConvDims::of::<S>())
    }

    pub fn dims(&self) -> &ConvDims {
        &self.dims
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Check that caller buffers are at least as long as the dims require.
    pub fn check_buffers(&self, input: &[Datum], weight: &[Datum], output: &[Datum]) -> Result<()> {
        let checks = [
            ("input", self.dims.input_len(), input.len()),
            ("weight", self.dims.weight_len(), weight.len()),
            ("output", self.dims.output_len(), output.len()),
        ];
        for (buffer, expected, got) in checks {
            if got < expected {
                return Err(Error::BufferTooSmall { buffer, expected, got });
            }
        }
        Ok(())
    }

    /// Run the full pipeline: load input and weight, convolve, write output.
    pub fn run(&self, input: &[Datum], weight: &[Datum], output: &mut [Datum]) -> Result<()> {
        self.check_buffers(input, weight, output)?;
        log::debug!("conv2d {} ({:?})", self.dims, self.schedule);

        let (local_input, local_weight) = self.load(input, weight);
        let local_output = convolve(&local_input, &local_weight, &self.dims, self.schedule);
        write_output(&local_output, output);
        Ok(())
    }

    /// Like [`run`](Self::run), recording the duration of each stage.
    ///
    /// The loaders are timed one after the other even under `RowParallel`.
    pub fn run_timed(&self, input: &[Datum], weight: &[Datum], output: &mut [Datum]) -> Result<StageTimings> {
        self.check_buffers(input, weight, output)?;

        let start = Instant::now();
        let local_input = load_input(input, &self.dims);
        let load_input_time = start.elapsed();

        let start = Instant::now();
        let local_weight = load_weight(weight, &self.dims);
        let load_weight_time = start.elapsed();

        let start = Instant::now();
        let local_output = convolve(&local_input, &local_weight, &self.dims, self.schedule);
        let convolve_time = start.elapsed();

        let start = Instant::now();
        write_output(&local_output, output);
        let write_output_time = start.elapsed();

        Ok(StageTimings {
            load_input: load_input_time,
            load_weight: load_weight_time,
            convolve: convolve_time,
            write_output: write_output_time,
        })
    }

    fn load(&self, input: &[Datum], weight: &[Datum]) -> (LocalInput, LocalWeight) {
        match self.schedule {
            Schedule::Sequential => (load_input(input, &self.dims), load_weight(weight, &self.dims)),
            Schedule::RowParallel => rayon::join(
                || load_input(input, &self.dims),
                || load_weight(weight, &self.dims),
            ),
        }
    }
}

/// Convolve with a compile-time shape, reporting undersized buffers.
pub fn try_compute_convolution<S: ConvShape>(
    input: &[Datum],
    weight: &[Datum],
    output: &mut [Datum],
) -> Result<()> {
    Conv2dKernel::for_shape::<S>().run(input, weight, output)
}

/// Convolve with a compile-time shape.
///
/// Buffers must hold at least `S::INPUT_LEN`, `S::WEIGHT_LEN` and
/// `S::OUTPUT_LEN` values; `output` is fully overwritten.
///
/// # Panics
///
/// If any buffer is shorter than the shape requires.
pub fn compute_convolution<S: ConvShape>(input: &[Datum], weight: &[Datum], output: &mut [Datum]) {
    if let Err(err) = try_compute_convolution::<S>(input, weight, output) {
        panic!("compute_convolution: {err}");
    }
}
