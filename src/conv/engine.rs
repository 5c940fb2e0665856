//! Convolution engine: zero phase followed by the accumulation loop nest.
//!
//! The accumulation reads source channel `j` from the input and writes channel
//! `i` of the output through weight `[p][q][i][j]`:
//!
//! ```text
//! for j, p, q, h, w, i:
//!     out[h][w][i] += in[h + p][w + q][j] * weight[p][q][i][j]
//! ```
//!
//! The nest order fixes, for every output cell, the order in which its
//! `(j, p, q)` terms are added. Every schedule here preserves that order, so
//! all of them are bit-identical.

use rayon::prelude::*;

use super::{simd, Schedule};
use crate::shape::ConvDims;
use crate::tensor::{LocalInput, LocalOutput, LocalWeight};

/// Set every output cell to zero.
pub fn zero_output(output: &mut LocalOutput) {
    output.fill(0.0);
}

/// Panics unless the three buffers describe one convolution.
fn assert_shapes(input: &LocalInput, weight: &LocalWeight, output: &LocalOutput) {
    assert!(
        input.size() == output.size() + weight.kernel() - 1
            && input.channels() == weight.channels()
            && weight.channels() == output.channels(),
        "mismatched local buffers: input {}, weight {}, output {}",
        input,
        weight,
        output
    );
}

/// Accumulation phase on the calling thread.
///
/// `output` must already be zeroed.
///
/// # Panics
///
/// If the buffer shapes disagree.
pub fn accumulate(input: &LocalInput, weight: &LocalWeight, output: &mut LocalOutput) {
    assert_shapes(input, weight, output);
    let out_size = output.size();
    let channels = output.channels();
    let kernel = weight.kernel();
    let acc = output.as_mut_slice();

    for j in 0..channels {
        for p in 0..kernel {
            for q in 0..kernel {
                let lane = weight.lane(p, q, j);
                for h in 0..out_size {
                    for w in 0..out_size {
                        let x = input.get(h + p, w + q, j);
                        simd::axpy_f32(acc, (h * out_size + w) * channels, lane, 0, x, channels);
                    }
                }
            }
        }
    }
}

/// Accumulation phase split by output row across the rayon pool.
///
/// Each task owns one row `h` of the accumulator and replays the
/// `j, p, q, w, i` nest for it, so no cell is written by two tasks.
pub fn accumulate_rows_parallel(input: &LocalInput, weight: &LocalWeight, output: &mut LocalOutput) {
    assert_shapes(input, weight, output);
    let out_size = output.size();
    let channels = output.channels();
    let kernel = weight.kernel();
    let row_len = output.row_len();

    output
        .as_mut_slice()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(h, row)| {
            for j in 0..channels {
                for p in 0..kernel {
                    for q in 0..kernel {
                        let lane = weight.lane(p, q, j);
                        for w in 0..out_size {
                            let x = input.get(h + p, w + q, j);
                            simd::axpy_f32(row, w * channels, lane, 0, x, channels);
                        }
                    }
                }
            }
        });
}

/// Allocate a local output, zero it, then accumulate with the given schedule.
pub fn convolve(
    input: &LocalInput,
    weight: &LocalWeight,
    dims: &ConvDims,
    schedule: Schedule,
) -> LocalOutput {
    let mut output = LocalOutput::new(dims);
    zero_output(&mut output);
    match schedule {
        Schedule::Sequential => accumulate(input, weight, &mut output),
        Schedule::RowParallel => accumulate_rows_parallel(input, weight, &mut output),
    }
    log::trace!("accumulated {} -> {} ({:?})", input, output, schedule);
    output
}
