//! Staged loads from caller memory into per-invocation local buffers.

use crate::shape::ConvDims;
use crate::tensor::{LocalInput, LocalWeight};
use crate::Datum;

/// Copy the flat `(h, w, c)` input into a local `[h][w][c]` buffer.
///
/// `input` must hold at least `dims.input_len()` values.
pub fn load_input(input: &[Datum], dims: &ConvDims) -> LocalInput {
    let size = dims.in_size();
    let channels = dims.channels();
    let mut local = LocalInput::new(dims);
    for h in 0..size {
        for w in 0..size {
            for c in 0..channels {
                local.set(h, w, c, input[(h * size + w) * channels + c]);
            }
        }
    }
    log::trace!("loaded input {}", local);
    local
}

/// Copy the flat `(p, q, i, j)` weights into a local `[p][q][i][j]` buffer.
///
/// `weight` must hold at least `dims.weight_len()` values.
pub fn load_weight(weight: &[Datum], dims: &ConvDims) -> LocalWeight {
    let kernel = dims.kernel();
    let channels = dims.channels();
    let mut local = LocalWeight::new(dims);
    for p in 0..kernel {
        for q in 0..kernel {
            for i in 0..channels {
                for j in 0..channels {
                    local.set(p, q, i, j, weight[((p * kernel + q) * channels + i) * channels + j]);
                }
            }
        }
    }
    log::trace!("loaded weight {}", local);
    local
}
