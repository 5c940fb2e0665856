use crate::tensor::LocalOutput;
use crate::Datum;

/// Copy the local `[h][w][c]` accumulator back to the caller's flat buffer.
///
/// Every one of the first `output_len` elements is overwritten, so `output`
/// does not need to be initialised.
///
/// # Panics
///
/// If `output` is shorter than the local buffer.
pub fn write_output(local: &LocalOutput, output: &mut [Datum]) {
    let len = local.as_slice().len();
    assert!(
        output.len() >= len,
        "output buffer holds {} elements, local output {} needs {}",
        output.len(),
        local,
        len
    );
    let size = local.size();
    let channels = local.channels();
    for h in 0..size {
        for w in 0..size {
            for c in 0..channels {
                output[(h * size + w) * channels + c] = local.get(h, w, c);
            }
        }
    }
    log::trace!("wrote output {}", local);
}
