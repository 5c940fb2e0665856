//! Reference implementations working straight on the flat caller buffers.
//!
//! Correct but slow; used to validate the staged pipeline.

use crate::shape::ConvDims;
use crate::Datum;

/// Direct evaluation of the kernel's accumulation on flat buffers.
///
/// Same loop nest and channel wiring as the staged pipeline, without local
/// buffers or the AXPY micro-kernel.
pub fn conv2d_direct(input: &[Datum], weight: &[Datum], dims: &ConvDims, output: &mut [Datum]) {
    let in_size = dims.in_size();
    let kernel = dims.kernel();
    let channels = dims.channels();
    let out_size = dims.out_size();

    output[..dims.output_len()].fill(0.0);
    for j in 0..channels {
        for p in 0..kernel {
            for q in 0..kernel {
                for h in 0..out_size {
                    for w in 0..out_size {
                        for i in 0..channels {
                            let in_idx = ((h + p) * in_size + (w + q)) * channels + j;
                            let w_idx = ((p * kernel + q) * channels + i) * channels + j;
                            let out_idx = (h * out_size + w) * channels + i;
                            output[out_idx] += input[in_idx] * weight[w_idx];
                        }
                    }
                }
            }
        }
    }
}

/// Textbook valid convolution with weights laid out `[p][q][in][out]`.
///
/// `out[h][w][o] = sum over c, p, q of in[h+p][w+q][c] * weight[p][q][c][o]`,
/// summed per cell in `c, p, q` order.
pub fn conv2d_textbook(input: &[Datum], weight: &[Datum], dims: &ConvDims, output: &mut [Datum]) {
    let in_size = dims.in_size();
    let kernel = dims.kernel();
    let channels = dims.channels();
    let out_size = dims.out_size();

    for oh in 0..out_size {
        for ow in 0..out_size {
            for oc in 0..channels {
                let mut sum: Datum = 0.0;
                for ic in 0..channels {
                    for kh in 0..kernel {
                        for kw in 0..kernel {
                            let in_idx = ((oh + kh) * in_size + (ow + kw)) * channels + ic;
                            let w_idx = ((kh * kernel + kw) * channels + ic) * channels + oc;
                            sum += input[in_idx] * weight[w_idx];
                        }
                    }
                }
                output[(oh * out_size + ow) * channels + oc] = sum;
            }
        }
    }
}

/// Swap the two channel axes of a `[p][q][a][b]` weight tensor.
///
/// The kernel applied to `weight` equals [`conv2d_textbook`] applied to
/// `swap_weight_channels(weight)`.
pub fn swap_weight_channels(weight: &[Datum], dims: &ConvDims) -> Vec<Datum> {
    let kernel = dims.kernel();
    let channels = dims.channels();
    let mut swapped = vec![0.0; dims.weight_len()];
    for p in 0..kernel {
        for q in 0..kernel {
            let base = (p * kernel + q) * channels * channels;
            for a in 0..channels {
                for b in 0..channels {
                    swapped[base + b * channels + a] = weight[base + a * channels + b];
                }
            }
        }
    }
    swapped
}
