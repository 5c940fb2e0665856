use microconv::conv::{accumulate, accumulate_rows_parallel, load_input, load_weight, write_output, zero_output};
use microconv::shape::ConvDims;
use microconv::tensor::{LocalInput, LocalOutput, LocalWeight};

fn dims(in_size: usize, kernel: usize, channels: usize) -> ConvDims {
    ConvDims::new(in_size, kernel, channels).unwrap()
}

#[test]
fn local_input_get_set() {
    let mut t = LocalInput::new(&dims(3, 2, 4));
    t.set(2, 1, 3, 42.0);
    assert_eq!(t.get(2, 1, 3), 42.0);
    assert_eq!(t.as_slice()[(2 * 3 + 1) * 4 + 3], 42.0);
    assert_eq!(t.size(), 3);
    assert_eq!(t.channels(), 4);
    assert_eq!(t.memory_bytes(), 3 * 3 * 4 * 4);
    assert_eq!(t.to_string(), "3x3x4");
}

#[test]
fn local_weight_lanes_are_contiguous_over_output_channel() {
    let mut t = LocalWeight::new(&dims(4, 2, 3));
    for i in 0..3 {
        t.set(1, 0, i, 2, (10 + i) as f32);
    }
    assert_eq!(t.lane(1, 0, 2), &[10.0, 11.0, 12.0]);
    assert_eq!(t.get(1, 0, 1, 2), 11.0);
    assert_eq!(t.get(1, 0, 2, 1), 0.0);
    assert_eq!(t.kernel(), 2);
    assert_eq!(t.channels(), 3);
    assert_eq!(t.memory_bytes(), 2 * 2 * 3 * 3 * 4);
    assert_eq!(t.to_string(), "2x2x3x3");
}

#[test]
fn local_output_fill_and_rows() {
    let mut t = LocalOutput::new(&dims(5, 2, 3));
    assert_eq!(t.size(), 4);
    assert_eq!(t.channels(), 3);
    assert_eq!(t.row_len(), 12);
    assert_eq!(t.memory_bytes(), 4 * 4 * 3 * 4);
    t.fill(7.0);
    assert_eq!(t.get(0, 0, 0), 7.0);
    assert_eq!(t.get(3, 3, 2), 7.0);
    zero_output(&mut t);
    assert!(t.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn load_input_converts_linear_to_3d() {
    let d = dims(3, 1, 2);
    let input: Vec<f32> = (0..d.input_len()).map(|v| v as f32).collect();
    let local = load_input(&input, &d);
    for h in 0..3 {
        for w in 0..3 {
            for c in 0..2 {
                assert_eq!(local.get(h, w, c), ((h * 3 + w) * 2 + c) as f32);
            }
        }
    }
}

#[test]
fn load_weight_converts_linear_to_4d() {
    let d = dims(3, 2, 3);
    let weight: Vec<f32> = (0..d.weight_len()).map(|v| v as f32).collect();
    let local = load_weight(&weight, &d);
    for p in 0..2 {
        for q in 0..2 {
            for i in 0..3 {
                for j in 0..3 {
                    assert_eq!(local.get(p, q, i, j), (((p * 2 + q) * 3 + i) * 3 + j) as f32);
                }
            }
        }
    }
}

#[test]
fn write_output_converts_3d_to_linear() {
    let d = dims(4, 2, 2);
    let mut local = LocalOutput::new(&d);
    for h in 0..3 {
        for w in 0..3 {
            for c in 0..2 {
                local.set(h, w, c, (100 * h + 10 * w + c) as f32);
            }
        }
    }
    let mut output = vec![f32::NAN; d.output_len()];
    write_output(&local, &mut output);
    for h in 0..3 {
        for w in 0..3 {
            for c in 0..2 {
                assert_eq!(output[(h * 3 + w) * 2 + c], (100 * h + 10 * w + c) as f32);
            }
        }
    }
}

#[test]
fn accumulate_adds_onto_existing_values() {
    // The engine relies on the zero phase; without it results are offset.
    let d = dims(2, 1, 1);
    let local_input = load_input(&[1.0, 2.0, 3.0, 4.0], &d);
    let local_weight = load_weight(&[2.0], &d);
    let mut out = LocalOutput::new(&d);
    out.fill(1.0);
    accumulate(&local_input, &local_weight, &mut out);
    assert_eq!(out.as_slice(), &[3.0, 5.0, 7.0, 9.0]);
}

#[test]
#[should_panic(expected = "mismatched local buffers")]
fn accumulate_rejects_buffers_from_different_dims() {
    let input = load_input(&[1.0; 25], &dims(5, 2, 1));
    let weight = load_weight(&[1.0; 16], &dims(3, 2, 2));
    let mut out = LocalOutput::new(&dims(3, 2, 1));
    accumulate(&input, &weight, &mut out);
}

#[test]
#[should_panic(expected = "mismatched local buffers")]
fn accumulate_rejects_channel_mismatch() {
    // spatial sizes agree, channel counts do not
    let input = load_input(&[1.0; 18], &dims(3, 2, 2));
    let weight = load_weight(&[1.0; 4], &dims(3, 2, 1));
    let mut out = LocalOutput::new(&dims(3, 2, 1));
    accumulate(&input, &weight, &mut out);
}

#[test]
#[should_panic(expected = "mismatched local buffers")]
fn accumulate_rows_parallel_rejects_mismatched_buffers() {
    let input = load_input(&[1.0; 25], &dims(5, 2, 1));
    let weight = load_weight(&[1.0; 4], &dims(3, 2, 1));
    let mut out = LocalOutput::new(&dims(3, 2, 1));
    accumulate_rows_parallel(&input, &weight, &mut out);
}

#[test]
#[should_panic(expected = "output buffer holds 3 elements")]
fn write_output_rejects_short_buffer() {
    let local = LocalOutput::new(&dims(3, 2, 1));
    let mut output = [0.0f32; 3];
    write_output(&local, &mut output);
}
