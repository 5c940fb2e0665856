//! Fixed-shape convolution: the 3x3 scenario, then a schedule benchmark.
//!
//! Run with: `RUST_LOG=debug cargo run --release --example fixed_conv`

use microconv::conv::compute_convolution;
use microconv::conv_shape;
use microconv::metrics::{print_report, run_benchmark};
use microconv::shape::{ConvDims, ConvShape};

conv_shape!(Scenario { in_size: 3, kernel: 2, channels: 1 });
conv_shape!(Layer { in_size: 56, kernel: 3, channels: 32 });

fn fill(data: &mut [f32]) {
    for (i, v) in data.iter_mut().enumerate() {
        *v = ((i as f32) * 0.1 + 0.05).sin();
    }
}

fn main() -> microconv::Result<()> {
    env_logger::init();

    let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    let weight = [1.0, 0.0, 0.0, 1.0];
    let mut output = [0.0f32; Scenario::OUTPUT_LEN];
    compute_convolution::<Scenario>(&input, &weight, &mut output);
    println!("{}: {:?}", ConvDims::of::<Scenario>(), output);

    let mut input = vec![0.0f32; Layer::INPUT_LEN];
    let mut weight = vec![0.0f32; Layer::WEIGHT_LEN];
    fill(&mut input);
    fill(&mut weight);

    let result = run_benchmark(ConvDims::of::<Layer>(), &input, &weight, 10)?;
    print_report(&result);
    Ok(())
}
