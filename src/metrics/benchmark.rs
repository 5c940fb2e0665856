use std::time::Duration;

use crate::conv::{load_input, load_weight, Conv2dKernel, Schedule};
use crate::error::Result;
use crate::metrics::StageTimings;
use crate::shape::ConvDims;
use crate::tensor::LocalOutput;
use crate::Datum;

/// Timing for one schedule over all benchmark iterations.
pub struct ScheduleMetrics {
    pub schedule: Schedule,
    pub mean: StageTimings,
    pub total_time: Duration,
    /// Giga multiply-accumulates per second over the whole pipeline.
    pub gmacs: f64,
}

/// Aggregate results comparing the sequential and row-parallel schedules.
pub struct BenchmarkResult {
    pub dims: ConvDims,
    pub iterations: usize,
    pub macs: usize,
    pub input_mem: usize,
    pub weight_mem: usize,
    pub output_mem: usize,
    pub schedules: Vec<ScheduleMetrics>,
    /// Whether every schedule produced bit-identical output.
    pub schedules_agree: bool,
}

fn bit_identical(a: &[Datum], b: &[Datum]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

/// Multiply-accumulates per second, in billions. Computed in `f64` so large
/// iteration counts cannot overflow.
fn throughput_gmacs(macs: usize, iterations: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        macs as f64 * iterations as f64 / secs / 1e9
    } else {
        0.0
    }
}

/// Divisor for per-stage means; saturates instead of truncating.
fn mean_divisor(iterations: usize) -> u32 {
    u32::try_from(iterations).unwrap_or(u32::MAX)
}

/// Run the pipeline `iterations` times under each schedule.
///
/// `input` and `weight` must satisfy `dims`; at least one iteration is run.
pub fn run_benchmark(
    dims: ConvDims,
    input: &[Datum],
    weight: &[Datum],
    iterations: usize,
) -> Result<BenchmarkResult> {
    let iterations = iterations.max(1);
    let runs = mean_divisor(iterations);

    let mut schedules = Vec::new();
    let mut outputs: Vec<Vec<Datum>> = Vec::new();

    for schedule in [Schedule::Sequential, Schedule::RowParallel] {
        let kernel = Conv2dKernel::with_schedule(dims, schedule);
        let mut output = vec![0.0; dims.output_len()];
        let mut sum = StageTimings::default();
        for _ in 0..iterations {
            sum += kernel.run_timed(input, weight, &mut output)?;
        }

        let total_time = sum.total();
        let gmacs = throughput_gmacs(dims.macs(), iterations, total_time);
        log::debug!("{:?}: {} iterations in {:?}", schedule, iterations, total_time);

        schedules.push(ScheduleMetrics {
            schedule,
            mean: sum.mean(runs),
            total_time,
            gmacs,
        });
        outputs.push(output);
    }

    let schedules_agree = outputs.windows(2).all(|pair| bit_identical(&pair[0], &pair[1]));

    // Buffers were validated by the timed runs above.
    let input_mem = load_input(input, &dims).memory_bytes();
    let weight_mem = load_weight(weight, &dims).memory_bytes();
    let output_mem = LocalOutput::new(&dims).memory_bytes();

    Ok(BenchmarkResult {
        dims,
        iterations,
        macs: dims.macs(),
        input_mem,
        weight_mem,
        output_mem,
        schedules,
        schedules_agree,
    })
}

/// Print a formatted benchmark report to stdout.
pub fn print_report(result: &BenchmarkResult) {
    println!("\n=== Conv2d {} ===", result.dims);
    println!(
        "MACs/call: {}    Local buffers: input {}B / weight {}B / output {}B",
        result.macs, result.input_mem, result.weight_mem, result.output_mem
    );

    println!("\n=== Per-Stage Mean ({} iterations) ===", result.iterations);
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "Schedule", "Input", "Weight", "Convolve", "Write", "Total", "GMAC/s"
    );

    for m in &result.schedules {
        let us = |d: Duration| d.as_nanos() as f64 / 1000.0;
        println!(
            "{:<12} {:>8.1}us {:>8.1}us {:>8.1}us {:>8.1}us {:>8.1}us {:>9.3}",
            format!("{:?}", m.schedule),
            us(m.mean.load_input),
            us(m.mean.load_weight),
            us(m.mean.convolve),
            us(m.mean.write_output),
            us(m.mean.total()),
            m.gmacs,
        );
    }

    if let [first, rest @ ..] = result.schedules.as_slice() {
        let base_ms = first.total_time.as_micros() as f64 / 1000.0;
        for m in rest {
            let ms = m.total_time.as_micros() as f64 / 1000.0;
            let speedup = if ms > 0.001 { base_ms / ms } else { 0.0 };
            println!("\n{:?} speedup over {:?}: {:.2}x", m.schedule, first.schedule, speedup);
        }
    }

    println!(
        "Schedules bit-identical: {}",
        if result.schedules_agree { "yes" } else { "NO" }
    );
}
