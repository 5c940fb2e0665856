use std::ops::AddAssign;
use std::time::Duration;

/// Wall-clock time spent in each pipeline stage of one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub load_input: Duration,
    pub load_weight: Duration,
    pub convolve: Duration,
    pub write_output: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.load_input + self.load_weight + self.convolve + self.write_output
    }

    /// Per-stage mean over `runs` accumulated invocations.
    pub fn mean(&self, runs: u32) -> StageTimings {
        let runs = runs.max(1);
        StageTimings {
            load_input: self.load_input / runs,
            load_weight: self.load_weight / runs,
            convolve: self.convolve / runs,
            write_output: self.write_output / runs,
        }
    }
}

impl AddAssign for StageTimings {
    fn add_assign(&mut self, rhs: StageTimings) {
        self.load_input += rhs.load_input;
        self.load_weight += rhs.load_weight;
        self.convolve += rhs.convolve;
        self.write_output += rhs.write_output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_and_average() {
        let one = StageTimings {
            load_input: Duration::from_micros(2),
            load_weight: Duration::from_micros(4),
            convolve: Duration::from_micros(10),
            write_output: Duration::from_micros(6),
        };
        let mut sum = StageTimings::default();
        sum += one;
        sum += one;
        assert_eq!(sum.total(), Duration::from_micros(44));
        assert_eq!(sum.mean(2), one);
        assert_eq!(sum.mean(0), sum);
    }
}
