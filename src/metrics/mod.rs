/// Per-stage timing of a single invocation.
mod timing;
/// Schedule comparison benchmark and report.
mod benchmark;

pub use benchmark::*;
pub use timing::StageTimings;
