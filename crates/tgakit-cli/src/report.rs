//! Run summary.

use serde::Serialize;
use std::path::PathBuf;
use tgakit_common::config::PatternKind;
use tgakit_common::time::{Clock, ClockKind, Microseconds, Stopwatch};

/// What a single invocation produced and how long each phase took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// File the image was written to.
    pub output: PathBuf,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Generated pattern.
    pub pattern: PatternKind,
    /// Bytes in each written file.
    pub file_bytes: usize,
    /// Time spent generating pixels.
    pub generate_us: u64,
    /// Time spent on each write, in order.
    pub write_us: Vec<u64>,
    /// Clock the timings were taken on.
    pub clock: ClockKind,
}

impl RunReport {
    /// Sum of all write times.
    #[must_use]
    pub fn total_write_us(&self) -> u64 {
        self.write_us.iter().sum()
    }

    /// Slowest single write, if any.
    #[must_use]
    pub fn max_write_us(&self) -> Option<u64> {
        self.write_us.iter().copied().max()
    }
}

/// Last interval of `sw` in whole microseconds, saturating.
pub fn micros<C: Clock>(sw: &Stopwatch<C>) -> u64 {
    u64::try_from(sw.get_time::<Microseconds>()).unwrap_or(u64::MAX)
}
