//! Monotonic interval timing.
//!
//! A [`Stopwatch`] measures the interval between a `start` and a `stop`
//! call against a [`Clock`]. The default clock is the process-wide
//! [`MonotonicClock`], which is selected once on first use and never
//! changes for the rest of the process.
//!
//! ```
//! use tgakit_common::time::{Milliseconds, Stopwatch};
//!
//! let mut sw = Stopwatch::new();
//! sw.start().unwrap();
//! let elapsed = sw.stop().unwrap();
//! assert_eq!(sw.elapsed(), elapsed);
//! let _ms: u128 = sw.get_time::<Milliseconds>();
//! ```

use crate::error::{KitError, KitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// A monotonic time source.
pub trait Clock {
    /// Current time as an offset from the clock's fixed origin.
    ///
    /// Successive calls never return a smaller value.
    fn now(&self) -> Duration;
}

/// Capability class of the selected monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    /// Sub-microsecond tick resolution observed at startup.
    HighResolution,
    /// Coarser, but still monotonic, tick resolution.
    Steady,
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighResolution => write!(f, "high_resolution"),
            Self::Steady => write!(f, "steady"),
        }
    }
}

/// Ticks at or below this step size count as high resolution.
const HIGH_RESOLUTION_LIMIT: Duration = Duration::from_micros(1);

/// Number of distinct clock steps sampled during calibration.
const CALIBRATION_STEPS: u32 = 16;

/// Upper bound on readings taken during calibration.
const CALIBRATION_MAX_READS: u32 = 1_000_000;

static GLOBAL_CLOCK: OnceLock<MonotonicClock> = OnceLock::new();

/// Process-wide monotonic clock.
///
/// All copies share the origin captured when the clock was first selected,
/// so timestamps from different stopwatches are directly comparable.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
    kind: ClockKind,
    resolution: Duration,
}

impl MonotonicClock {
    /// The clock selected for this process.
    ///
    /// The capability check runs on the first call only.
    #[must_use]
    pub fn global() -> Self {
        *GLOBAL_CLOCK.get_or_init(Self::detect)
    }

    fn detect() -> Self {
        let origin = Instant::now();
        let resolution = observed_resolution();
        let kind = if resolution <= HIGH_RESOLUTION_LIMIT {
            ClockKind::HighResolution
        } else {
            ClockKind::Steady
        };

        debug!(
            %kind,
            resolution_ns = u64::try_from(resolution.as_nanos()).unwrap_or(u64::MAX),
            "Selected monotonic clock"
        );

        Self {
            origin,
            kind,
            resolution,
        }
    }

    /// Capability class chosen at selection time.
    #[must_use]
    pub fn kind(&self) -> ClockKind {
        self.kind
    }

    /// Smallest tick observed during selection.
    #[must_use]
    pub fn resolution(&self) -> Duration {
        self.resolution
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::global()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Smallest non-zero step between consecutive `Instant` readings.
fn observed_resolution() -> Duration {
    let mut smallest = Duration::MAX;
    let mut steps = 0;
    let mut prev = Instant::now();

    for _ in 0..CALIBRATION_MAX_READS {
        let next = Instant::now();
        let step = next.saturating_duration_since(prev);
        if !step.is_zero() {
            smallest = smallest.min(step);
            steps += 1;
            if steps == CALIBRATION_STEPS {
                break;
            }
        }
        prev = next;
    }

    smallest
}

/// Manually advanced clock for deterministic timing.
///
/// Clones share the same underlying counter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta_ns = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |ns| {
                Some(ns.saturating_add(delta_ns))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

/// A unit an elapsed interval can be expressed in.
///
/// Conversions truncate toward zero.
pub trait TimeUnit {
    /// Short unit suffix, e.g. `ms`.
    const SUFFIX: &'static str;

    /// Whole units contained in `duration`.
    fn from_duration(duration: Duration) -> u128;
}

macro_rules! time_unit {
    ($(#[$doc:meta])* $name:ident, $suffix:literal, |$d:ident| $conv:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl TimeUnit for $name {
            const SUFFIX: &'static str = $suffix;

            fn from_duration($d: Duration) -> u128 {
                $conv
            }
        }
    };
}

time_unit!(
    /// Nanoseconds.
    Nanoseconds, "ns", |d| d.as_nanos()
);
time_unit!(
    /// Microseconds.
    Microseconds, "us", |d| d.as_micros()
);
time_unit!(
    /// Milliseconds.
    Milliseconds, "ms", |d| d.as_millis()
);
time_unit!(
    /// Seconds.
    Seconds, "s", |d| u128::from(d.as_secs())
);
time_unit!(
    /// Minutes.
    Minutes, "min", |d| u128::from(d.as_secs() / 60)
);
time_unit!(
    /// Hours.
    Hours, "h", |d| u128::from(d.as_secs() / 3600)
);

/// Stopwatch lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopwatchState {
    /// Not measuring.
    #[default]
    Idle,
    /// Between a successful `start` and the matching `stop`.
    Running,
}

impl fmt::Display for StopwatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Running => write!(f, "RUNNING"),
        }
    }
}

/// Interval timer with guarded start/stop transitions.
///
/// `last_duration` reads zero until the first successful [`Stopwatch::stop`].
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    clock: C,
    start_time: Duration,
    end_time: Duration,
    last_duration: Duration,
    running: bool,
}

impl Stopwatch {
    /// Create an idle stopwatch on the process-wide monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::global())
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    /// Create an idle stopwatch reading from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            start_time: Duration::ZERO,
            end_time: Duration::ZERO,
            last_duration: Duration::ZERO,
            running: false,
        }
    }

    /// Begin measuring.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::InvalidStateTransition`] if already running; the
    /// recorded start time is left untouched.
    pub fn start(&mut self) -> KitResult<()> {
        if self.running {
            return Err(self.invalid_transition(StopwatchState::Running));
        }

        self.start_time = self.clock.now();
        self.running = true;
        Ok(())
    }

    /// Finish measuring and commit the interval.
    ///
    /// Returns the newly committed interval.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::InvalidStateTransition`] if idle; the last
    /// committed interval is left untouched.
    pub fn stop(&mut self) -> KitResult<Duration> {
        if !self.running {
            return Err(self.invalid_transition(StopwatchState::Idle));
        }

        self.end_time = self.clock.now();
        self.last_duration = self.end_time.saturating_sub(self.start_time);
        self.running = false;
        Ok(self.last_duration)
    }

    /// Last committed interval, truncated to whole `U`.
    #[must_use]
    pub fn get_time<U: TimeUnit>(&self) -> u128 {
        U::from_duration(self.last_duration)
    }

    /// Last committed interval.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.last_duration
    }

    /// Whether a measurement is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> StopwatchState {
        if self.running {
            StopwatchState::Running
        } else {
            StopwatchState::Idle
        }
    }

    /// Timestamp recorded by the last successful `start`.
    #[must_use]
    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Timestamp recorded by the last successful `stop`.
    #[must_use]
    pub fn end_time(&self) -> Duration {
        self.end_time
    }

    fn invalid_transition(&self, to: StopwatchState) -> KitError {
        KitError::InvalidStateTransition {
            from: self.state().to_string(),
            to: to.to_string(),
        }
    }
}
