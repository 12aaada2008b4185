//! Stopwatch behaviour against the real monotonic clock.

use std::thread;
use std::time::Duration;
use tgakit_common::time::{Microseconds, Milliseconds, MonotonicClock, Stopwatch};
use tgakit_common::{KitConfig, KitError};

#[test]
fn test_sleep_is_measured_within_tolerance() {
    let mut sw = Stopwatch::new();
    for target_ms in [5u64, 30] {
        sw.start().unwrap();
        thread::sleep(Duration::from_millis(target_ms));
        sw.stop().unwrap();

        let ms = sw.get_time::<Milliseconds>();
        assert!(ms >= u128::from(target_ms), "slept {target_ms}ms, measured {ms}ms");
        assert!(ms < u128::from(target_ms) + 1_000, "slept {target_ms}ms, measured {ms}ms");
        assert!(sw.get_time::<Microseconds>() >= ms * 1_000);
    }
}

#[test]
fn test_guards_leave_state_untouched() {
    let mut sw = Stopwatch::new();
    assert!(matches!(sw.stop(), Err(KitError::InvalidStateTransition { .. })));

    sw.start().unwrap();
    let started = sw.start_time();
    thread::sleep(Duration::from_millis(2));
    assert!(sw.start().is_err());
    assert_eq!(sw.start_time(), started);

    let committed = sw.stop().unwrap();
    assert!(sw.stop().is_err());
    assert_eq!(sw.elapsed(), committed);
}

#[test]
fn test_stopwatches_share_one_clock() {
    let mut a = Stopwatch::new();
    let mut b = Stopwatch::new();
    a.start().unwrap();
    b.start().unwrap();
    assert!(b.start_time() >= a.start_time());

    let clock = MonotonicClock::global();
    assert!(clock.resolution() > Duration::ZERO);
}

#[test]
fn test_config_json_fixture() {
    // Configs round-trip through any serde format, not just TOML
    let json = r#"{ "width": 4, "height": 4, "pattern": "solid", "repeat": 2 }"#;
    let config: KitConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.repeat, 2);
    assert!(config.validate().is_ok());
}
