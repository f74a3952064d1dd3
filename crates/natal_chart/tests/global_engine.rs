//! The process-wide engine is installed once.

use chrono::DateTime;
use natal_chart::{BirthInput, ChartEngine, ChartError, ChartSettings, global};

#[test]
fn installs_once_and_serves_charts() {
    assert!(!global::is_initialized());
    let first = global::init(ChartEngine::degraded()).expect("first init");
    assert!(global::is_initialized());
    assert!(std::ptr::eq(first, global::engine()));

    assert!(matches!(
        global::init(ChartEngine::degraded()),
        Err(ChartError::AlreadyInitialized)
    ));

    let dt = DateTime::parse_from_rfc3339("2000-01-01T12:00:00+00:00").unwrap();
    let input = BirthInput::new(dt, 0.0, 0.0).unwrap();
    let chart = global::compute(&input, &ChartSettings::default()).unwrap();
    assert_eq!(chart.planets.len(), 10);
    assert!(!chart.settings.libraries.jpl_ephemeris);
}
