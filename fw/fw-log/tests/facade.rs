//! The `log` crate macros routed into the registry.
//!
//! Kept in its own test binary: the `log` backend can only be installed once
//! per process.

use std::sync::Mutex;

use fw_log::{FixedClock, HandlerError, LogEvent, Severity, SharedLogger, init_log_facade};

static LOGGER: SharedLogger<FixedClock> = SharedLogger::new(FixedClock(1_700_000_000));
static RECORDS: Mutex<Vec<(Severity, String, String)>> = Mutex::new(Vec::new());

fn record(event: &LogEvent<'_>) -> Result<(), HandlerError> {
    RECORDS
        .lock()
        .unwrap()
        .push((event.level, event.file.to_string(), event.message.to_string()));
    Ok(())
}

#[test]
fn log_macros_reach_handlers() {
    let id = LOGGER.subscribe(record);
    init_log_facade(&LOGGER).unwrap();

    log::trace!("t");
    log::debug!("d");
    log::info!("rpm={}", 1200);
    log::warn!("w");
    log::error!("e");

    // a second backend cannot replace the first
    assert!(init_log_facade(&LOGGER).is_err());

    LOGGER.unsubscribe(id);
    log::info!("dropped");

    let records = RECORDS.lock().unwrap().clone();
    let levels: Vec<Severity> = records.iter().map(|r| r.0).collect();
    assert_eq!(
        levels,
        [
            Severity::Debug,
            Severity::Debug,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
        ]
    );
    assert_eq!(records[2].2, "rpm=1200");
    assert!(records.iter().all(|r| r.1.ends_with("facade.rs")));
}
