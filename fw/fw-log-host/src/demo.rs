//! Simulated firmware main loop
//!
//! Exercises every entry point: literal and formatted macros at each level,
//! a message longer than the inline buffer, the `log` crate path, and a
//! handler that comes and goes.

use fw_log::{
    Clock, HandlerError, LogEvent, Severity, SharedLogger, log_debug, log_error, log_info,
    log_warning, logf_debug, logf_info, logf_warning,
};

/// Run `rounds` iterations of the fake sensor loop.
pub fn run<C: Clock + Send>(logger: &SharedLogger<C>, rounds: u32) {
    log_info!(logger, "boot complete");
    log_debug!(logger, "heap allocator ready");

    // Counts errors only; shows a handler that filters by level itself
    let alarm = logger.subscribe(|event: &LogEvent<'_>| -> Result<(), HandlerError> {
        if event.level >= Severity::Error {
            eprintln!("alarm: {}", event.message);
        }
        Ok(())
    });

    for round in 0..rounds {
        let temperature = 21.5 + round as f32 * 0.75;
        logf_debug!(logger, "round {round} temperature={temperature:.2}C");
        if temperature > 22.5 {
            logf_warning!(logger, "temperature {:.1}C above threshold", temperature);
        }
        log::info!("tick {round} via log facade");
    }

    let ssid = "workshop-network-with-a-rather-long-name";
    logf_info!(
        logger,
        "wifi connected: ssid={} rssi={}dBm channel={} ip=192.168.1.{}",
        ssid,
        -61,
        6,
        42
    );

    log_warning!(logger, "sd card missing, persistence disabled");
    log_error!(logger, "ota check failed: timeout");

    logger.unsubscribe(alarm);
    log_error!(logger, "not forwarded to the alarm handler");
}
