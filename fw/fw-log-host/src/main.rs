//! Host build of the firmware logger.
//!
//! Runs the same boot sequence a board would: one process-wide logger, a
//! console handler on stdout, and the `log` crate routed into it. Useful for
//! checking the console format and handler wiring without hardware.

mod args;
mod demo;

use std::fs;

use anyhow::Context;
use clap::Parser;
use fw_log::{ConsoleConfig, ConsoleLogHandler, SharedLogger, SystemClock, init_log_facade};

use args::HostArgs;

static LOGGER: SharedLogger<SystemClock> = SharedLogger::new(SystemClock);

fn main() -> anyhow::Result<()> {
    let args = HostArgs::parse();
    let config = load_config(&args)?;

    let console = LOGGER.subscribe(ConsoleLogHandler::stdout(config));
    if console.is_rejected() {
        anyhow::bail!("console handler was rejected");
    }
    init_log_facade(&LOGGER).context("installing log backend")?;

    demo::run(&LOGGER, args.rounds);

    LOGGER.unsubscribe(console);
    Ok(())
}

/// Console settings: `NO_COLOR` first, then the config file, then flags.
fn load_config(args: &HostArgs) -> anyhow::Result<ConsoleConfig> {
    let mut config = ConsoleConfig::from_env();
    if let Some(path) = &args.config {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        config = overlay(config, &text).with_context(|| format!("parsing {}", path.display()))?;
    }
    if args.no_color {
        config.colors = false;
    }
    if let Some(ending) = args.line_ending {
        config.line_ending = ending.into();
    }
    Ok(config)
}

/// Apply the fields set in the JSON object `text` on top of `base`.
fn overlay(base: ConsoleConfig, text: &str) -> anyhow::Result<ConsoleConfig> {
    let mut merged = serde_json::to_value(base)?;
    let serde_json::Value::Object(fields) = serde_json::from_str(text)? else {
        anyhow::bail!("config must be a JSON object");
    };
    if let serde_json::Value::Object(target) = &mut merged {
        target.extend(fields);
    }
    Ok(serde_json::from_value(merged)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_log::LineEnding;

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let base = ConsoleConfig {
            colors: false,
            ..ConsoleConfig::new()
        };

        let config = overlay(base, r#"{ "line_ending": "lf" }"#).unwrap();

        assert!(!config.colors);
        assert_eq!(config.line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_overlay_file_fields_win() {
        let config = overlay(ConsoleConfig::new(), r#"{ "colors": false }"#).unwrap();
        assert!(!config.colors);
        assert_eq!(config.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn test_overlay_rejects_non_object() {
        assert!(overlay(ConsoleConfig::new(), "[1, 2]").is_err());
        assert!(overlay(ConsoleConfig::new(), r#"{ "colors": "yes" }"#).is_err());
    }
}
