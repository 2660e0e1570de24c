//! Logging initialization for the callaudit binary.
//!
//! Configures `tracing-subscriber` from the `[general]` section of
//! `CallauditConfig`, with CLI overrides. Logs are written to stderr.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use callaudit_core::config::GeneralConfig;

/// Pick the effective filter directive.
///
/// Precedence: command flag (`--debug`/`--verbose`) > `--log-level` > config.
/// `RUST_LOG`, when set, wins over all of these in [`init_tracing`].
pub fn effective_level<'a>(
    config: &'a GeneralConfig,
    log_level: Option<&'a str>,
    hint: Option<&'a str>,
) -> &'a str {
    hint.or(log_level).unwrap_or(&config.log_level)
}

/// Initialize the global tracing subscriber.
///
/// Must be called once, before any tracing macros are used.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable colored output
pub fn init_tracing(config: &GeneralConfig, level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            ));
        }
    }

    Ok(())
}
