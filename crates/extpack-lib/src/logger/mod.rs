//! Process-wide `tracing` setup
//!
//! Events go through an `EnvFilter` and one fmt layer. The layer writes via
//! `tracing-indicatif` so log lines never tear an active progress bar.

use crate::primitives::*;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

/// Default filter: extpack at the configured level, everything else at warn
pub fn filter_directive(level: LogLevel) -> String {
    let level = level.as_filter();
    format!("extpack={level},extpack_lib={level},warn")
}

/// fmt layer for one writer in the requested layout. JSON never carries ANSI.
fn fmt_layer<S, W>(writer: W, format: LogFormat, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer);
    match format {
        LogFormat::Text => layer.with_ansi(ansi).compact().boxed(),
        LogFormat::Json => layer.with_ansi(false).json().boxed(),
        LogFormat::Yaml => layer.with_ansi(ansi).pretty().boxed(),
    }
}

impl Logger {
    /// Install the global subscriber. `RUST_LOG` overrides the computed
    /// filter when set. Fails on a second call.
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if Self::is_initialized() {
            return Err(LoggerError::AlreadyInitialized);
        }

        let indicatif_layer = IndicatifLayer::new();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(config.level)));

        let ansi = config.terminal_caps.color != TerminalColorCaps::None;
        let output_layer = match config.output {
            LogOutput::Stderr => fmt_layer(indicatif_layer.get_stderr_writer(), config.format, ansi),
            LogOutput::Stdout => fmt_layer(indicatif_layer.get_stdout_writer(), config.format, ansi),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(output_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let logger = GLOBAL_LOGGER.get_or_init(|| Logger {
            level: config.level,
        });

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            color = ?config.terminal_caps.color,
            "logger initialized"
        );
        Ok(logger)
    }

    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

#[doc(hidden)]
pub fn warn_event(message: &str, context: Option<&LogContext>) {
    match context {
        Some(ctx) => tracing::warn!(
            operation = %ctx.operation,
            current = ctx.current_item,
            total = ctx.total_items,
            "{message}"
        ),
        None => tracing::warn!("{message}"),
    }
}

#[doc(hidden)]
pub fn debug_event(message: &str, context: Option<&LogContext>) {
    match context {
        Some(ctx) => tracing::debug!(
            operation = %ctx.operation,
            current = ctx.current_item,
            total = ctx.total_items,
            "{message}"
        ),
        None => tracing::debug!("{message}"),
    }
}

/// `log_warn!(message)` or `log_warn!(message, &ctx)` with batch fields
#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        $crate::logger::warn_event(::std::convert::AsRef::<str>::as_ref(&$msg), None)
    };
    ($msg:expr, $ctx:expr) => {
        $crate::logger::warn_event(::std::convert::AsRef::<str>::as_ref(&$msg), Some($ctx))
    };
}

/// `log_debug!(message)` or `log_debug!(message, &ctx)` with batch fields
#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        $crate::logger::debug_event(::std::convert::AsRef::<str>::as_ref(&$msg), None)
    };
    ($msg:expr, $ctx:expr) => {
        $crate::logger::debug_event(::std::convert::AsRef::<str>::as_ref(&$msg), Some($ctx))
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
