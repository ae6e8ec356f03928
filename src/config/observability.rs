//! Logging Config

use clap::Args;

/// How log lines are rendered on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One short line per event.
    Compact,

    /// One JSON object per event.
    Json,
}

/// Logging settings for the cart binary.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Level for cart events (trace, debug, info, warn, error); `RUST_LOG` wins when set
    #[arg(long = "log-level", env = "CART_LOG", default_value = "warn")]
    pub level: String,

    /// Log line format (compact, json)
    #[arg(
        long = "log-format",
        env = "CART_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Filter directives: cart events at the configured level, dependencies at `warn`.
    #[must_use]
    pub fn directives(&self) -> String {
        format!("warn,cart_store={level},cart={level}", level = self.level)
    }
}
