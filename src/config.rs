//! Configuration types for logger construction

// Standard library
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// External dependencies
use serde::{Deserialize, Serialize};

// Internal modules
use crate::attr::Attr;
use crate::handler::Handler;
use crate::writer::Writer;

/// Log severity
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Debug level
    Debug,
    /// Info level (the default minimum)
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
}

impl Level {
    /// Upper-case spelling used in emitted records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warn"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Case-insensitive; unrecognized input falls back to [`Level::Info`], so
/// parsing never fails.
impl std::str::FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "debug" => Level::Debug,
            "warn" | "warning" => Level::Warn,
            "error" => Level::Error,
            _ => Level::Info,
        })
    }
}

/// Logger configuration.
///
/// Built once through chained `with_*` options and consumed by
/// [`Logger::new`](crate::Logger::new); never mutated afterwards, so any
/// number of derived loggers can share one configuration.
///
/// Options of the same kind apply in call order with the last one winning
/// (default attrs are the exception: they accumulate). Nothing is validated;
/// a malformed time format is accepted here and degrades to the default
/// rendering at write time.
#[derive(Clone, Default)]
pub struct Config {
    pub(crate) level: Level,
    pub(crate) default_attrs: Vec<Attr>,
    pub(crate) group: Option<String>,
    pub(crate) attr_map: HashMap<String, String>,
    pub(crate) time_format: Option<String>,
    pub(crate) writer: Writer,
    pub(crate) handler: Option<Arc<dyn Handler>>,
}

impl Config {
    /// Create the default configuration: info level, no default attrs, no
    /// group, no key renaming, no custom time format, stdout sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `SCARYLOG_LEVEL` and `SCARYLOG_TIME_FORMAT`; unset or
    /// unrecognized values keep the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("SCARYLOG_LEVEL") {
            // The fallback level doubles as the default, so parse cannot miss.
            config.level = level.parse().unwrap_or_default();
        }

        if let Ok(format) = std::env::var("SCARYLOG_TIME_FORMAT") {
            config.time_format = Some(format);
        }

        config
    }

    /// Set the minimum severity to emit.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Append attrs included in every record.
    #[must_use]
    pub fn with_default_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.default_attrs.extend(attrs);
        self
    }

    /// Set the group name under which call-time attrs are nested.
    #[must_use]
    pub fn with_group(mut self, name: impl Into<String>) -> Self {
        self.group = Some(name.into());
        self
    }

    /// Replace the emit-time key rename table (old key → new key).
    #[must_use]
    pub fn with_attr_map(mut self, map: HashMap<String, String>) -> Self {
        self.attr_map = map;
        self
    }

    /// Add a single emit-time key rename.
    #[must_use]
    pub fn with_renamed_key(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.attr_map.insert(from.into(), to.into());
        self
    }

    /// Set the display format for the `time` field, as a `time` crate format
    /// description (e.g. `"[year]-[month]-[day]"`). Not validated.
    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// Set the output sink for the default JSON handler.
    #[must_use]
    pub fn with_writer(mut self, writer: Writer) -> Self {
        self.writer = writer;
        self
    }

    /// Replace the entire output mechanism.
    ///
    /// When set, every record goes straight to `handler`; the `level`,
    /// `attr_map`, `time_format` and `writer` options no longer apply.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("level", &self.level)
            .field("default_attrs", &self.default_attrs)
            .field("group", &self.group)
            .field("attr_map", &self.attr_map)
            .field("time_format", &self.time_format)
            .field("writer", &self.writer)
            .field("handler", &self.handler.as_ref().map(|_| "<custom>"))
            .finish()
    }
}
