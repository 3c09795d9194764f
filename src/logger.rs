//! The logging facade

// Standard library
use std::error::Error;
use std::fmt;
use std::sync::Arc;

// External dependencies
use time::OffsetDateTime;

// Internal modules
use crate::attr::{merge_overwrite, Attr};
use crate::config::{Config, Level};
use crate::handler::{Handler, JsonHandler, Record};

/// A configured structured logger.
///
/// Every leveled write emits exactly one JSON record, synchronously, to the
/// configured sink, or nothing at all when the record's level is below the
/// configured minimum. Writes never fail from the caller's point of view.
///
/// Cloning is cheap: the handler and configuration are shared. Derived
/// loggers ([`with`](Self::with), [`with_overwrite`](Self::with_overwrite),
/// [`group`](Self::group)) share them too, which is safe because the
/// configuration is never mutated after construction.
///
/// ```rust
/// use scarylog::{attrs, Config, Level, Logger};
///
/// let log = Logger::new(
///     Config::new()
///         .with_level(Level::Debug)
///         .with_default_attrs(attrs! { service = "user-service" })
///         .with_group("context"),
/// );
///
/// log.info("user logged in", &attrs! { user_id = "usr-456" });
/// ```
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    config: Arc<Config>,
    group: Option<String>,
    default_attrs: Vec<Attr>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Logger {
    /// Build a logger from a finished configuration. Infallible.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let handler: Arc<dyn Handler> = match &config.handler {
            Some(handler) => Arc::clone(handler),
            None => Arc::new(JsonHandler::new(&config)),
        };
        let group = config.group.clone();
        let default_attrs = config.default_attrs.clone();

        Self {
            handler,
            config: Arc::new(config),
            group,
            default_attrs,
        }
    }

    /// The configuration this logger (or its ancestor) was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The attrs included in every record this logger emits.
    #[must_use]
    pub fn default_attrs(&self) -> &[Attr] {
        &self.default_attrs
    }

    /// Emit an info record.
    pub fn info(&self, msg: &str, attrs: &[Attr]) {
        self.log(Level::Info, msg, None, attrs);
    }

    /// Emit a warn record.
    pub fn warn(&self, msg: &str, attrs: &[Attr]) {
        self.log(Level::Warn, msg, None, attrs);
    }

    /// Emit a debug record.
    pub fn debug(&self, msg: &str, attrs: &[Attr]) {
        self.log(Level::Debug, msg, None, attrs);
    }

    /// Emit an error record.
    ///
    /// The error's description is attached as an `error` attr, placed before
    /// any call-time attrs.
    pub fn error(&self, msg: &str, error: &dyn Error, attrs: &[Attr]) {
        self.log(Level::Error, msg, Some(error), attrs);
    }

    /// Derive a logger whose records additionally include `attrs`.
    ///
    /// Attrs accumulate without deduplication; when two entries share a key,
    /// the later one wins in the emitted record.
    #[must_use]
    pub fn with(&self, attrs: &[Attr]) -> Self {
        let mut derived = self.clone();
        derived.default_attrs.extend_from_slice(attrs);
        derived
    }

    /// Derive a logger whose default attrs are the parent's merged with
    /// `attrs`, keyed by name, with the new entry replacing any existing
    /// entry of the same name.
    ///
    /// Only the resulting key/value set is guaranteed, not its order.
    #[must_use]
    pub fn with_overwrite(&self, attrs: &[Attr]) -> Self {
        let mut derived = self.clone();
        derived.default_attrs = merge_overwrite(&self.default_attrs, attrs);
        derived
    }

    /// Derive a logger with its group name replaced.
    ///
    /// Subsequent writes nest their call-time attrs under `name`; default
    /// attrs are not retroactively grouped.
    #[must_use]
    pub fn group(&self, name: impl Into<String>) -> Self {
        let mut derived = self.clone();
        derived.group = Some(name.into());
        derived
    }

    fn log(&self, level: Level, msg: &str, error: Option<&dyn Error>, attrs: &[Attr]) {
        let mut record_attrs = self.default_attrs.clone();

        if let Some(error) = error {
            record_attrs.push(Attr::new("error", error.to_string()));
        }

        // Only call-time attrs are grouped, and only when there are any:
        // an empty group key never appears in the output.
        if !attrs.is_empty() {
            match self.group.as_deref() {
                Some(name) if !name.is_empty() => {
                    record_attrs.push(Attr::group(name, attrs.iter().cloned()));
                }
                _ => record_attrs.extend_from_slice(attrs),
            }
        }

        self.handler.emit(Record {
            time: OffsetDateTime::now_utc(),
            level,
            msg,
            attrs: record_attrs,
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("group", &self.group)
            .field("default_attrs", &self.default_attrs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::AttrValue;
    use serde_json::Value;
    use std::collections::HashMap;

    fn as_map(attrs: &[Attr]) -> HashMap<String, AttrValue> {
        attrs
            .iter()
            .map(|a| (a.key().to_owned(), a.value().clone()))
            .collect()
    }

    #[test]
    fn with_concatenates_without_dedup() {
        let log = Logger::new(Config::new().with_default_attrs([Attr::new("a", 1)]))
            .with(&[Attr::new("a", 2)])
            .with(&[Attr::new("b", 3)]);

        let keys: Vec<&str> = log.default_attrs().iter().map(Attr::key).collect();
        assert_eq!(keys, ["a", "a", "b"]);
    }

    #[test]
    fn with_overwrite_merges_by_key() {
        let log = Logger::new(
            Config::new().with_default_attrs([Attr::new("a", 1), Attr::new("b", 2)]),
        )
        .with_overwrite(&[Attr::new("b", 99), Attr::new("c", 3)]);

        let merged = as_map(log.default_attrs());
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["a"], AttrValue::Scalar(Value::from(1)));
        assert_eq!(merged["b"], AttrValue::Scalar(Value::from(99)));
        assert_eq!(merged["c"], AttrValue::Scalar(Value::from(3)));
    }

    #[test]
    fn derived_loggers_leave_the_parent_untouched() {
        let parent = Logger::new(Config::new().with_default_attrs([Attr::new("a", 1)]));
        let _child = parent.with(&[Attr::new("b", 2)]);
        let _grouped = parent.group("ctx");

        let keys: Vec<&str> = parent.default_attrs().iter().map(Attr::key).collect();
        assert_eq!(keys, ["a"]);
    }

    #[test]
    fn derived_loggers_share_the_parent_configuration() {
        let parent = Logger::new(Config::new().with_group("ctx"));
        let child = parent.with(&[Attr::new("k", 1)]);

        assert!(Arc::ptr_eq(&parent.config, &child.config));
    }
}
