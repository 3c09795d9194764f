//! Record emission

// Standard library
use std::collections::HashMap;

// External dependencies
use serde_json::{Map, Value};
use time::OffsetDateTime;

// Internal modules
use crate::attr::{Attr, AttrValue};
use crate::config::{Config, Level};
use crate::format::TimeFormatter;
use crate::writer::Writer;

/// One leveled write, ready for emission.
#[derive(Debug)]
pub struct Record<'a> {
    /// Capture time of the call, UTC
    pub time: OffsetDateTime,
    /// Severity of the call
    pub level: Level,
    /// The message argument
    pub msg: &'a str,
    /// Default attrs followed by call-time attrs (already grouped if the
    /// logger carries a group name)
    pub attrs: Vec<Attr>,
}

/// Output seam: a handler receives every record the facade produces.
///
/// Installing one via [`Config::with_handler`] replaces the whole output
/// mechanism; level filtering, key renaming, time formatting and the writer
/// are concerns of the built-in JSON handler only.
pub trait Handler: Send + Sync {
    /// Consume one record.
    fn emit(&self, record: Record<'_>);
}

/// The default handler: drops records below the minimum level and writes one
/// JSON object per surviving record.
pub(crate) struct JsonHandler {
    level: Level,
    attr_map: HashMap<String, String>,
    time: TimeFormatter,
    writer: Writer,
}

impl JsonHandler {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            level: config.level,
            attr_map: config.attr_map.clone(),
            time: TimeFormatter::new(config.time_format.clone()),
            writer: config.writer.clone(),
        }
    }

    fn rename<'k>(&'k self, key: &'k str) -> &'k str {
        self.attr_map.get(key).map(String::as_str).unwrap_or(key)
    }

    // Renaming applies to every key the emitter writes, including keys inside
    // groups, but never reaches inside scalar values.
    fn insert_attrs(&self, map: &mut Map<String, Value>, attrs: &[Attr]) {
        for attr in attrs {
            let key = self.rename(attr.key()).to_owned();
            match attr.value() {
                AttrValue::Scalar(value) => {
                    map.insert(key, value.clone());
                }
                AttrValue::Group(children) => {
                    let mut nested = Map::new();
                    self.insert_attrs(&mut nested, children);
                    map.insert(key, Value::Object(nested));
                }
            }
        }
    }
}

impl Handler for JsonHandler {
    fn emit(&self, record: Record<'_>) {
        if record.level < self.level {
            return;
        }

        let mut map = Map::new();
        map.insert(
            self.rename("time").to_owned(),
            Value::String(self.time.format(record.time)),
        );
        map.insert(
            self.rename("level").to_owned(),
            Value::String(record.level.as_str().to_owned()),
        );
        map.insert(
            self.rename("msg").to_owned(),
            Value::String(record.msg.to_owned()),
        );
        self.insert_attrs(&mut map, &record.attrs);

        if let Ok(line) = serde_json::to_vec(&Value::Object(map)) {
            self.writer.write_line(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;
    use time::macros::datetime;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn records(&self) -> Vec<Value> {
            let data = self.0.lock();
            String::from_utf8_lossy(&data)
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn handler(config: Config, capture: &Capture) -> JsonHandler {
        JsonHandler::new(&config.with_writer(Writer::custom(capture.clone())))
    }

    fn record(level: Level, msg: &str, attrs: Vec<Attr>) -> Record<'_> {
        Record {
            time: datetime!(2024-01-02 03:04:05 UTC),
            level,
            msg,
            attrs,
        }
    }

    #[test]
    fn record_carries_time_level_and_msg() {
        let capture = Capture::default();
        handler(Config::new(), &capture).emit(record(Level::Info, "hello", vec![]));

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["time"], "2024-01-02T03:04:05Z");
        assert_eq!(records[0]["level"], "INFO");
        assert_eq!(records[0]["msg"], "hello");
    }

    #[test]
    fn records_below_minimum_level_are_dropped() {
        let capture = Capture::default();
        let handler = handler(Config::new().with_level(Level::Warn), &capture);

        handler.emit(record(Level::Info, "dropped", vec![]));
        handler.emit(record(Level::Error, "kept", vec![]));

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["msg"], "kept");
    }

    #[test]
    fn later_entry_wins_for_duplicate_keys() {
        let capture = Capture::default();
        handler(Config::new(), &capture).emit(record(
            Level::Info,
            "dup",
            vec![Attr::new("k", "first"), Attr::new("k", "second")],
        ));

        assert_eq!(capture.records()[0]["k"], "second");
    }

    #[test]
    fn group_attrs_nest_as_objects() {
        let capture = Capture::default();
        handler(Config::new(), &capture).emit(record(
            Level::Info,
            "grouped",
            vec![Attr::group("request", [Attr::new("id", "abc")])],
        ));

        assert_eq!(capture.records()[0]["request"]["id"], "abc");
    }

    #[test]
    fn attr_map_renames_builtin_and_nested_keys() {
        let capture = Capture::default();
        let handler = handler(
            Config::new()
                .with_renamed_key("msg", "message")
                .with_renamed_key("id", "request_id"),
            &capture,
        );

        handler.emit(record(
            Level::Info,
            "hello",
            vec![Attr::group("request", [Attr::new("id", "abc")])],
        ));

        let rec = &capture.records()[0];
        assert_eq!(rec["message"], "hello");
        assert!(rec.get("msg").is_none());
        assert_eq!(rec["request"]["request_id"], "abc");
    }

    #[test]
    fn custom_time_format_shapes_the_time_field() {
        let capture = Capture::default();
        let handler = handler(Config::new().with_time_format("[year]"), &capture);

        handler.emit(record(Level::Info, "dated", vec![]));

        assert_eq!(capture.records()[0]["time"], "2024");
    }
}
