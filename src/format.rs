//! Timestamp formatting

// External dependencies
use once_cell::sync::OnceCell;
use time::format_description::well_known::Rfc3339;
use time::format_description::{self, OwnedFormatItem};
use time::OffsetDateTime;

/// Renders record timestamps.
///
/// A custom format description is parsed lazily on first use and cached; an
/// unparsable description silently falls back to RFC 3339 rather than failing
/// the write.
pub(crate) struct TimeFormatter {
    format: Option<String>,
    parsed: OnceCell<Option<OwnedFormatItem>>,
}

impl TimeFormatter {
    pub(crate) fn new(format: Option<String>) -> Self {
        Self {
            format,
            parsed: OnceCell::new(),
        }
    }

    pub(crate) fn format(&self, timestamp: OffsetDateTime) -> String {
        let parsed = self.parsed.get_or_init(|| {
            self.format
                .as_deref()
                .and_then(|f| format_description::parse_owned::<2>(f).ok())
        });

        match parsed {
            Some(items) => timestamp
                .format(items)
                .unwrap_or_else(|_| rfc3339(timestamp)),
            None => rfc3339(timestamp),
        }
    }
}

fn rfc3339(timestamp: OffsetDateTime) -> String {
    timestamp.format(&Rfc3339).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn default_format_is_rfc3339() {
        let formatter = TimeFormatter::new(None);
        let rendered = formatter.format(datetime!(2024-01-02 03:04:05 UTC));
        assert_eq!(rendered, "2024-01-02T03:04:05Z");
    }

    #[test]
    fn custom_format_is_applied() {
        let formatter = TimeFormatter::new(Some("[year]/[month]/[day]".to_owned()));
        let rendered = formatter.format(datetime!(2024-01-02 03:04:05 UTC));
        assert_eq!(rendered, "2024/01/02");
    }

    #[test]
    fn malformed_format_degrades_to_rfc3339() {
        let formatter = TimeFormatter::new(Some("[not-a-component]".to_owned()));
        let rendered = formatter.format(datetime!(2024-01-02 03:04:05 UTC));
        assert_eq!(rendered, "2024-01-02T03:04:05Z");
    }
}
