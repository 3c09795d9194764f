//! Convenience macros for building field entries

/// Build a `Vec<Attr>` from `key = value` pairs.
///
/// ```rust
/// use scarylog::{attrs, Attr, Logger};
///
/// let log = Logger::default();
/// log.info("user logged in", &attrs! { user_id = "usr-456", attempts = 3 });
///
/// // Nested groups compose with `Attr::group`
/// log.info(
///     "request finished",
///     &[Attr::group("request", attrs! { id = "abc-123", status = 200 })],
/// );
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        ::std::vec![
            $( $crate::Attr::new(stringify!($key), $value) ),+
        ]
    };
}

#[cfg(test)]
mod tests {
    use crate::attr::{Attr, AttrValue};
    use serde_json::Value;

    #[test]
    fn builds_entries_from_ident_value_pairs() {
        let attrs = attrs! { user_id = "usr-456", days_left = 3 };

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].key(), "user_id");
        assert_eq!(
            attrs[1].value(),
            &AttrValue::Scalar(Value::from(3))
        );
    }

    #[test]
    fn empty_invocation_yields_an_empty_vec() {
        let attrs: Vec<Attr> = attrs! {};
        assert!(attrs.is_empty());
    }
}
