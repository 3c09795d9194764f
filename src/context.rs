//! Explicit context carrier for propagating a logger through a call chain
//!
//! A [`Context`] is an immutable value with copy-on-derive semantics: deriving
//! a context never mutates its parent, so concurrent call chains holding
//! different derivations cannot observe each other's logger. There is no
//! process-global state involved.

// Standard library
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// Internal modules
use crate::logger::Logger;

/// An opaque, immutable bag of typed associations threaded through calls.
///
/// The logger lives under a private slot that cannot collide with values
/// stored via [`with_value`](Self::with_value).
///
/// ```rust
/// use scarylog::{Context, Logger};
///
/// fn handle(ctx: &Context) {
///     // Always usable, even when nothing was stored.
///     ctx.logger().info("handling request", &[]);
/// }
///
/// let ctx = Context::new().with_logger(Logger::default());
/// handle(&ctx);
/// ```
#[derive(Clone, Default)]
pub struct Context {
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

// Private key type: user-stored `Logger` values go in a different slot.
struct LoggerSlot(Logger);

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context that additionally carries `value` under its type.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut derived = self.clone();
        derived.values.insert(TypeId::of::<T>(), Arc::new(value));
        derived
    }

    /// The stored value of type `T`, if any.
    #[must_use]
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Derive a context carrying `logger`.
    #[must_use]
    pub fn with_logger(&self, logger: Logger) -> Self {
        self.with_value(LoggerSlot(logger))
    }

    /// The stored logger, or a freshly built default-configuration logger
    /// when none was stored. Never fails; the result is always usable.
    #[must_use]
    pub fn logger(&self) -> Logger {
        match self.value::<LoggerSlot>() {
            Some(slot) => slot.0.clone(),
            None => Logger::default(),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .finish()
    }
}
