//! # scarylog: thin structured JSON logging
//!
//! A small convenience wrapper around a JSON-emitting, leveled logger:
//! default fields, scoped field grouping, key renaming, custom timestamp
//! formats and an explicit context carrier for propagating a logger through
//! a call chain.
//!
//! ## Quick Start
//!
//! ```rust
//! use scarylog::{attrs, Config, Level, Logger};
//!
//! let log = Logger::new(
//!     Config::new()
//!         .with_level(Level::Debug)
//!         .with_default_attrs(attrs! { service = "payment-processor", env = "production" })
//!         .with_group("context"),
//! );
//!
//! log.info("processing transaction", &attrs! { transaction_id = "abc-123" });
//! log.debug("shown because the minimum level is debug", &[]);
//! ```
//!
//! Each call writes one JSON object to the configured sink (stdout by
//! default); writes are fire-and-forget and never report sink errors.
//!
//! ## Propagating a logger
//!
//! ```rust
//! use scarylog::{Context, Logger};
//!
//! let ctx = Context::new().with_logger(Logger::default());
//! // Retrieval always succeeds; an empty context yields a default logger.
//! ctx.logger().info("ready", &[]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod attr;
mod config;
mod context;
mod format;
mod handler;
mod logger;
mod macros;
mod writer;

// Public API
pub use attr::{Attr, AttrValue};
pub use config::{Config, Level};
pub use context::Context;
pub use handler::{Handler, Record};
pub use logger::Logger;
pub use writer::Writer;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{attrs, Attr, Config, Context, Level, Logger};
}
