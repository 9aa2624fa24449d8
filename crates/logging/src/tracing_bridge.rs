//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the file logger.
//!
//! [`LoggerLayer`] is a `tracing-subscriber` layer that turns every tracing
//! event into a log record, so code instrumented with `tracing::info!` and
//! friends lands in the same file as records written through this crate's own
//! macros.
//!
//! Levels map as follows: `TRACE` and `DEBUG` become [`Severity::Debug`],
//! `INFO`, `WARN` and `ERROR` map to their namesakes. The record's call site
//! is the event target plus its line, and extra event fields are appended to
//! the message as `key=value` pairs.
//!
//! # Usage
//!
//! ```rust,ignore
//! logging::initialize();
//! logging::init_tracing();
//!
//! tracing::warn!(attempt = 3, "connection refused");
//! // [...] [PID 4242] my_app::net[88] | WARN | connection refused attempt=3
//! ```

use std::fmt::{self, Write as _};
use std::ops::Deref;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::logger::Logger;
use crate::severity::Severity;
use crate::source::CallSite;

/// A tracing layer that writes events through a [`Logger`].
///
/// `L` is anything that dereferences to a logger: `&'static Logger` for the
/// process-wide instance, or an `Arc<Logger>` for an explicit one.
#[derive(Clone, Debug)]
pub struct LoggerLayer<L> {
    logger: L,
}

impl<L> LoggerLayer<L>
where
    L: Deref<Target = Logger>,
{
    /// Creates a layer writing to `logger`.
    #[must_use]
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    /// Map a tracing level to a record severity.
    const fn level_to_severity(level: &Level) -> Severity {
        match *level {
            Level::ERROR => Severity::Error,
            Level::WARN => Severity::Warn,
            Level::INFO => Severity::Info,
            Level::DEBUG | Level::TRACE => Severity::Debug,
        }
    }
}

impl<S, L> Layer<S> for LoggerLayer<L>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    L: Deref<Target = Logger> + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Self::level_to_severity(metadata.level());
        if !self.logger.enabled(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let site = CallSite::new(metadata.target(), metadata.line().unwrap_or(0));
        self.logger
            .write(site, severity, format_args!("{}", visitor.finish()));
    }
}

/// Collects the `message` field plus any other fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={value}", field.name());
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }
}

/// Routes tracing events to the process-wide logger.
///
/// Installs a global subscriber consisting of a [`LoggerLayer`] over
/// [`global`](crate::global). Panics if a global subscriber is already set,
/// the same as `tracing_subscriber`'s `init`.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(crate::global()))
        .init();
}

/// Routes tracing events to the process-wide logger behind an extra filter.
///
/// The filter runs before the logger's own threshold, so a record must pass
/// both.
///
/// # Example
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// logging::init_tracing_with_filter(EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<F>(filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(crate::global()))
        .init();
}
