//! Diagnostic reporting for the parser pipeline.
//!
//! Failures are split into three channels:
//!
//! - [`Channel::Internal`]: an invariant the code believed impossible was
//!   broken. Never recovered from; the current operation aborts.
//! - [`Channel::Misuse`]: a public API was used incorrectly. The operation
//!   returns a safe default.
//! - [`Channel::Runtime`]: an expected failure mode (syntax error, stream
//!   read failure, unknown parameter).
//!
//! A [`Handler`] is scoped to a single parse and carries one optional sink
//! per channel. Sinks receive `(module_name, line_in_source, text)` and
//! default to no-ops; every report is additionally collected so tests and
//! tooling can inspect what happened. Sinks must not re-enter the parser.
//!
//! Call sites use the [`internal_error!`], [`misuse_error!`] and
//! [`runtime_error!`] macros together with a per-file `MODULE` constant:
//!
//! ```
//! use bfsdl_util::{runtime_error, Handler};
//!
//! const MODULE: &str = "Example";
//!
//! let handler = Handler::new();
//! runtime_error!(handler, MODULE, "unexpected trailing {}", "data");
//! assert!(handler.has_errors());
//! ```

use std::cell::RefCell;
use std::fmt;

/// Severity / origin channel of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Broken internal invariant.
    Internal = 0,
    /// Public API misuse.
    Misuse = 1,
    /// Expected runtime failure.
    Runtime = 2,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Internal => write!(f, "internal"),
            Channel::Misuse => write!(f, "misuse"),
            Channel::Runtime => write!(f, "runtime"),
        }
    }
}

/// A single reported diagnostic.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Channel the diagnostic was reported on.
    pub channel: Channel,
    /// Module name of the reporting call site.
    pub module: &'static str,
    /// Source line of the reporting call site.
    pub line: u32,
    /// Human-readable message.
    pub message: String,
}

type SinkFn = Box<dyn Fn(&str, u32, &str)>;

/// Collects diagnostics and forwards them to registered sinks.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    sinks: [RefCell<Option<SinkFn>>; 3],
}

impl Handler {
    /// Creates a handler with no sinks registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the sink for [`Channel::Internal`] reports.
    pub fn set_internal_sink(&self, sink: impl Fn(&str, u32, &str) + 'static) {
        *self.sinks[Channel::Internal as usize].borrow_mut() = Some(Box::new(sink));
    }

    /// Registers the sink for [`Channel::Misuse`] reports.
    pub fn set_misuse_sink(&self, sink: impl Fn(&str, u32, &str) + 'static) {
        *self.sinks[Channel::Misuse as usize].borrow_mut() = Some(Box::new(sink));
    }

    /// Registers the sink for [`Channel::Runtime`] reports.
    pub fn set_runtime_sink(&self, sink: impl Fn(&str, u32, &str) + 'static) {
        *self.sinks[Channel::Runtime as usize].borrow_mut() = Some(Box::new(sink));
    }

    /// Reports a diagnostic, invoking the channel's sink if one is set.
    ///
    /// Prefer the reporting macros over calling this directly.
    pub fn report(
        &self,
        channel: Channel,
        module: &'static str,
        line: u32,
        message: impl Into<String>,
    ) {
        let message = message.into();
        if let Some(sink) = self.sinks[channel as usize].borrow().as_deref() {
            sink(module, line, &message);
        }
        self.diagnostics.borrow_mut().push(Diagnostic {
            channel,
            module,
            line,
            message,
        });
    }

    /// Returns true if anything has been reported.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    /// Number of reports on the given channel.
    pub fn count(&self, channel: Channel) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.channel == channel)
            .count()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Discards all collected diagnostics.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

/// Reports an [`Channel::Internal`](crate::Channel) diagnostic.
#[macro_export]
macro_rules! internal_error {
    ($handler:expr, $module:expr, $($arg:tt)*) => {
        $handler.report(
            $crate::diagnostic::Channel::Internal,
            $module,
            line!(),
            format!($($arg)*),
        )
    };
}

/// Reports a [`Channel::Misuse`](crate::Channel) diagnostic.
#[macro_export]
macro_rules! misuse_error {
    ($handler:expr, $module:expr, $($arg:tt)*) => {
        $handler.report(
            $crate::diagnostic::Channel::Misuse,
            $module,
            line!(),
            format!($($arg)*),
        )
    };
}

/// Reports a [`Channel::Runtime`](crate::Channel) diagnostic.
#[macro_export]
macro_rules! runtime_error {
    ($handler:expr, $module:expr, $($arg:tt)*) => {
        $handler.report(
            $crate::diagnostic::Channel::Runtime,
            $module,
            line!(),
            format!($($arg)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const MODULE: &str = "DiagnosticTest";

    #[test]
    fn test_new_handler_is_clean() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.count(Channel::Runtime), 0);
    }

    #[test]
    fn test_report_collects() {
        let handler = Handler::new();
        handler.report(Channel::Runtime, MODULE, 1, "boom");
        assert!(handler.has_errors());
        assert_eq!(handler.count(Channel::Runtime), 1);
        assert_eq!(handler.count(Channel::Internal), 0);
        let diags = handler.diagnostics();
        assert_eq!(diags[0].message, "boom");
        assert_eq!(diags[0].module, MODULE);
    }

    #[test]
    fn test_sink_receives_report() {
        let handler = Handler::new();
        let hits = Rc::new(Cell::new(0));
        let observed = hits.clone();
        handler.set_runtime_sink(move |module, _line, text| {
            assert_eq!(module, MODULE);
            assert_eq!(text, "boom");
            observed.set(observed.get() + 1);
        });
        handler.report(Channel::Runtime, MODULE, 1, "boom");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_sink_channels_are_independent() {
        let handler = Handler::new();
        let hits = Rc::new(Cell::new(0));
        let observed = hits.clone();
        handler.set_misuse_sink(move |_, _, _| observed.set(observed.get() + 1));
        handler.report(Channel::Runtime, MODULE, 1, "runtime");
        handler.report(Channel::Misuse, MODULE, 2, "misuse");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_macros_capture_line_and_format() {
        let handler = Handler::new();
        runtime_error!(handler, MODULE, "value {}", 42);
        internal_error!(handler, MODULE, "oops");
        misuse_error!(handler, MODULE, "bad arg");
        let diags = handler.diagnostics();
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[0].message, "value 42");
        assert_eq!(diags[0].channel, Channel::Runtime);
        assert!(diags[0].line > 0);
        assert_eq!(diags[1].channel, Channel::Internal);
        assert_eq!(diags[2].channel, Channel::Misuse);
    }

    #[test]
    fn test_clear() {
        let handler = Handler::new();
        handler.report(Channel::Runtime, MODULE, 1, "boom");
        handler.clear();
        assert!(!handler.has_errors());
    }
}
