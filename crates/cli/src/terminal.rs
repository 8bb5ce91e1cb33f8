//! Terminal stand-ins for the browser's toast and page navigation

use console_core::{Navigator, Notifier, Route};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Prints failures, once each, to stderr
///
/// The request pipeline already logs the failure; this is the user-facing line.
pub struct TerminalNotifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "error: {message}");
    }
}

/// There is no page to reload; tell the user how to get back to the login screen
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn hard_redirect(&self, href: &str) {
        info!("Session ended, redirect to {href}");
        if href == Route::Login.href() {
            eprintln!("Session expired. Sign in again with `console login`.");
        } else {
            eprintln!("Continue at {href}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_each_failure_is_printed_once() {
        let buffer = Buffer::default();
        let notifier = TerminalNotifier::with_writer(buffer.clone());

        notifier.error("expired");
        notifier.error("Request failed");

        let printed = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(printed, "error: expired\nerror: Request failed\n");
    }
}
