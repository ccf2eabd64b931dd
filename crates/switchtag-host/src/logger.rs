// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::sync::Mutex;

use switchtag_engine::Logger;

/// Logger that keeps every message in memory.
///
/// Shared behind an `Arc` between the evaluation context and whoever
/// wants to inspect the log afterwards, such as a template debugger
/// panel or a test.
#[derive(Debug, Default)]
pub struct CollectingLogger {
    messages: Mutex<Vec<String>>,
}

impl CollectingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the messages logged so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("logger poisoned").clone()
    }
}

impl Logger for CollectingLogger {
    fn log(&self, message: &str) {
        self.messages
            .lock()
            .expect("logger poisoned")
            .push(message.to_string());
    }
}

/// Logger that writes each message to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn log(&self, message: &str) {
        eprintln!("{message}");
    }
}
