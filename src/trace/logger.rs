use std::{fs::OpenOptions, io::Write, sync::Mutex};

use crate::trace::trace::{TraceEvent, TraceLevel};

/// Diagnostic sink shared by the store and the session.
///
/// Events go to an append-only JSONL file when one is configured, to
/// stderr when echo is on, and to an in-memory buffer when capturing.
/// Every failure degrades to a warning on stderr.
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
    captured: Option<Mutex<Vec<TraceEvent>>>,
    echo: bool,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
                captured: None,
                echo: false,
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self::disabled()
            }
        }
    }

    /// Logger that drops every event.
    pub fn disabled() -> Self {
        Self {
            file: None,
            captured: None,
            echo: false,
        }
    }

    /// Logger that keeps events in memory, see `events()`.
    pub fn capturing() -> Self {
        Self {
            file: None,
            captured: Some(Mutex::new(Vec::new())),
            echo: false,
        }
    }

    /// Also print warnings to stderr.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn log(&self, event: &TraceEvent) {
        if self.echo && event.level == TraceLevel::Warn {
            eprintln!("Warning: {}", describe(event));
        }

        if let Some(captured) = &self.captured {
            match captured.lock() {
                Ok(mut events) => events.push(event.clone()),
                Err(e) => eprintln!("Warning: trace buffer lock poisoned: {}", e),
            }
        }

        let file_mutex = match &self.file {
            Some(f) => f,
            None => return,
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event: {}", e);
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Warning: trace logger lock poisoned: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            eprintln!("Warning: failed to write trace event: {}", e);
        }
    }

    /// Events captured so far. Empty unless built with `capturing()`.
    pub fn events(&self) -> Vec<TraceEvent> {
        match &self.captured {
            Some(captured) => captured.lock().map(|e| e.clone()).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Captured events tagged with `operation`.
    pub fn events_for(&self, operation: &str) -> Vec<TraceEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.operation == operation)
            .collect()
    }
}

impl Default for TraceLogger {
    fn default() -> Self {
        Self::disabled()
    }
}

fn describe(event: &TraceEvent) -> String {
    let mut line = event.operation.clone();
    if let Some(form_id) = &event.form_id {
        line.push_str(&format!(" form={}", form_id));
    }
    if let Some(key) = &event.key {
        line.push_str(&format!(" key={}", key));
    }
    if let Some(message) = &event.message {
        line.push_str(&format!(": {}", message));
    }
    line
}
