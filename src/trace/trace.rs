use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Info,
    Warn,
}

/// One diagnostic line in the JSONL trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub level: TraceLevel,

    /// Short machine-readable tag, e.g. `duplicate_form`
    pub operation: String,

    pub form_id: Option<String>,
    pub key: Option<String>,
    pub message: Option<String>,
}

impl TraceEvent {
    pub fn now(level: TraceLevel, operation: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            level,
            operation: operation.to_string(),
            form_id: None,
            key: None,
            message: None,
        }
    }

    pub fn warn(operation: &str) -> Self {
        Self::now(TraceLevel::Warn, operation)
    }

    pub fn info(operation: &str) -> Self {
        Self::now(TraceLevel::Info, operation)
    }

    pub fn with_form(mut self, form_id: impl ToString) -> Self {
        self.form_id = Some(form_id.to_string());
        self
    }

    pub fn with_key(mut self, key: impl ToString) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }
}
