//! Error reports sent to the site's error endpoint.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::traits::{ErrorReporter, SearchRecorder};

/// A message plus free-form context, serialized as one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub message: String,
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Map::new(),
        }
    }

    /// Adds a context field. Values that fail to serialize are stored as null.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.context.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"message\":{:?}}}", self.message))
    }
}

/// Reporter that only logs. Used when no site endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, report: &ErrorReport) {
        tracing::warn!(report = %report.to_json(), "unreported error");
    }
}

impl SearchRecorder for LogReporter {
    fn record_search(&self, query: &str) {
        tracing::debug!(query, "search not recorded");
    }
}
