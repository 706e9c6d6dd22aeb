//! The log record and its two renderings.

use crate::config::RecordConfig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Error attached to a record by an error-level call.
///
/// Wraps any error behind an `Arc` so records stay cheap to clone. It is
/// serialized as its display text.
#[derive(Clone)]
pub struct RecordError(Arc<dyn StdError + Send + Sync + 'static>);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MessageError(String);

impl RecordError {
    /// Wrap a concrete error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        RecordError(Arc::new(error))
    }

    /// Build an error from a plain message.
    pub fn msg(message: impl fmt::Display) -> Self {
        RecordError(Arc::new(MessageError(message.to_string())))
    }

    /// Wrap an already boxed error, e.g. `anyhow::Error::into()`.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        RecordError(Arc::from(error))
    }

    /// The wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl<E> From<E> for RecordError
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        RecordError::new(error)
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl PartialEq for RecordError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Serialize for RecordError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(RecordError::msg)
    }
}

/// A single structured log entry.
///
/// The static fields are fixed at initialization; `object_id`, `message`
/// and `error` are replaced together on every logging call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "projectName")]
    pub project_name: String,

    #[serde(rename = "Environment")]
    pub environment: String,

    #[serde(rename = "module")]
    pub module: String,

    #[serde(rename = "FunctionName")]
    pub function_name: String,

    #[serde(rename = "sequenceNumber")]
    pub sequence_id: Uuid,

    #[serde(rename = "XRayId")]
    pub trace_id: String,

    #[serde(rename = "ObjectId")]
    pub object_id: String,

    /// Always serialized; `null` when the last call carried no error.
    #[serde(rename = "Error")]
    pub error: Option<RecordError>,

    #[serde(rename = "message")]
    pub message: String,
}

impl LogRecord {
    /// Create a record with a freshly generated sequence id.
    pub fn new(config: &RecordConfig, trace_id: impl Into<String>) -> Self {
        Self {
            project_name: config.project_name.clone(),
            environment: config.environment.clone(),
            module: config.module.clone(),
            function_name: config.function_name.clone(),
            sequence_id: Uuid::new_v4(),
            trace_id: trace_id.into(),
            object_id: String::new(),
            error: None,
            message: String::new(),
        }
    }

    /// Replace the per-call fields for an info-level entry.
    pub fn set_message(&mut self, object_id: impl Into<String>, message: impl Into<String>) {
        self.object_id = object_id.into();
        self.message = message.into();
        self.error = None;
    }

    /// Replace the per-call fields for an error-level entry.
    pub fn set_error(
        &mut self,
        object_id: impl Into<String>,
        error: RecordError,
        message: impl Into<String>,
    ) {
        self.object_id = object_id.into();
        self.message = message.into();
        self.error = Some(error);
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Render as a single JSON object.
    pub fn to_json(&self) -> common::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render as a flat, human-readable line.
    pub fn to_flat(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ProjectName = {}, Environment = {}, Module = {}, FunctionName = {}, X-RayID = {}>, \
             [SequenceNumber = {}] [ObjectId: {}] {}",
            self.project_name,
            self.environment,
            self.module,
            self.function_name,
            self.trace_id,
            self.sequence_id,
            self.object_id,
            self.message,
        )?;
        if let Some(error) = &self.error {
            write!(f, " [Error = {}]", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputMode;

    fn record() -> LogRecord {
        let config = RecordConfig::new(
            "test",
            "dev",
            "moduleName",
            "lambdaFunctionName",
            OutputMode::Flat,
        );
        LogRecord::new(&config, "N/A")
    }

    #[test]
    fn test_new_record_fields() {
        let record = record();
        assert_eq!(record.project_name, "test");
        assert_eq!(record.environment, "dev");
        assert_eq!(record.module, "moduleName");
        assert_eq!(record.function_name, "lambdaFunctionName");
        assert_eq!(record.trace_id, "N/A");
        assert_eq!(record.sequence_id.get_version_num(), 4);
        assert!(record.object_id.is_empty());
        assert!(record.message.is_empty());
        assert!(!record.has_error());
    }

    #[test]
    fn test_sequence_ids_are_unique() {
        assert_ne!(record().sequence_id, record().sequence_id);
    }

    #[test]
    fn test_set_message_clears_error() {
        let mut record = record();
        record.set_error("1", RecordError::msg("boom"), "failed");
        assert!(record.has_error());

        record.set_message("2", "ok");
        assert_eq!(record.object_id, "2");
        assert_eq!(record.message, "ok");
        assert!(record.error.is_none());
    }

    #[test]
    fn test_flat_without_error() {
        let mut record = record();
        record.set_message("123", "hello");

        let line = record.to_flat();
        let expected = format!(
            "<ProjectName = test, Environment = dev, Module = moduleName, \
             FunctionName = lambdaFunctionName, X-RayID = N/A>, \
             [SequenceNumber = {}] [ObjectId: 123] hello",
            record.sequence_id
        );
        assert_eq!(line, expected);
        assert!(!line.contains("[Error = "));
    }

    #[test]
    fn test_flat_with_error_suffix() {
        let mut record = record();
        record.set_error("32434234", RecordError::msg("New error"), "Error log");

        let line = record.to_flat();
        assert!(line.ends_with("[ObjectId: 32434234] Error log [Error = New error]"));
    }

    #[test]
    fn test_json_field_names() {
        let mut record = record();
        record.set_message("123", "hello");

        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "Environment",
                "Error",
                "FunctionName",
                "ObjectId",
                "XRayId",
                "message",
                "module",
                "projectName",
                "sequenceNumber",
            ]
        );
        assert!(object["Error"].is_null());
        assert_eq!(object["sequenceNumber"], record.sequence_id.to_string());
    }

    #[test]
    fn test_json_error_is_display_text() {
        let mut record = record();
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "payment does not exist");
        record.set_error("42", io.into(), "lookup failed");

        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["Error"], "payment does not exist");
        assert_eq!(value["message"], "lookup failed");
    }

    #[test]
    fn test_record_error_wrapping() {
        let boxed: Box<dyn StdError + Send + Sync> = "boxed failure".into();
        let error = RecordError::from_boxed(boxed);
        assert_eq!(error.to_string(), "boxed failure");
        assert_eq!(error.inner().to_string(), "boxed failure");
        assert_eq!(error, RecordError::msg("boxed failure"));
    }
}
