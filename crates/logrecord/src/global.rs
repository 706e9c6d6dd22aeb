//! Process-wide record service.
//!
//! Free functions over a single [`LogRecordService`] for code that cannot
//! thread a service handle through its call stack, such as a function
//! handler that initializes once per invocation and logs from helpers.
//! Anything that can own a service should prefer doing so.

use crate::config::RecordConfig;
use crate::output::OutputMode;
use crate::record::RecordError;
use crate::service::LogRecordService;
use http::HeaderMap;
use std::sync::OnceLock;
use tracing::warn;

static SERVICE: OnceLock<LogRecordService> = OnceLock::new();

fn service() -> Option<&'static LogRecordService> {
    let service = SERVICE.get();
    if service.is_none() {
        warn!("Log record used before initialize(); entry dropped");
    }
    service
}

/// Initialize the process-wide record, or re-initialize it if it already exists.
pub fn initialize(config: &RecordConfig, headers: Option<&HeaderMap>) {
    let mut created = false;
    let service = SERVICE.get_or_init(|| {
        created = true;
        LogRecordService::new(config, headers)
    });
    if !created {
        service.initialize(config, headers);
    }
}

pub fn is_initialized() -> bool {
    SERVICE.get().is_some()
}

pub fn log_info(object_id: impl Into<String>, message: impl Into<String>) -> Option<String> {
    service()?.log_info(object_id, message)
}

pub fn log_error(
    object_id: impl Into<String>,
    error: impl Into<RecordError>,
    message: impl Into<String>,
) -> Option<String> {
    service()?.log_error(object_id, error, message)
}

pub fn set_output_mode(mode: OutputMode) {
    if let Some(service) = service() {
        service.set_output_mode(mode);
    }
}

pub fn set_output_flat() {
    set_output_mode(OutputMode::Flat);
}

pub fn set_output_json() {
    set_output_mode(OutputMode::Json);
}

/// Render the current process-wide record again.
pub fn render() -> Option<String> {
    service()?.render()
}
