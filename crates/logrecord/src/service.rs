//! The record holder and renderer.

use crate::config::RecordConfig;
use crate::output::OutputMode;
use crate::record::{LogRecord, RecordError};
use crate::sink::{RecordSink, TracingSink};
use crate::trace::trace_id_from_headers;
use http::HeaderMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct State {
    record: LogRecord,
    mode: OutputMode,
}

/// Holds the current record and output mode, and renders the record to a
/// [`RecordSink`] on every logging call.
///
/// All state sits behind one lock. Each call updates the per-call fields
/// and renders them under the same acquisition, so a rendered line never
/// mixes fields from two calls.
pub struct LogRecordService<S = TracingSink> {
    state: Mutex<State>,
    sink: S,
}

impl LogRecordService<TracingSink> {
    /// Create a service writing through `tracing`.
    pub fn new(config: &RecordConfig, headers: Option<&HeaderMap>) -> Self {
        Self::with_sink(config, headers, TracingSink)
    }
}

impl<S: RecordSink> LogRecordService<S> {
    /// Create a service writing to a custom sink.
    pub fn with_sink(config: &RecordConfig, headers: Option<&HeaderMap>, sink: S) -> Self {
        Self {
            state: Mutex::new(Self::fresh_state(config, headers)),
            sink,
        }
    }

    fn fresh_state(config: &RecordConfig, headers: Option<&HeaderMap>) -> State {
        let trace_id = trace_id_from_headers(headers, &config.trace_header);
        let record = LogRecord::new(config, trace_id);
        debug!(
            sequence_id = %record.sequence_id,
            trace_id = %record.trace_id,
            output_mode = %config.output_mode,
            "Initialized log record"
        );
        State {
            record,
            mode: config.output_mode,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Every update leaves the record consistent, so a poisoned lock is safe to reuse.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset the record: new static fields, sequence id, trace id and mode.
    pub fn initialize(&self, config: &RecordConfig, headers: Option<&HeaderMap>) {
        *self.lock() = Self::fresh_state(config, headers);
    }

    /// Log an info entry and return the rendered line.
    pub fn log_info(
        &self,
        object_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Option<String> {
        let mut state = self.lock();
        state.record.set_message(object_id, message);
        self.render_locked(&state)
    }

    /// Log an error entry and return the rendered line.
    pub fn log_error(
        &self,
        object_id: impl Into<String>,
        error: impl Into<RecordError>,
        message: impl Into<String>,
    ) -> Option<String> {
        let mut state = self.lock();
        state.record.set_error(object_id, error.into(), message);
        self.render_locked(&state)
    }

    /// Switch the render mode for subsequent renders.
    pub fn set_output_mode(&self, mode: OutputMode) {
        self.lock().mode = mode;
    }

    pub fn set_output_flat(&self) {
        self.set_output_mode(OutputMode::Flat);
    }

    pub fn set_output_json(&self) {
        self.set_output_mode(OutputMode::Json);
    }

    pub fn output_mode(&self) -> OutputMode {
        self.lock().mode
    }

    /// Snapshot of the current record.
    pub fn record(&self) -> LogRecord {
        self.lock().record.clone()
    }

    /// Render the current record to the sink.
    ///
    /// Returns `None` when the record could not be serialized; the failure
    /// is reported to the sink and never propagated.
    pub fn render(&self) -> Option<String> {
        let state = self.lock();
        self.render_locked(&state)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn render_locked(&self, state: &State) -> Option<String> {
        let rendered = match state.mode {
            OutputMode::Json => state.record.to_json(),
            OutputMode::Flat => Ok(state.record.to_flat()),
        };
        self.dispatch(&state.record, rendered)
    }

    fn dispatch(&self, record: &LogRecord, rendered: common::Result<String>) -> Option<String> {
        match rendered {
            Ok(line) => {
                self.sink.emit(record, &line);
                Some(line)
            }
            Err(e) => {
                self.sink.emit_failure(record, &e);
                None
            }
        }
    }
}
