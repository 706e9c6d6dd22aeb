//! Destinations for rendered records.

use crate::record::LogRecord;
use tracing::{error, info};

/// Target used for every line written by [`TracingSink`].
pub const LOG_TARGET: &str = "logrecord";

/// Receives rendered lines from a [`LogRecordService`](crate::LogRecordService).
#[cfg_attr(test, mockall::automock)]
pub trait RecordSink: Send + Sync {
    /// Write one rendered line for `record`.
    fn emit(&self, record: &LogRecord, line: &str);

    /// Report a record that could not be rendered.
    fn emit_failure(&self, record: &LogRecord, error: &common::Error);
}

/// Writes lines through the process `tracing` subscriber.
///
/// Records carrying an error go out at ERROR, everything else at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn emit(&self, record: &LogRecord, line: &str) {
        if record.has_error() {
            error!(target: LOG_TARGET, "{}", line);
        } else {
            info!(target: LOG_TARGET, "{}", line);
        }
    }

    fn emit_failure(&self, record: &LogRecord, err: &common::Error) {
        error!(
            target: LOG_TARGET,
            function = "serde_json::to_string",
            object = ?record,
            error = %err,
            "Failed to render log record"
        );
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn emit(&self, record: &LogRecord, line: &str) {
        (**self).emit(record, line)
    }

    fn emit_failure(&self, record: &LogRecord, error: &common::Error) {
        (**self).emit_failure(record, error)
    }
}

impl<S: RecordSink + ?Sized> RecordSink for std::sync::Arc<S> {
    fn emit(&self, record: &LogRecord, line: &str) {
        (**self).emit(record, line)
    }

    fn emit_failure(&self, record: &LogRecord, error: &common::Error) {
        (**self).emit_failure(record, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecordConfig;
    use crate::output::OutputMode;
    use crate::record::RecordError;

    fn record() -> LogRecord {
        let config = RecordConfig::new("test", "dev", "moduleName", "fn", OutputMode::Json);
        LogRecord::new(&config, "N/A")
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        let mut record = record();
        record.set_message("1", "info");
        TracingSink.emit(&record, &record.to_flat());

        record.set_error("2", RecordError::msg("boom"), "error");
        TracingSink.emit(&record, &record.to_flat());

        TracingSink.emit_failure(&record, &common::Error::config("render failed"));
    }

    #[test]
    fn test_tracing_sink_with_subscriber() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut record = record();
            record.set_message("1", "info");
            TracingSink.emit(&record, &record.to_flat());
        });
    }

    #[test]
    fn test_shared_sink_forwards() {
        let mut mock = MockRecordSink::new();
        mock.expect_emit()
            .withf(|_, line| line == "forwarded")
            .times(1)
            .return_const(());

        let sink: std::sync::Arc<dyn RecordSink> = std::sync::Arc::new(mock);
        sink.emit(&record(), "forwarded");
    }
}
