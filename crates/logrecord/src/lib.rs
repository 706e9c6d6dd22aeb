//! Structured log records for short-lived functions.
//!
//! A [`LogRecordService`] holds one [`LogRecord`]: the project, environment,
//! module and function it was initialized with, a sequence id generated at
//! initialization, and the trace id taken from an inbound request header.
//! Every info or error call replaces the object id, message and error of
//! that record and renders it to a [`RecordSink`], either as a JSON object or
//! as one flat line.
//!
//! # Example
//!
//! ```no_run
//! use logrecord::{LogRecordService, OutputMode, RecordConfig, RecordError};
//!
//! let config = RecordConfig::new(
//!     "test",
//!     "dev",
//!     "moduleName",
//!     "lambdaFunctionName",
//!     OutputMode::Json,
//! );
//! let service = LogRecordService::new(&config, None);
//!
//! service.log_info("12123123dfs", "Info Log");
//! service.log_error("32434234", RecordError::msg("New error"), "Error log");
//!
//! service.set_output_flat();
//! service.render();
//! ```

pub mod config;
pub mod global;
pub mod output;
pub mod record;
pub mod service;
pub mod sink;
pub mod trace;

pub use config::{Config, ConfigError, LoggingSettings, RecordConfig};
pub use output::OutputMode;
pub use record::{LogRecord, RecordError};
pub use service::LogRecordService;
pub use sink::{RecordSink, TracingSink};
pub use trace::{DEFAULT_TRACE_HEADER, MISSING_TRACE_ID};
