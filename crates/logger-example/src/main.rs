//! Walks through the record lifecycle: one info entry, one error entry,
//! then the last record again as a flat line.

use anyhow::Context;
use logrecord::{Config, LogRecordService, RecordError};

fn main() -> anyhow::Result<()> {
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Can't use tracing yet - not initialized
            eprintln!("Configuration error: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }
    };

    common::logging::try_init(config.logging.level(), config.logging.format())
        .context("failed to initialize tracing")?;

    let mut record_config = config.record;
    if record_config.project_name.is_empty() {
        record_config.project_name = "test".into();
        record_config.environment = "dev".into();
        record_config.module = "moduleName".into();
        record_config.function_name = "lambdaFunctionName".into();
    }

    tracing::info!(output_mode = %record_config.output_mode, "Logger example starting");

    let service = LogRecordService::new(&record_config, None);

    service.log_info("12123123dfs", "Info Log");
    service.log_error("32434234", RecordError::msg("New error"), "Error log");

    service.set_output_flat();
    service.render();

    Ok(())
}
