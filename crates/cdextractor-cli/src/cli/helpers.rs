use super::CliError;
use anyhow::Context;
use cdextractor_core::export::normalize_text_artifact;
use cdextractor_core::{ExportFormat, ExportSettings, ExtractError};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub(super) const LOG_ENV: &str = "CDEXTRACTOR_LOG";

/// Installs the stderr subscriber. `CDEXTRACTOR_LOG` wins over `-v`.
pub(super) fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

pub(super) fn parse_export_format(value: &str) -> Result<ExportFormat, String> {
    value
        .parse::<ExportFormat>()
        .map_err(|error| error.message().to_string())
}

pub(super) fn write_stdout(content: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(normalize_text_artifact(content).as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| {
            ExtractError::io_system("IO.STDOUT", format!("failed to write to stdout: {}", source))
        })?;
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SettingsView<'a> {
    settings_file: &'a Path,
    last_directory: &'a Path,
    default_file_name: &'a str,
    current_index: u32,
    use_index: bool,
    next_output: String,
}

impl<'a> SettingsView<'a> {
    pub(super) fn new(settings_file: &'a Path, settings: &'a ExportSettings) -> Self {
        Self {
            settings_file,
            last_directory: &settings.last_directory,
            default_file_name: &settings.default_file_name,
            current_index: settings.current_index,
            use_index: settings.use_index,
            next_output: settings.suggested_output_path().display().to_string(),
        }
    }

    pub(super) fn render(&self, format: ExportFormat) -> Result<String, CliError> {
        match format {
            ExportFormat::Json => serde_json::to_string_pretty(self)
                .context("failed to encode settings as JSON")
                .map_err(CliError::from),
            ExportFormat::Text => Ok(format!(
                "Settings file: {}\n\
                 Last directory: {}\n\
                 Default file name: {}\n\
                 Current index: {}\n\
                 Use index: {}\n\
                 Next output: {}\n",
                self.settings_file.display(),
                self.last_directory.display(),
                self.default_file_name,
                self.current_index,
                self.use_index,
                self.next_output
            )),
        }
    }
}
