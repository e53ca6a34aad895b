use super::CliError;
use super::helpers::{SettingsView, parse_export_format, write_stdout};
use cdextractor_core::export::render;
use cdextractor_core::{
    ExportFormat, ExtractorSession, InteractionKind, JsonSettingsStore, SettingsUpdate,
};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(clap::Args)]
pub(super) struct OpenArgs {
    /// PLATON listing to read (.lis)
    report: PathBuf,

    /// Output format: text or json
    #[arg(long, default_value = "text", value_parser = parse_export_format)]
    format: ExportFormat,
}

#[derive(clap::Args)]
pub(super) struct SaveArgs {
    /// PLATON listing to read (.lis)
    report: PathBuf,

    /// Destination file; defaults to the generated name in the last used directory
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text", value_parser = parse_export_format)]
    format: ExportFormat,
}

#[derive(clap::Args)]
pub(super) struct SettingsArgs {
    /// Output file-name stem
    #[arg(long)]
    file_name: Option<String>,

    /// Next output index (positive integer)
    #[arg(long, allow_hyphen_values = true)]
    index: Option<String>,

    /// Append the index to generated file names
    #[arg(long, value_name = "BOOL", value_parser = clap::builder::BoolishValueParser::new())]
    use_index: Option<bool>,

    /// Print settings as JSON
    #[arg(long)]
    json: bool,
}

impl SettingsArgs {
    fn into_update(self) -> Option<SettingsUpdate> {
        if self.file_name.is_none() && self.index.is_none() && self.use_index.is_none() {
            return None;
        }
        Some(SettingsUpdate {
            default_file_name: self.file_name,
            current_index: self.index,
            use_index: self.use_index,
        })
    }
}

fn open_session(settings_path: &Path) -> Result<ExtractorSession<JsonSettingsStore>, CliError> {
    debug!(settings = %settings_path.display(), "loading settings");
    ExtractorSession::new(JsonSettingsStore::new(settings_path)).map_err(CliError::from)
}

pub(super) fn run_open_command(settings_path: &Path, args: OpenArgs) -> Result<i32, CliError> {
    let mut session = open_session(settings_path)?;
    let data = session.open_report(&args.report)?;
    let rendered = render(data, args.format)?;
    write_stdout(&rendered)?;
    Ok(0)
}

pub(super) fn run_save_command(settings_path: &Path, args: SaveArgs) -> Result<i32, CliError> {
    let mut session = open_session(settings_path)?;
    let data = session.open_report(&args.report)?;
    let ring_count = data.record_count(InteractionKind::Ring);
    let pi_count = data.record_count(InteractionKind::Pi);

    let written = session.save_results(args.output.as_deref(), args.format)?;
    println!(
        "Extracted {} ring and {} pi interactions from '{}'.",
        ring_count,
        pi_count,
        args.report.display()
    );
    println!("File saved successfully: {}", written.display());
    Ok(0)
}

pub(super) fn run_settings_command(
    settings_path: &Path,
    args: SettingsArgs,
) -> Result<i32, CliError> {
    let mut session = open_session(settings_path)?;
    let format = if args.json {
        ExportFormat::Json
    } else {
        ExportFormat::Text
    };

    if let Some(update) = args.into_update() {
        session.update_settings(update)?;
        if format == ExportFormat::Text {
            println!("Settings saved successfully!");
        }
    }

    let view = SettingsView::new(settings_path, session.settings().settings());
    write_stdout(&view.render(format)?)?;
    Ok(0)
}
