mod commands;
mod helpers;

use cdextractor_core::ExtractError;
use clap::Parser;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let extract_error = error.as_extract_error();
            eprintln!("{}", extract_error.diagnostic_line());
            extract_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(cli.verbose);
            dispatch_parsed(cli.settings, cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "cdextractor",
    version,
    about = "Extract Cg-Cg and Y-X...Cg(Pi-Ring) contacts from PLATON .lis listings"
)]
struct Cli {
    /// Settings file holding the output directory, name stem and index
    #[arg(long, global = true, default_value = cdextractor_core::settings::DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Parse a listing and print both tables
    Open(commands::OpenArgs),
    /// Parse a listing and write both tables to a file
    Save(commands::SaveArgs),
    /// Show or change the export settings
    Settings(commands::SettingsArgs),
}

fn dispatch_parsed(settings: PathBuf, command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Open(args) => commands::run_open_command(&settings, args),
        CliCommand::Save(args) => commands::run_save_command(&settings, args),
        CliCommand::Settings(args) => commands::run_settings_command(&settings, args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_extract_error(&self) -> ExtractError {
        match self {
            Self::Usage(message) => {
                ExtractError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Extract(error) => error.clone(),
            Self::Internal(error) => ExtractError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use cdextractor_core::ExtractError;

    #[test]
    fn internal_failures_exit_with_internal_code() {
        let error = CliError::from(anyhow::anyhow!("failed to encode settings as JSON"));
        let mapped = error.as_extract_error();
        assert_eq!(mapped.code(), "SYS.CLI");
        assert_eq!(mapped.exit_code(), 5);
    }

    #[test]
    fn core_errors_keep_their_category() {
        let error = CliError::from(ExtractError::io_system("IO.REPORT_READ", "gone"));
        assert_eq!(error.as_extract_error().exit_code(), 3);
        assert_eq!(CliError::Usage("bad".to_string()).as_extract_error().exit_code(), 2);
    }
}
