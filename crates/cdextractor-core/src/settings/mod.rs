mod store;

pub use store::{DEFAULT_SETTINGS_FILE, JsonSettingsStore, MemorySettingsStore, SettingsStore};

use crate::domain::{ExtractError, ExtractResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_FILE_NAME: &str = "cdextractor_";
pub const DEFAULT_INDEX: u32 = 1;
pub const OUTPUT_EXTENSION: &str = "txt";

/// Export preferences carried between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub last_directory: PathBuf,
    pub default_file_name: String,
    pub current_index: u32,
    pub use_index: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            last_directory: home_directory(),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            current_index: DEFAULT_INDEX,
            use_index: true,
        }
    }
}

impl ExportSettings {
    /// `<stem><index>.txt` with a two-digit minimum index, or `<stem>.txt`.
    pub fn generated_file_name(&self) -> String {
        if self.use_index {
            format!(
                "{}{:02}.{}",
                self.default_file_name, self.current_index, OUTPUT_EXTENSION
            )
        } else {
            format!("{}.{}", self.default_file_name, OUTPUT_EXTENSION)
        }
    }

    pub fn suggested_output_path(&self) -> PathBuf {
        self.last_directory.join(self.generated_file_name())
    }
}

fn home_directory() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Values entered for a settings change. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub default_file_name: Option<String>,
    /// Raw index text; validated before anything is stored.
    pub current_index: Option<String>,
    pub use_index: Option<bool>,
}

pub fn parse_index_field(text: &str) -> ExtractResult<u32> {
    let value = text.trim().parse::<i64>().map_err(|_| {
        ExtractError::input_validation(
            "INPUT.SETTINGS_INDEX",
            format!(
                "Invalid index format '{}'. Please enter a valid number.",
                text.trim()
            ),
        )
    })?;

    if value <= 0 {
        return Err(ExtractError::input_validation(
            "INPUT.SETTINGS_INDEX",
            "Index must be a positive number",
        ));
    }

    u32::try_from(value).map_err(|_| {
        ExtractError::input_validation(
            "INPUT.SETTINGS_INDEX",
            format!("Index {} is too large", value),
        )
    })
}

/// Current settings plus the store they are written through.
///
/// Every setter persists before the in-memory value changes, so a failed
/// write leaves the manager as it was. The bookkeeping done after an open or
/// a save (last directory, index advance) is the exception: it always takes
/// effect in memory and a failed write is only logged.
#[derive(Debug)]
pub struct SettingsManager<S: SettingsStore> {
    store: S,
    settings: ExportSettings,
}

impl<S: SettingsStore> SettingsManager<S> {
    pub fn load(store: S) -> ExtractResult<Self> {
        let settings = store.load()?;
        Ok(Self { store, settings })
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn last_directory(&self) -> &Path {
        &self.settings.last_directory
    }

    pub fn default_file_name(&self) -> &str {
        &self.settings.default_file_name
    }

    pub fn current_index(&self) -> u32 {
        self.settings.current_index
    }

    pub fn use_index(&self) -> bool {
        self.settings.use_index
    }

    pub fn generated_file_name(&self) -> String {
        self.settings.generated_file_name()
    }

    /// Records the directory of the last opened or written file.
    pub fn remember_last_directory(&mut self, directory: impl Into<PathBuf>) {
        let directory = directory.into();
        self.persist_or_warn(|settings| settings.last_directory = directory);
    }

    pub fn set_default_file_name(&mut self, file_name: impl Into<String>) -> ExtractResult<()> {
        let file_name = file_name.into();
        self.persist_with(|settings| settings.default_file_name = file_name)
    }

    pub fn set_current_index(&mut self, index: u32) -> ExtractResult<()> {
        self.persist_with(|settings| settings.current_index = index)
    }

    pub fn set_use_index(&mut self, use_index: bool) -> ExtractResult<()> {
        self.persist_with(|settings| settings.use_index = use_index)
    }

    /// Moves to the next output index when indexing is enabled.
    pub fn advance_index(&mut self) {
        if !self.settings.use_index {
            return;
        }
        let next = self.settings.current_index.saturating_add(1);
        self.persist_or_warn(|settings| settings.current_index = next);
    }

    /// Validates `update` as a whole, then stores it in one write.
    pub fn apply_update(&mut self, update: SettingsUpdate) -> ExtractResult<()> {
        let index = update
            .current_index
            .as_deref()
            .map(parse_index_field)
            .transpose()?;

        self.persist_with(|settings| {
            if let Some(file_name) = update.default_file_name {
                settings.default_file_name = file_name.trim().to_string();
            }
            if let Some(use_index) = update.use_index {
                settings.use_index = use_index;
            }
            if let Some(index) = index {
                settings.current_index = index;
            }
        })?;

        info!(
            default_file_name = %self.settings.default_file_name,
            current_index = self.settings.current_index,
            use_index = self.settings.use_index,
            "settings updated"
        );
        Ok(())
    }

    fn persist_with(&mut self, change: impl FnOnce(&mut ExportSettings)) -> ExtractResult<()> {
        let mut candidate = self.settings.clone();
        change(&mut candidate);
        self.store.save(&candidate)?;
        self.settings = candidate;
        Ok(())
    }

    fn persist_or_warn(&mut self, change: impl FnOnce(&mut ExportSettings)) {
        change(&mut self.settings);
        if let Err(error) = self.store.save(&self.settings) {
            warn!(
                code = error.code(),
                error = %error.message(),
                "settings not saved, keeping them for this run"
            );
        }
    }
}
