use super::ExportSettings;
use crate::domain::{ExtractError, ExtractResult};
use std::cell::{Cell, RefCell};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_SETTINGS_FILE: &str = "cdextractor_settings.json";

/// Persistence backend for [`ExportSettings`].
pub trait SettingsStore {
    fn load(&self) -> ExtractResult<ExportSettings>;
    fn save(&self, settings: &ExportSettings) -> ExtractResult<()>;
}

/// Settings kept as a JSON document on disk.
///
/// A missing file is created with defaults on first load. A file that cannot
/// be decoded is replaced by defaults as well. If the defaults cannot be
/// written, they are still returned and the failure is logged.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reset_to_defaults(&self) -> ExportSettings {
        let settings = ExportSettings::default();
        if let Err(error) = self.save(&settings) {
            warn!(
                path = %self.path.display(),
                error = %error.message(),
                "default settings not written, using them for this run"
            );
        }
        settings
    }
}

impl Default for JsonSettingsStore {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_FILE)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> ExtractResult<ExportSettings> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "settings file absent, writing defaults");
                return Ok(self.reset_to_defaults());
            }
            Err(source) => {
                return Err(ExtractError::io_system(
                    "IO.SETTINGS_READ",
                    format!(
                        "Error loading settings '{}': {}",
                        self.path.display(),
                        source
                    ),
                ));
            }
        };

        match serde_json::from_str::<ExportSettings>(&content) {
            Ok(settings) => Ok(settings),
            Err(source) => {
                warn!(
                    path = %self.path.display(),
                    error = %source,
                    "settings file unreadable, restoring defaults"
                );
                Ok(self.reset_to_defaults())
            }
        }
    }

    fn save(&self, settings: &ExportSettings) -> ExtractResult<()> {
        let mut payload = serde_json::to_string_pretty(settings).map_err(|source| {
            ExtractError::internal(
                "SYS.SETTINGS_ENCODE",
                format!("failed to encode settings: {}", source),
            )
        })?;
        payload.push('\n');

        fs::write(&self.path, payload).map_err(|source| {
            ExtractError::io_system(
                "IO.SETTINGS_WRITE",
                format!(
                    "Error saving settings '{}': {}",
                    self.path.display(),
                    source
                ),
            )
        })
    }
}

/// In-process store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    saved: RefCell<Option<ExportSettings>>,
    save_count: Cell<usize>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ExportSettings) -> Self {
        Self {
            saved: RefCell::new(Some(settings)),
            save_count: Cell::new(0),
        }
    }

    pub fn saved(&self) -> Option<ExportSettings> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> ExtractResult<ExportSettings> {
        Ok(self.saved.borrow().clone().unwrap_or_default())
    }

    fn save(&self, settings: &ExportSettings) -> ExtractResult<()> {
        *self.saved.borrow_mut() = Some(settings.clone());
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}

impl<S> SettingsStore for &S
where
    S: SettingsStore + ?Sized,
{
    fn load(&self) -> ExtractResult<ExportSettings> {
        (**self).load()
    }

    fn save(&self, settings: &ExportSettings) -> ExtractResult<()> {
        (**self).save(settings)
    }
}
