//! The open / save / settings cycle of the extractor.
//!
//! A session keeps the most recent successful parse. A failed open leaves
//! the previous result in place; a save without any result is refused
//! before an output path is even resolved. Once a parse or an export has
//! succeeded, a settings store that cannot be written does not fail it.

use crate::domain::{ExtractError, ExtractResult, ParsedData};
use crate::export::{ExportFormat, export_results};
use crate::report::{is_report_path, read_report};
use crate::settings::{SettingsManager, SettingsStore, SettingsUpdate};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedReport {
    pub source: PathBuf,
    pub data: ParsedData,
}

#[derive(Debug)]
pub struct ExtractorSession<S: SettingsStore> {
    settings: SettingsManager<S>,
    current: Option<LoadedReport>,
}

impl<S: SettingsStore> ExtractorSession<S> {
    pub fn new(store: S) -> ExtractResult<Self> {
        Ok(Self {
            settings: SettingsManager::load(store)?,
            current: None,
        })
    }

    pub fn settings(&self) -> &SettingsManager<S> {
        &self.settings
    }

    pub fn current(&self) -> Option<&LoadedReport> {
        self.current.as_ref()
    }

    pub fn open_report(&mut self, path: &Path) -> ExtractResult<&ParsedData> {
        if !is_report_path(path) {
            return Err(ExtractError::input_validation(
                "INPUT.REPORT_EXTENSION",
                format!("Please select a .lis file (got '{}')", path.display()),
            ));
        }

        let data = read_report(path)?;
        if let Some(parent) = non_empty_parent(path) {
            self.settings.remember_last_directory(parent);
        }

        let loaded = self.current.insert(LoadedReport {
            source: path.to_path_buf(),
            data,
        });
        Ok(&loaded.data)
    }

    /// Where a save without an explicit destination would write.
    pub fn suggested_output_path(&self) -> PathBuf {
        self.settings.settings().suggested_output_path()
    }

    /// Writes the current result and returns the path written.
    ///
    /// On success the destination directory is remembered and the output
    /// index advances (when enabled).
    pub fn save_results(
        &mut self,
        destination: Option<&Path>,
        format: ExportFormat,
    ) -> ExtractResult<PathBuf> {
        let Some(loaded) = self.current.as_ref() else {
            return Err(ExtractError::input_validation(
                "INPUT.NO_DATA",
                "No data to save. Please open a file first.",
            ));
        };

        let destination = destination
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.suggested_output_path());
        let written = export_results(&loaded.data, &destination, format)?;

        if let Some(parent) = non_empty_parent(&written) {
            self.settings.remember_last_directory(parent);
        }
        self.settings.advance_index();

        info!(path = %written.display(), format = %format, "results saved");
        Ok(written)
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) -> ExtractResult<()> {
        self.settings.apply_update(update)
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::ExtractorSession;
    use crate::export::ExportFormat;
    use crate::settings::{ExportSettings, JsonSettingsStore, MemorySettingsStore};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const LISTING: &str = "\
 Analysis of Short Ring-Interactions with Cg-Cg Distances < 6.0 Ang.
 ====================================================================
 Cg(I) Res(I)  Cg(J)  [  ARU(J)]     Cg-Cg
 Cg(1)  [1] ->Cg(2)  [ 2656.01] 3.256(12)  0.512  -1.204  3.377 12.3(4)  21.4  19.8 0.045(3)  3.1780(8)  1.145
";

    fn memory_store(directory: PathBuf) -> MemorySettingsStore {
        MemorySettingsStore::with_settings(ExportSettings {
            last_directory: directory,
            ..ExportSettings::default()
        })
    }

    #[test]
    fn save_without_data_is_refused() {
        let temp = TempDir::new().expect("tempdir should be created");
        let store = memory_store(temp.path().to_path_buf());
        let mut session = ExtractorSession::new(&store).expect("session should start");

        let error = session
            .save_results(None, ExportFormat::Text)
            .expect_err("save without data should fail");
        assert_eq!(error.code(), "INPUT.NO_DATA");
        assert_eq!(error.message(), "No data to save. Please open a file first.");
        assert_eq!(store.save_count(), 0);
        assert_eq!(fs::read_dir(temp.path()).expect("readable").count(), 0);
    }

    #[test]
    fn open_remembers_directory_and_save_uses_generated_name() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input_dir = temp.path().join("input");
        fs::create_dir(&input_dir).expect("input dir should be created");
        let report = input_dir.join("sample.lis");
        fs::write(&report, LISTING).expect("listing should be written");

        let store = memory_store(temp.path().to_path_buf());
        let mut session = ExtractorSession::new(&store).expect("session should start");
        let data = session.open_report(&report).expect("report should open");
        assert_eq!(data.ring_interactions().len(), 1);
        assert_eq!(session.settings().last_directory(), input_dir.as_path());

        let written = session
            .save_results(None, ExportFormat::Text)
            .expect("save should succeed");
        assert_eq!(written, input_dir.join("cdextractor_01.txt"));
        assert_eq!(session.settings().current_index(), 2);
        assert!(
            fs::read_to_string(&written)
                .expect("output should be readable")
                .contains("3.256(12)\t0.045(3)\t12.3(4)")
        );
    }

    #[test]
    fn failed_open_keeps_previous_result() {
        let temp = TempDir::new().expect("tempdir should be created");
        let report = temp.path().join("first.lis");
        fs::write(&report, LISTING).expect("listing should be written");

        let store = memory_store(temp.path().to_path_buf());
        let mut session = ExtractorSession::new(&store).expect("session should start");
        session.open_report(&report).expect("report should open");

        let error = session
            .open_report(&temp.path().join("gone.lis"))
            .expect_err("missing report should fail");
        assert_eq!(error.code(), "IO.REPORT_READ");
        let current = session.current().expect("previous result should remain");
        assert_eq!(current.source, report);
    }

    #[test]
    fn unwritable_settings_do_not_fail_open_or_save() {
        let temp = TempDir::new().expect("tempdir should be created");
        let report = temp.path().join("sample.lis");
        fs::write(&report, LISTING).expect("listing should be written");
        let settings_path = temp.path().join("settings.json");

        let mut session = ExtractorSession::new(JsonSettingsStore::new(&settings_path))
            .expect("session should start");
        fs::remove_file(&settings_path).expect("settings file should be removed");
        fs::create_dir(&settings_path).expect("directory should replace settings file");

        let data = session.open_report(&report).expect("open should still succeed");
        assert_eq!(data.ring_interactions().len(), 1);
        assert_eq!(session.current().map(|loaded| &loaded.source), Some(&report));
        assert_eq!(session.settings().last_directory(), temp.path());

        let out_dir = temp.path().join("out");
        fs::create_dir(&out_dir).expect("out dir should be created");
        let written = session
            .save_results(Some(&out_dir.join("contacts")), ExportFormat::Text)
            .expect("save should still succeed");
        assert_eq!(written, out_dir.join("contacts.txt"));
        assert!(written.is_file());
        assert_eq!(session.settings().current_index(), 2);
        assert_eq!(session.settings().last_directory(), out_dir.as_path());
        assert_eq!(
            session.suggested_output_path(),
            out_dir.join("cdextractor_02.txt")
        );
    }
}
