use crate::domain::{ExtractError, ExtractResult, ParsedData};
use crate::report::format_results;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExtractError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ExtractError::input_validation(
                "INPUT.EXPORT_FORMAT",
                format!("unknown export format '{}'; expected 'text' or 'json'", other),
            )),
        }
    }
}

pub fn render(data: &ParsedData, format: ExportFormat) -> ExtractResult<String> {
    match format {
        ExportFormat::Text => Ok(format_results(data)),
        ExportFormat::Json => serde_json::to_string_pretty(data).map_err(|source| {
            ExtractError::internal(
                "SYS.EXPORT_ENCODE",
                format!("failed to encode results as JSON: {}", source),
            )
        }),
    }
}

/// Appends `.<extension>` unless the file name already ends with it.
///
/// The check ignores case; an existing different extension is kept
/// (`out.dat` becomes `out.dat.txt`).
pub fn with_export_extension(path: &Path, format: ExportFormat) -> PathBuf {
    let extension = format.extension();
    let has_extension = path
        .extension()
        .and_then(|current| current.to_str())
        .is_some_and(|current| current.eq_ignore_ascii_case(extension));
    if has_extension {
        return path.to_path_buf();
    }

    let mut file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    file_name.push(".");
    file_name.push(extension);
    path.with_file_name(file_name)
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, normalize_text_artifact(content))
}

/// Renders `data` and writes it to `destination` (extension normalized).
///
/// Returns the path actually written.
pub fn export_results(
    data: &ParsedData,
    destination: &Path,
    format: ExportFormat,
) -> ExtractResult<PathBuf> {
    let path = with_export_extension(destination, format);
    let content = render(data, format)?;
    write_text_artifact(&path, &content).map_err(|source| {
        ExtractError::io_system(
            "IO.RESULT_WRITE",
            format!("Error saving file '{}': {}", path.display(), source),
        )
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{
        ExportFormat, export_results, normalize_text_artifact, render, with_export_extension,
        write_text_artifact,
    };
    use crate::domain::{ParsedData, RingInteraction};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[test]
    fn export_extension_is_appended_only_when_missing() {
        assert_eq!(
            with_export_extension(Path::new("out/result"), ExportFormat::Text),
            PathBuf::from("out/result.txt")
        );
        assert_eq!(
            with_export_extension(Path::new("out/RESULT.TXT"), ExportFormat::Text),
            PathBuf::from("out/RESULT.TXT")
        );
        assert_eq!(
            with_export_extension(Path::new("out/result.dat"), ExportFormat::Text),
            PathBuf::from("out/result.dat.txt")
        );
        assert_eq!(
            with_export_extension(Path::new("result.txt"), ExportFormat::Json),
            PathBuf::from("result.txt.json")
        );
    }

    #[test]
    fn normalize_text_artifact_uses_canonical_line_endings() {
        let normalized = normalize_text_artifact("alpha\r\nbeta\rgamma");
        assert_eq!(normalized, "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn repeated_text_writes_produce_identical_bytes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("results.txt");
        let input = "line 1\r\nline 2\rline 3";

        write_text_artifact(&path, input).expect("first write should succeed");
        let first = fs::read(&path).expect("artifact should be readable");

        write_text_artifact(&path, input).expect("second write should succeed");
        let second = fs::read(&path).expect("artifact should be readable");

        assert_eq!(first, second);
        assert_eq!(second, b"line 1\nline 2\nline 3\n");
    }

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!("TEXT".parse::<ExportFormat>().expect("text"), ExportFormat::Text);
        assert_eq!("json".parse::<ExportFormat>().expect("json"), ExportFormat::Json);
        let error = "csv".parse::<ExportFormat>().expect_err("csv is not supported");
        assert_eq!(error.code(), "INPUT.EXPORT_FORMAT");
    }

    #[test]
    fn json_export_lists_records_by_table() {
        let data = ParsedData::new(
            vec![RingInteraction::new("3.256(12)", "0.045(3)", "12.3(4)")],
            Vec::new(),
        );
        let rendered = render(&data, ExportFormat::Json).expect("json should render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["ringInteractions"][0]["alpha"], "12.3(4)");
        assert_eq!(value["piInteractions"], serde_json::json!([]));
    }

    #[test]
    fn unwritable_destination_reports_result_write_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let destination = temp.path().join("missing/results");

        let error = export_results(&ParsedData::default(), &destination, ExportFormat::Text)
            .expect_err("missing parent should fail");
        assert_eq!(error.code(), "IO.RESULT_WRITE");
    }
}
