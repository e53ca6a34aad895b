//! PLATON `.lis` listing reader.
//!
//! Only two sections of the listing are consumed: the short ring-interaction
//! table and the Y-X...Cg(Pi-Ring) table. Everything else is skipped.

pub mod format;
pub mod numbers;
pub mod scanner;
pub mod schema;

pub use format::format_results;
pub use scanner::{TableRow, TableScanner, scan_table};
pub use schema::{ColumnSelection, PI_TABLE, RING_TABLE, TableSchema, schema_for};

use crate::domain::{ExtractError, ExtractResult, ParsedData, PiInteraction, RingInteraction};
use std::fs;
use std::path::Path;
use tracing::info;

pub const REPORT_EXTENSION: &str = "lis";

/// True when `path` names a `.lis` listing (extension compared case-insensitively).
pub fn is_report_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(REPORT_EXTENSION))
}

/// Parses both tables in a single pass over `lines`.
pub fn parse_report<'a, I>(lines: I) -> ParsedData
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ring_scanner = TableScanner::new(&RING_TABLE);
    let mut pi_scanner = TableScanner::new(&PI_TABLE);

    for (index, line) in lines.into_iter().enumerate() {
        ring_scanner.feed(index + 1, line);
        pi_scanner.feed(index + 1, line);
    }

    let ring_interactions = ring_scanner
        .finish()
        .into_iter()
        .map(|row| RingInteraction::new(row.key, row.secondary, row.tertiary))
        .collect::<Vec<_>>();
    let pi_interactions = pi_scanner
        .finish()
        .into_iter()
        .map(|row| PiInteraction::new(row.key, row.secondary, row.tertiary))
        .collect::<Vec<_>>();

    ParsedData::new(ring_interactions, pi_interactions)
}

pub fn parse_report_source(source: &str) -> ParsedData {
    parse_report(source.lines())
}

/// Reads and parses the listing at `path`.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, since
/// older listings are often Latin-1.
pub fn read_report(path: &Path) -> ExtractResult<ParsedData> {
    if !is_report_path(path) {
        return Err(ExtractError::input_validation(
            "INPUT.REPORT_EXTENSION",
            format!("Please select a .lis file (got '{}')", path.display()),
        ));
    }

    let metadata = fs::metadata(path).map_err(|source| {
        ExtractError::io_system(
            "IO.REPORT_READ",
            format!("Error reading file '{}': {}", path.display(), source),
        )
    })?;
    if !metadata.is_file() {
        return Err(ExtractError::io_system(
            "IO.REPORT_READ",
            format!("Error reading file '{}': not a regular file", path.display()),
        ));
    }

    let bytes = fs::read(path).map_err(|source| {
        ExtractError::io_system(
            "IO.REPORT_READ",
            format!("Error reading file '{}': {}", path.display(), source),
        )
    })?;
    let source = String::from_utf8_lossy(&bytes);
    let data = parse_report_source(&source);

    info!(
        path = %path.display(),
        ring_interactions = data.ring_interactions().len(),
        pi_interactions = data.pi_interactions().len(),
        "report parsed"
    );
    Ok(data)
}
