//! Extraction of ring-ring (Cg-Cg) and Y-X...Cg(Pi-Ring) contacts from PLATON
//! `.lis` listings, with text/JSON export and persisted export settings.

pub mod domain;
pub mod export;
pub mod report;
pub mod session;
pub mod settings;

pub use domain::{
    ExtractError, ExtractErrorCategory, ExtractResult, InteractionKind, ParsedData, PiInteraction,
    RingInteraction,
};
pub use export::{ExportFormat, export_results};
pub use report::{parse_report, parse_report_source, read_report};
pub use session::{ExtractorSession, LoadedReport};
pub use settings::{
    ExportSettings, JsonSettingsStore, MemorySettingsStore, SettingsManager, SettingsStore,
    SettingsUpdate,
};
