//! json2xlsx - Player-profile JSON to Excel report converter
//!
//! This crate converts game-character-profile JSON documents (a player, their
//! equipment cubes, and a roster of characters with skills and equipment
//! effects) into Excel workbooks with two sheets:
//!
//! - `基本信息`: player name, synchro level, and the levels of the two tracked cubes
//! - `角色信息`: one row per character with its record fields and equipment
//!   effects summed into nine fixed stat categories
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use json2xlsx::{transform_str, write_report};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = std::fs::read_to_string("profile.json")?;
//!
//!     // Aggregate the profile into the two report tables
//!     let report = transform_str(&text)?;
//!
//!     // Effects with non-numeric values are skipped and reported here
//!     for warning in &report.warnings {
//!         println!("{}", warning);
//!     }
//!
//!     write_report(&report, "profile.xlsx")?;
//!     Ok(())
//! }
//! ```
//!
//! # Batch Conversion
//!
//! `BatchConverter` processes every `.json` file in an `input` directory and
//! writes one `.xlsx` per file into an `output` directory beside it:
//!
//! ```rust,no_run
//! use json2xlsx::{BatchBuilder, BatchOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = BatchBuilder::new()
//!         .with_base_dir("/data/profiles")
//!         .build()?;
//!
//!     if let BatchOutcome::Completed(summary) = converter.run(|_| {})? {
//!         println!("{} / {}", summary.succeeded(), summary.total());
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod output;
mod report;
mod transform;
mod types;

// 公開API
pub use api::{StatCategory, TrackedCube};
pub use builder::{
    BatchBuilder, BatchConverter, BatchEvent, BatchOutcome, BatchSummary, FileOutcome, Prepared,
    INPUT_DIR_NAME, OUTPUT_DIR_NAME,
};
pub use error::JsonToXlsxError;
pub use output::{build_workbook, report_to_buffer, write_report};
pub use report::{
    character_headers, round2, summary_headers, CharacterRow, EffectWarning, ParseIssue,
    ProfileReport, StatTotals, SummaryRow, Table, CHARACTER_FIELD_HEADERS, CHARACTER_SHEET,
    NO_DATA_MARKER, SUMMARY_SHEET,
};
pub use transform::{decode_profile, parse_effect_value, transform, transform_str};
pub use types::{
    CellValue, CharacterRecord, CubeRecord, EffectRecord, Field, Object, OrderedMap,
    PlayerProfile, Record, NOT_AVAILABLE,
};
