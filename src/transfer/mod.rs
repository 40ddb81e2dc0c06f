//! Spreadsheet interchange: CSV import with per-row error reporting
//! and CSV export of filtered row sets.
//!
//! Column headers speak the operators' language. Import accepts both
//! the spaced and the underscored spelling of each header; export
//! always writes the spaced form.

mod columns;
mod export;
mod import;

pub use export::{export_rows, CsvExport, ExportError};
pub use import::{ImportError, ImportKind, ImportPlan, ImportReport, Importer};
