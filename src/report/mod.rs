//! Investment holdings report: row expansion, projection, rendering, and
//! orchestration.

pub mod fields;
pub mod render;
pub mod rows;
mod service;

pub use fields::{header, project, CompanyDirectory, OutputRecord, FIELDS};
pub use render::render_csv;
pub use rows::{expand_rows, Row};
pub use service::{build_report, GeneratedReport, ReportService, ReportStage};
