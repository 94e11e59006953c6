//! Report generation: aggregation, table rendering and progress display

pub mod builder;
pub mod progress;
pub mod table;

pub use builder::{ReportError, ReportRow, RowTier, build_report, distinct_package_names};
pub use table::render_table;
