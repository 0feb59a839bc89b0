pub mod config;
pub mod due;
pub mod export;
pub mod logging;
pub mod render;
pub mod report;
pub mod task;

pub use config::{ConfigError, ReportConfig};
pub use due::{BLANK_TIME, DateStyle, ParsedDue, parse_due};
pub use export::{
    CommandSource, ExportError, ExportResult, ExportSource, FileSource, ReaderSource, ScratchFile,
};
pub use render::{OutputFormat, render_text_table, write_csv, write_json, write_report};
pub use report::{
    ReportOptions, ReportRow, ReportSummary, Status, TaskFilter, build_report,
    build_report_with_summary,
};
pub use task::{TaskRecord, read_task_records};
