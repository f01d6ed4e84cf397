mod export;
mod summary;
pub mod views;

pub use export::{doctor_summary_csv, render_doctor_view};
pub use summary::RosterReport;

/// Rendering failures; these never come from the roster itself.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV report: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
