//! Aggregate percentage series over finished evaluations.

pub mod router;
pub mod service;

pub use router::report_router;
pub use service::{DepartmentReport, ReportBar, ReportError, ReportPoint, ReportService};
