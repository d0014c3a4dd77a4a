//! Report intake: form validation, roster import, computation, and
//! archival of finished cards.

mod archive;
mod roster;
pub mod router;
mod service;
mod validate;

#[cfg(test)]
mod tests;

pub use archive::{
    ArchiveError, ArchivedReportView, ReportArchive, ReportId, StoredReport, StoredReportView,
};
pub use roster::{RosterImportError, RosterImporter};
pub use router::report_router;
pub use service::{
    compose_report, ReportService, ReportServiceError, DEFAULT_SCHOOL,
};
pub use validate::{IntakeGuard, IntakeViolation, DEFAULT_COMMENT, MAX_SUBJECTS};
