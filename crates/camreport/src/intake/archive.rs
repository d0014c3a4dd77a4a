use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::report::ReportCard;
use crate::report::views::ReportCardSummary;

/// Identifier wrapper for archived report cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// An archived card: the computed data plus the rendered document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReport {
    pub report_id: ReportId,
    pub card: ReportCard,
    pub document: String,
    pub archived_at: NaiveDateTime,
}

impl StoredReport {
    /// Compact listing entry for archive browsing.
    pub fn archived_view(&self) -> ArchivedReportView {
        ArchivedReportView {
            report_id: self.report_id.clone(),
            student_name: self.card.student.name.clone(),
            candidate_number: self.card.student.candidate_number.clone(),
            overall_grade: self.card.overall.overall_grade.label(),
            classification: self.card.classification.label(),
            subject_count: self.card.overall.subject_count,
            archived_at: self.archived_at,
        }
    }

    /// Full detail payload for a single-report lookup.
    pub fn detail_view(&self) -> StoredReportView {
        StoredReportView {
            report_id: self.report_id.clone(),
            archived_at: self.archived_at,
            summary: self.card.summary(),
        }
    }
}

/// Storage abstraction so the intake service can be exercised without a
/// real reports directory.
pub trait ReportArchive: Send + Sync {
    fn insert(&self, report: StoredReport) -> Result<StoredReport, ArchiveError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<StoredReport>, ArchiveError>;
    fn list_recent(&self, limit: usize) -> Result<Vec<StoredReport>, ArchiveError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("report already archived")]
    Conflict,
    #[error("report not found")]
    NotFound,
    #[error("archive unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchivedReportView {
    pub report_id: ReportId,
    pub student_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_number: Option<String>,
    pub overall_grade: &'static str,
    pub classification: &'static str,
    pub subject_count: usize,
    pub archived_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredReportView {
    pub report_id: ReportId,
    pub archived_at: NaiveDateTime,
    pub summary: ReportCardSummary,
}
