use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::intake::{
    ArchiveError, IntakeGuard, ReportArchive, ReportId, ReportService, StoredReport,
};
use crate::report::{ReportRequest, StudentIdentity, SubjectScoreInput};
use crate::subjects::SubjectCatalog;

pub(super) fn student(name: &str) -> StudentIdentity {
    StudentIdentity {
        name: name.to_string(),
        ..StudentIdentity::default()
    }
}

pub(super) fn subject(
    code: Option<&str>,
    name: &str,
    score: f64,
    coefficient: Option<f64>,
) -> SubjectScoreInput {
    SubjectScoreInput {
        code: code.map(str::to_string),
        name: name.to_string(),
        score,
        coefficient,
        comment: None,
    }
}

pub(super) fn request(subjects: Vec<SubjectScoreInput>) -> ReportRequest {
    ReportRequest {
        student: student("Jane Student"),
        subjects,
    }
}

pub(super) fn passing_request() -> ReportRequest {
    request(vec![
        subject(Some("0580"), "Mathematics", 85.0, None),
        subject(Some("0625"), "Physics", 78.0, None),
        subject(Some("0500"), "First Language English", 92.0, None),
    ])
}

pub(super) fn guard() -> IntakeGuard {
    IntakeGuard::new(SubjectCatalog::cambridge())
}

pub(super) fn build_service() -> (Arc<ReportService<MemoryArchive>>, Arc<MemoryArchive>) {
    let archive = Arc::new(MemoryArchive::default());
    let service = Arc::new(ReportService::new(
        archive.clone(),
        SubjectCatalog::cambridge(),
    ));
    (service, archive)
}

#[derive(Default, Clone)]
pub(super) struct MemoryArchive {
    records: Arc<Mutex<HashMap<ReportId, StoredReport>>>,
}

impl ReportArchive for MemoryArchive {
    fn insert(&self, report: StoredReport) -> Result<StoredReport, ArchiveError> {
        let mut guard = self.records.lock().expect("archive mutex poisoned");
        if guard.contains_key(&report.report_id) {
            return Err(ArchiveError::Conflict);
        }
        guard.insert(report.report_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<StoredReport>, ArchiveError> {
        let guard = self.records.lock().expect("archive mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<StoredReport>, ArchiveError> {
        let guard = self.records.lock().expect("archive mutex poisoned");
        let mut reports: Vec<StoredReport> = guard.values().cloned().collect();
        reports.sort_by(|left, right| right.archived_at.cmp(&left.archived_at));
        reports.truncate(limit);
        Ok(reports)
    }
}

pub(super) struct UnavailableArchive;

impl ReportArchive for UnavailableArchive {
    fn insert(&self, _report: StoredReport) -> Result<StoredReport, ArchiveError> {
        Err(ArchiveError::Unavailable("reports directory offline".to_string()))
    }

    fn fetch(&self, _id: &ReportId) -> Result<Option<StoredReport>, ArchiveError> {
        Err(ArchiveError::Unavailable("reports directory offline".to_string()))
    }

    fn list_recent(&self, _limit: usize) -> Result<Vec<StoredReport>, ArchiveError> {
        Err(ArchiveError::Unavailable("reports directory offline".to_string()))
    }
}
