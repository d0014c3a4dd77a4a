use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use camreport::intake::{ArchiveError, ReportArchive, ReportId, StoredReport};
use camreport::subjects::SubjectCatalog;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<SubjectCatalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReportArchive {
    records: Arc<Mutex<HashMap<ReportId, StoredReport>>>,
}

impl ReportArchive for InMemoryReportArchive {
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

/// Archive that mirrors records in memory and writes each rendered
/// document into the reports directory, one timestamped file per card.
pub(crate) struct FileReportArchive {
    directory: PathBuf,
    index: InMemoryReportArchive,
}

impl FileReportArchive {
    pub(crate) fn new(directory: &Path) -> Result<Self, std::io::Error> {
        fs::create_dir_all(directory)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            index: InMemoryReportArchive::default(),
        })
    }

    fn document_path(&self, report: &StoredReport) -> PathBuf {
        let file_name = format!(
            "report_{}_{}.txt",
            report.archived_at.format("%Y%m%d_%H%M%S"),
            report.report_id.0
        );
        self.directory.join(file_name)
    }
}

impl ReportArchive for FileReportArchive {
    fn insert(&self, report: StoredReport) -> Result<StoredReport, ArchiveError> {
        let path = self.document_path(&report);
        fs::write(&path, &report.document)
            .map_err(|err| ArchiveError::Unavailable(format!("{}: {err}", path.display())))?;
        self.index.insert(report)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<StoredReport>, ArchiveError> {
        self.index.fetch(id)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<StoredReport>, ArchiveError> {
        self.index.list_recent(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camreport::intake::ReportService;
    use camreport::report::{ReportRequest, StudentIdentity, SubjectScoreInput};

    fn sample_request() -> ReportRequest {
        ReportRequest {
            student: StudentIdentity {
                name: "Test Student".to_string(),
                ..StudentIdentity::default()
            },
            subjects: vec![SubjectScoreInput {
                code: Some("0580".to_string()),
                name: "Mathematics".to_string(),
                score: 85.0,
                coefficient: None,
                comment: None,
            }],
        }
    }

    #[test]
    fn file_archive_writes_one_document_per_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let archive =
            Arc::new(FileReportArchive::new(dir.path()).expect("archive directory created"));
        let service = ReportService::new(archive.clone(), SubjectCatalog::cambridge());

        let stored = service.submit(sample_request()).expect("report archives");

        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("reports directory readable")
            .collect();
        assert_eq!(entries.len(), 1);

        let path = entries[0].as_ref().expect("dir entry").path();
        let written = fs::read_to_string(path).expect("document readable");
        assert_eq!(written, stored.document);

        let fetched = archive
            .fetch(&stored.report_id)
            .expect("index reachable")
            .expect("record indexed");
        assert_eq!(fetched.report_id, stored.report_id);
    }
}
