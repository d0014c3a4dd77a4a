use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::grading::{GradeEngine, SubjectEntry};
use crate::report::{render_document, ReportCard, ReportRequest};
use crate::subjects::SubjectCatalog;

use super::archive::{ArchiveError, ReportArchive, ReportId, StoredReport};
use super::validate::{IntakeGuard, IntakeViolation};

/// School printed when the form leaves the field blank.
pub const DEFAULT_SCHOOL: &str = "Cambridge International School";

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_sequence() -> u64 {
    REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

fn report_id(sequence: u64) -> ReportId {
    ReportId(format!("rpt-{sequence:06}"))
}

/// Candidate numbers follow the `CB<yy><nnnn>` shape of the original
/// registry cards, with a monotonic sequence instead of a random tail.
pub(crate) fn candidate_number(year: i32, sequence: u64) -> String {
    format!("CB{:02}{:04}", year.rem_euclid(100), sequence % 10_000)
}

/// Examination session covering a given date.
pub(crate) fn session_for(date: NaiveDate) -> String {
    let year = date.year();
    match date.month() {
        1..=4 => format!("February/March {year}"),
        5..=8 => format!("May/June {year}"),
        _ => format!("October/November {year}"),
    }
}

/// Validates a request, computes the card, and returns it without
/// touching any archive. The shared entry point for the service and
/// for stateless previews.
pub fn compose_report(
    guard: &IntakeGuard,
    engine: &GradeEngine,
    request: &ReportRequest,
) -> Result<ReportCard, IntakeViolation> {
    let resolved = guard.resolve(request)?;
    let entries: Vec<SubjectEntry> = resolved
        .iter()
        .map(|row| SubjectEntry {
            name: row.name.clone(),
            score: row.score,
            coefficient: row.coefficient,
        })
        .collect();
    let outcome = engine.compute_report(&entries)?;
    Ok(ReportCard::assemble(
        request.student.clone(),
        resolved,
        outcome,
    ))
}

/// Service composing the intake guard, grade engine, and report archive.
pub struct ReportService<A> {
    guard: IntakeGuard,
    engine: GradeEngine,
    archive: Arc<A>,
}

impl<A> ReportService<A>
where
    A: ReportArchive + 'static,
{
    pub fn new(archive: Arc<A>, catalog: SubjectCatalog) -> Self {
        Self::with_engine(archive, catalog, GradeEngine::default())
    }

    pub fn with_engine(archive: Arc<A>, catalog: SubjectCatalog, engine: GradeEngine) -> Self {
        Self {
            guard: IntakeGuard::new(catalog),
            engine,
            archive,
        }
    }

    pub fn catalog(&self) -> &SubjectCatalog {
        self.guard.catalog()
    }

    /// Computes a card without archiving it.
    pub fn compose(&self, request: &ReportRequest) -> Result<ReportCard, IntakeViolation> {
        compose_report(&self.guard, &self.engine, request)
    }

    /// Fills identity defaults, computes the card, renders the printed
    /// document, and archives the lot.
    pub fn submit(&self, request: ReportRequest) -> Result<StoredReport, ReportServiceError> {
        let mut request = request;
        let now = Local::now().naive_local();
        let today = now.date();
        let sequence = next_sequence();

        let identity = &mut request.student;
        if blank(&identity.candidate_number) {
            identity.candidate_number = Some(candidate_number(today.year(), sequence));
        }
        if blank(&identity.school) {
            identity.school = Some(DEFAULT_SCHOOL.to_string());
        }
        if blank(&identity.session) {
            identity.session = Some(session_for(today));
        }

        let card = self.compose(&request)?;
        let document = render_document(&card.summary(), today);

        let stored = StoredReport {
            report_id: report_id(sequence),
            card,
            document,
            archived_at: now,
        };

        Ok(self.archive.insert(stored)?)
    }

    pub fn fetch(&self, id: &ReportId) -> Result<StoredReport, ReportServiceError> {
        let stored = self.archive.fetch(id)?.ok_or(ArchiveError::NotFound)?;
        Ok(stored)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<StoredReport>, ReportServiceError> {
        Ok(self.archive.list_recent(limit)?)
    }
}

fn blank(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|value| value.trim().is_empty())
        .unwrap_or(true)
}

/// Error raised by the report intake service.
#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
