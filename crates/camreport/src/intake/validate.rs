use crate::grading::GradingError;
use crate::report::{ReportRequest, ResolvedSubject};
use crate::subjects::SubjectCatalog;

/// The printed card fits at most this many subject rows.
pub const MAX_SUBJECTS: usize = 8;

/// Comment printed when a teacher leaves the comment field blank.
pub const DEFAULT_COMMENT: &str = "Good effort";

/// Form-level rejection raised before or while grading. These map to a
/// 422 at the HTTP boundary so the form can be re-presented with the
/// offending field named.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("student name is required")]
    MissingStudentName,
    #[error("a subject row needs a name or a known syllabus code")]
    MissingSubjectName,
    #[error("at least one subject with a score is required")]
    NoSubjects,
    #[error("a report card covers at most {limit} subjects")]
    TooManySubjects { limit: usize },
    #[error("unknown subject code {code}")]
    UnknownSubjectCode { code: String },
    #[error(transparent)]
    Grading(#[from] GradingError),
}

/// Validates raw requests and fills catalog defaults, producing rows
/// the engine can grade without further lookups.
#[derive(Debug, Clone)]
pub struct IntakeGuard {
    catalog: SubjectCatalog,
}

impl IntakeGuard {
    pub fn new(catalog: SubjectCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SubjectCatalog {
        &self.catalog
    }

    /// Checks the request shape and resolves every subject row. Scores
    /// themselves are validated by the engine so the failure carries
    /// the subject name either way.
    pub fn resolve(&self, request: &ReportRequest) -> Result<Vec<ResolvedSubject>, IntakeViolation> {
        if request.student.name.trim().is_empty() {
            return Err(IntakeViolation::MissingStudentName);
        }
        if request.subjects.is_empty() {
            return Err(IntakeViolation::NoSubjects);
        }
        if request.subjects.len() > MAX_SUBJECTS {
            return Err(IntakeViolation::TooManySubjects {
                limit: MAX_SUBJECTS,
            });
        }

        let mut resolved = Vec::with_capacity(request.subjects.len());
        for input in &request.subjects {
            let code = input
                .code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty());

            let catalog_entry = match code {
                Some(code) => Some(self.catalog.get(code).ok_or_else(|| {
                    IntakeViolation::UnknownSubjectCode {
                        code: code.to_string(),
                    }
                })?),
                None => None,
            };

            let name = match (input.name.trim(), catalog_entry) {
                ("", Some(entry)) => entry.name.clone(),
                ("", None) => return Err(IntakeViolation::MissingSubjectName),
                (name, _) => name.to_string(),
            };

            let coefficient = input
                .coefficient
                .unwrap_or_else(|| self.catalog.default_coefficient(code, &name));

            let comment = input
                .comment
                .as_deref()
                .map(str::trim)
                .filter(|comment| !comment.is_empty())
                .unwrap_or(DEFAULT_COMMENT)
                .to_string();

            resolved.push(ResolvedSubject {
                code: code.map(str::to_string),
                name,
                score: input.score,
                coefficient,
                comment,
            });
        }

        Ok(resolved)
    }
}
