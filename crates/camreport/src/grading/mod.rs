//! The grade/weight calculation engine.
//!
//! Pure functions over immutable tables: score-to-grade lookup,
//! coefficient-weighted averaging, and whole-report computation. The
//! engine performs no I/O and holds no mutable state, so a single
//! instance can be shared freely across threads.

mod classification;
mod scale;

pub use classification::{grade_point_average, Classification};
pub use scale::{Grade, GradeBand, GradeScale, ScaleError};

use std::fmt;

use serde::{Deserialize, Serialize};

/// One subject's marks as submitted for grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub score: f64,
    pub coefficient: f64,
}

/// One subject's computed outcome. `weighted_score` is always
/// `score * coefficient`; it is never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub name: String,
    pub score: f64,
    pub coefficient: f64,
    pub grade: Grade,
    pub weighted_score: f64,
}

/// Aggregate across every subject in one report request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallResult {
    pub total_weighted_score: f64,
    pub total_coefficient: f64,
    pub weighted_average: f64,
    pub overall_grade: Grade,
    pub subject_count: usize,
}

/// Full engine output for one request, subject order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub subjects: Vec<SubjectResult>,
    pub overall: OverallResult,
}

/// Validation failure raised while grading. All grading failures are
/// input failures; nothing is transient and nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum GradingError {
    InvalidScore { subject: Option<String>, value: f64 },
    InvalidCoefficient { subject: Option<String>, value: f64 },
}

impl GradingError {
    /// The subject the failure was raised for, when known.
    pub fn subject(&self) -> Option<&str> {
        match self {
            GradingError::InvalidScore { subject, .. }
            | GradingError::InvalidCoefficient { subject, .. } => subject.as_deref(),
        }
    }
}

impl fmt::Display for GradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingError::InvalidScore {
                subject: Some(subject),
                value,
            } => write!(
                f,
                "invalid score {value} for {subject}: marks must be between 0 and 100"
            ),
            GradingError::InvalidScore {
                subject: None,
                value,
            } => write!(f, "invalid score {value}: marks must be between 0 and 100"),
            GradingError::InvalidCoefficient {
                subject: Some(subject),
                value,
            } => write!(
                f,
                "invalid coefficient {value} for {subject}: coefficients must be positive"
            ),
            GradingError::InvalidCoefficient {
                subject: None,
                value,
            } => write!(
                f,
                "invalid coefficient {value}: coefficients must be positive"
            ),
        }
    }
}

impl std::error::Error for GradingError {}

/// Coefficient-weighted arithmetic mean over `(score, coefficient)`
/// pairs. Returns 0.0 for an empty slice or a non-positive coefficient
/// sum rather than dividing by zero.
pub fn weighted_average(entries: &[(f64, f64)]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_coefficient = 0.0;

    for (score, coefficient) in entries {
        weighted_sum += score * coefficient;
        total_coefficient += coefficient;
    }

    if total_coefficient <= 0.0 {
        return 0.0;
    }

    weighted_sum / total_coefficient
}

/// Stateless grader applying one immutable [`GradeScale`].
#[derive(Debug, Clone)]
pub struct GradeEngine {
    scale: GradeScale,
}

impl Default for GradeEngine {
    fn default() -> Self {
        Self::new(GradeScale::cambridge())
    }
}

impl GradeEngine {
    pub fn new(scale: GradeScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> &GradeScale {
        &self.scale
    }

    /// Converts a raw score into its letter grade. Out-of-range and
    /// non-finite input is rejected explicitly instead of being
    /// silently mislabelled as a failing grade.
    pub fn score_to_grade(&self, score: f64) -> Result<Grade, GradingError> {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(GradingError::InvalidScore {
                subject: None,
                value: score,
            });
        }

        self.scale
            .grade_for(score)
            .ok_or(GradingError::InvalidScore {
                subject: None,
                value: score,
            })
    }

    /// Grades every subject and aggregates the weighted average.
    ///
    /// Validation is fail-fast: the first invalid entry aborts the whole
    /// call with the offending subject named, and no partial result is
    /// returned. An empty list is not an error and yields an average of
    /// 0.0 with an overall grade of U.
    pub fn compute_report(&self, subjects: &[SubjectEntry]) -> Result<ReportOutcome, GradingError> {
        for entry in subjects {
            if !entry.score.is_finite() || !(0.0..=100.0).contains(&entry.score) {
                return Err(GradingError::InvalidScore {
                    subject: Some(entry.name.clone()),
                    value: entry.score,
                });
            }
            if !entry.coefficient.is_finite() || entry.coefficient <= 0.0 {
                return Err(GradingError::InvalidCoefficient {
                    subject: Some(entry.name.clone()),
                    value: entry.coefficient,
                });
            }
        }

        let mut results = Vec::with_capacity(subjects.len());
        for entry in subjects {
            let grade = self.score_to_grade(entry.score)?;
            results.push(SubjectResult {
                name: entry.name.clone(),
                score: entry.score,
                coefficient: entry.coefficient,
                grade,
                weighted_score: entry.score * entry.coefficient,
            });
        }

        let pairs: Vec<(f64, f64)> = subjects
            .iter()
            .map(|entry| (entry.score, entry.coefficient))
            .collect();
        let average = weighted_average(&pairs);
        let overall_grade = self.score_to_grade(average)?;

        let overall = OverallResult {
            total_weighted_score: results.iter().map(|result| result.weighted_score).sum(),
            total_coefficient: subjects.iter().map(|entry| entry.coefficient).sum(),
            weighted_average: average,
            overall_grade,
            subject_count: subjects.len(),
        };

        Ok(ReportOutcome {
            subjects: results,
            overall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GradeEngine {
        GradeEngine::default()
    }

    fn entry(name: &str, score: f64, coefficient: f64) -> SubjectEntry {
        SubjectEntry {
            name: name.to_string(),
            score,
            coefficient,
        }
    }

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn band_boundaries_grade_as_published() {
        let engine = engine();
        assert_eq!(engine.score_to_grade(100.0), Ok(Grade::AStar));
        assert_eq!(engine.score_to_grade(90.0), Ok(Grade::AStar));
        assert_eq!(engine.score_to_grade(89.0), Ok(Grade::A));
        assert_eq!(engine.score_to_grade(20.0), Ok(Grade::G));
        assert_eq!(engine.score_to_grade(19.0), Ok(Grade::U));
        assert_eq!(engine.score_to_grade(0.0), Ok(Grade::U));
    }

    #[test]
    fn out_of_range_scores_are_rejected_not_mislabelled() {
        let engine = engine();
        for score in [-0.5, 100.5, 1000.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                engine.score_to_grade(score),
                Err(GradingError::InvalidScore { subject: None, .. })
            ));
        }
    }

    #[test]
    fn weighted_average_of_nothing_is_zero() {
        assert_eq!(weighted_average(&[]), 0.0);
    }

    #[test]
    fn equal_coefficients_reduce_to_a_plain_mean() {
        assert_eq!(weighted_average(&[(80.0, 1.0), (60.0, 1.0)]), 70.0);
    }

    #[test]
    fn coefficients_actually_weight_the_mean() {
        let average = weighted_average(&[(100.0, 2.0), (50.0, 1.0)]);
        assert!(close(average, 250.0 / 3.0));
        assert!((average * 100.0).round() / 100.0 == 83.33);
    }

    #[test]
    fn empty_report_is_defined_not_a_fault() {
        let outcome = engine().compute_report(&[]).expect("empty report computes");
        assert_eq!(outcome.overall.subject_count, 0);
        assert_eq!(outcome.overall.weighted_average, 0.0);
        assert_eq!(outcome.overall.overall_grade, Grade::U);
        assert!(outcome.subjects.is_empty());
    }

    #[test]
    fn report_preserves_input_order() {
        let outcome = engine()
            .compute_report(&[entry("Mathematics", 80.0, 1.2), entry("Art & Design", 90.0, 1.0)])
            .expect("report computes");
        assert_eq!(outcome.subjects[0].name, "Mathematics");
        assert_eq!(outcome.subjects[1].name, "Art & Design");
    }

    #[test]
    fn report_matches_worked_example() {
        let outcome = engine()
            .compute_report(&[
                entry("Mathematics", 85.0, 1.2),
                entry("Physics", 78.0, 1.2),
                entry("First Language English", 92.0, 1.3),
            ])
            .expect("report computes");

        assert!(close(outcome.subjects[0].weighted_score, 102.0));
        assert!(close(outcome.subjects[1].weighted_score, 93.6));
        assert!(close(outcome.subjects[2].weighted_score, 119.6));
        assert!(close(outcome.overall.total_weighted_score, 315.2));
        assert!(close(outcome.overall.total_coefficient, 3.7));
        assert!(close(outcome.overall.weighted_average, 315.2 / 3.7));
        assert_eq!(
            (outcome.overall.weighted_average * 100.0).round() / 100.0,
            85.19
        );
        assert_eq!(outcome.overall.overall_grade, Grade::A);
    }

    #[test]
    fn invalid_score_names_the_subject_and_aborts_the_call() {
        let error = engine()
            .compute_report(&[
                entry("Mathematics", 85.0, 1.2),
                entry("Chemistry", 105.0, 1.0),
            ])
            .expect_err("105 is out of range");
        assert_eq!(
            error,
            GradingError::InvalidScore {
                subject: Some("Chemistry".to_string()),
                value: 105.0,
            }
        );
    }

    #[test]
    fn non_positive_coefficient_is_rejected() {
        let error = engine()
            .compute_report(&[entry("Biology", 70.0, 0.0)])
            .expect_err("zero coefficient is invalid");
        assert!(matches!(
            error,
            GradingError::InvalidCoefficient { ref subject, .. } if subject.as_deref() == Some("Biology")
        ));
    }

    #[test]
    fn computation_is_idempotent() {
        let subjects = vec![
            entry("History", 64.0, 1.2),
            entry("Geography", 58.0, 1.2),
            entry("French", 71.0, 1.1),
        ];
        let first = engine().compute_report(&subjects).expect("first pass");
        let second = engine().compute_report(&subjects).expect("second pass");
        assert_eq!(first, second);
    }

    #[test]
    fn ungraded_subjects_still_count_in_the_weighted_average() {
        let outcome = engine()
            .compute_report(&[entry("Music", 10.0, 1.0), entry("Drama", 90.0, 1.0)])
            .expect("report computes");
        assert_eq!(outcome.subjects[0].grade, Grade::U);
        assert_eq!(outcome.overall.weighted_average, 50.0);
    }
}
