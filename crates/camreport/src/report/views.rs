use serde::Serialize;

use crate::grading::{Classification, Grade};

use super::domain::StudentIdentity;

/// One graded subject with display labels and 2-dp rounded numbers.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectResultView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    pub score: f64,
    pub coefficient: f64,
    pub grade: Grade,
    pub grade_label: &'static str,
    pub grade_points: f64,
    pub weighted_score: f64,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallSummaryView {
    pub subject_count: usize,
    pub total_weighted_score: f64,
    pub total_coefficient: f64,
    pub weighted_average: f64,
    pub overall_grade: Grade,
    pub overall_grade_label: &'static str,
    pub gpa: f64,
    pub classification: Classification,
    pub classification_label: &'static str,
    pub grade_range: &'static str,
}

/// Reading aids derived from the graded subjects for the printed card.
#[derive(Debug, Clone, Serialize)]
pub struct ReportInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_subject: Option<String>,
    pub distinction_level_count: usize,
    pub below_pass_count: usize,
}

/// Serializable snapshot of a full report card.
#[derive(Debug, Clone, Serialize)]
pub struct ReportCardSummary {
    pub student: StudentIdentity,
    pub subjects: Vec<SubjectResultView>,
    pub overall: OverallSummaryView,
    pub insights: ReportInsights,
}

/// Rounds a display value to two decimal places, absorbing the tail of
/// floating-point summation order.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
