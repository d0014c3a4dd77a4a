use serde::{Deserialize, Serialize};

use crate::grading::{
    grade_point_average, Classification, Grade, OverallResult, ReportOutcome,
};

/// Student identity fields carried through to the printed card. The core
/// never interprets them; missing values are filled in by the intake
/// service or left blank by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

/// One subject row exactly as submitted by a form or roster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScoreInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A full report request: who the card is for and their marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub student: StudentIdentity,
    pub subjects: Vec<SubjectScoreInput>,
}

/// An intake row after validation and catalog defaulting: every field
/// is present and the coefficient is known to be positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSubject {
    pub code: Option<String>,
    pub name: String,
    pub score: f64,
    pub coefficient: f64,
    pub comment: String,
}

/// One graded subject on the finished card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedSubject {
    pub code: Option<String>,
    pub name: String,
    pub score: f64,
    pub coefficient: f64,
    pub grade: Grade,
    pub weighted_score: f64,
    pub comment: String,
}

/// A complete computed report card, ready for rendering or archival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    pub student: StudentIdentity,
    pub subjects: Vec<GradedSubject>,
    pub overall: OverallResult,
    pub gpa: f64,
    pub classification: Classification,
}

impl ReportCard {
    /// Joins resolved intake rows with the engine outcome computed from
    /// them. The two sequences share one origin and therefore one order.
    pub fn assemble(
        student: StudentIdentity,
        resolved: Vec<ResolvedSubject>,
        outcome: ReportOutcome,
    ) -> Self {
        let subjects: Vec<GradedSubject> = resolved
            .into_iter()
            .zip(outcome.subjects)
            .map(|(input, result)| GradedSubject {
                code: input.code,
                name: result.name,
                score: result.score,
                coefficient: result.coefficient,
                grade: result.grade,
                weighted_score: result.weighted_score,
                comment: input.comment,
            })
            .collect();

        let grades: Vec<Grade> = subjects.iter().map(|subject| subject.grade).collect();
        let gpa = grade_point_average(&grades);

        Self {
            student,
            subjects,
            overall: outcome.overall,
            gpa,
            classification: Classification::from_gpa(gpa),
        }
    }
}
