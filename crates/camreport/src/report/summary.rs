use super::domain::ReportCard;
use super::insights::generate_insights;
use super::views::{round2, OverallSummaryView, ReportCardSummary, SubjectResultView};

impl ReportCard {
    /// Produces the serializable snapshot used by the API and the
    /// document renderer. All fractional numbers are rounded to two
    /// decimal places here; the underlying card keeps raw values.
    pub fn summary(&self) -> ReportCardSummary {
        let subjects = self
            .subjects
            .iter()
            .map(|subject| SubjectResultView {
                code: subject.code.clone(),
                name: subject.name.clone(),
                score: round2(subject.score),
                coefficient: subject.coefficient,
                grade: subject.grade,
                grade_label: subject.grade.label(),
                grade_points: subject.grade.grade_points(),
                weighted_score: round2(subject.weighted_score),
                comment: subject.comment.clone(),
            })
            .collect();

        let overall = OverallSummaryView {
            subject_count: self.overall.subject_count,
            total_weighted_score: round2(self.overall.total_weighted_score),
            total_coefficient: round2(self.overall.total_coefficient),
            weighted_average: round2(self.overall.weighted_average),
            overall_grade: self.overall.overall_grade,
            overall_grade_label: self.overall.overall_grade.label(),
            gpa: round2(self.gpa),
            classification: self.classification,
            classification_label: self.classification.label(),
            grade_range: self.classification.grade_range(),
        };

        ReportCardSummary {
            student: self.student.clone(),
            subjects,
            overall,
            insights: generate_insights(&self.subjects),
        }
    }
}
