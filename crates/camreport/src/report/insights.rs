use crate::grading::Grade;

use super::domain::GradedSubject;
use super::views::ReportInsights;

/// Strongest/weakest picks compare raw scores, not weighted ones.
pub(crate) fn generate_insights(subjects: &[GradedSubject]) -> ReportInsights {
    let strongest_subject = subjects
        .iter()
        .max_by(|left, right| left.score.total_cmp(&right.score))
        .map(|subject| subject.name.clone());

    let weakest_subject = subjects
        .iter()
        .min_by(|left, right| left.score.total_cmp(&right.score))
        .map(|subject| subject.name.clone());

    let distinction_level_count = subjects
        .iter()
        .filter(|subject| matches!(subject.grade, Grade::AStar | Grade::A))
        .count();

    // Grade E and below sit under the pass threshold on the printed card.
    let below_pass_count = subjects
        .iter()
        .filter(|subject| subject.grade.points() <= Grade::E.points())
        .count();

    ReportInsights {
        strongest_subject,
        weakest_subject,
        distinction_level_count,
        below_pass_count,
    }
}
