//! Plain-text layout of the printable report card.
//!
//! The renderer works from the summary view only: it never recomputes a
//! grade or an average, it just arranges what the engine produced.

use chrono::NaiveDate;

use super::views::ReportCardSummary;

const PAGE_WIDTH: usize = 72;

/// Renders the full statement-of-results document.
pub fn render_document(summary: &ReportCardSummary, issued_on: NaiveDate) -> String {
    let mut out = String::new();
    let rule = "=".repeat(PAGE_WIDTH);
    let thin_rule = "-".repeat(PAGE_WIDTH);

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center("CAMBRIDGE INTERNATIONAL EXAMINATIONS"));
    out.push_str(&center("STATEMENT OF RESULTS"));
    out.push_str(&rule);
    out.push('\n');

    let student = &summary.student;
    push_field(&mut out, "Student", &student.name);
    push_field(
        &mut out,
        "Candidate Number",
        student.candidate_number.as_deref().unwrap_or("-"),
    );
    push_field(
        &mut out,
        "Centre Number",
        student.center_number.as_deref().unwrap_or("-"),
    );
    push_field(&mut out, "School", student.school.as_deref().unwrap_or("-"));
    push_field(
        &mut out,
        "Examination Session",
        student.session.as_deref().unwrap_or("-"),
    );
    push_field(&mut out, "Date of Issue", &issued_on.format("%d %B %Y").to_string());

    out.push_str(&thin_rule);
    out.push('\n');
    out.push_str(&format!(
        "{:<6} {:<34} {:>6} {:>5} {:>6} {:>9}\n",
        "Code", "Subject", "Score", "Grade", "Coeff", "Weighted"
    ));
    out.push_str(&thin_rule);
    out.push('\n');

    for subject in &summary.subjects {
        out.push_str(&format!(
            "{:<6} {:<34} {:>6.1} {:>5} {:>6.2} {:>9.2}\n",
            subject.code.as_deref().unwrap_or("-"),
            truncate(&subject.name, 34),
            subject.score,
            subject.grade_label,
            subject.coefficient,
            subject.weighted_score,
        ));
    }

    out.push_str(&thin_rule);
    out.push('\n');
    out.push_str(&center("PERFORMANCE SUMMARY"));
    out.push('\n');

    let overall = &summary.overall;
    push_field(&mut out, "Subjects Attempted", &overall.subject_count.to_string());
    push_field(
        &mut out,
        "Total Weighted Score",
        &format!("{:.2}", overall.total_weighted_score),
    );
    push_field(
        &mut out,
        "Total Coefficient",
        &format!("{:.2}", overall.total_coefficient),
    );
    push_field(
        &mut out,
        "Weighted Average",
        &format!("{:.2}", overall.weighted_average),
    );
    push_field(&mut out, "Overall Grade", overall.overall_grade_label);
    push_field(
        &mut out,
        "Grade Point Average",
        &format!("{:.2}", overall.gpa),
    );
    push_field(
        &mut out,
        "Classification",
        &format!(
            "{} (Grade Range {})",
            overall.classification_label, overall.grade_range
        ),
    );

    let insights = &summary.insights;
    if let Some(strongest) = &insights.strongest_subject {
        push_field(&mut out, "Strongest Subject", strongest);
    }
    if let Some(weakest) = &insights.weakest_subject {
        push_field(&mut out, "Needs Attention", weakest);
    }

    if summary.subjects.iter().any(|subject| !subject.comment.is_empty()) {
        out.push('\n');
        out.push_str(&center("SUBJECT COMMENTS"));
        for subject in &summary.subjects {
            if subject.comment.is_empty() {
                continue;
            }
            out.push_str(&format!("{}: {}\n", subject.name, subject.comment));
        }
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:<22} {}\n", format!("{label}:"), value));
}

fn center(text: &str) -> String {
    if text.len() >= PAGE_WIDTH {
        return format!("{text}\n");
    }
    let pad = (PAGE_WIDTH - text.len()) / 2;
    format!("{}{}\n", " ".repeat(pad), text)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{GradeEngine, SubjectEntry};
    use crate::report::domain::{ReportCard, ResolvedSubject, StudentIdentity};

    fn sample_summary() -> ReportCardSummary {
        let engine = GradeEngine::default();
        let rows = vec![
            ResolvedSubject {
                code: Some("0580".to_string()),
                name: "Mathematics".to_string(),
                score: 85.0,
                coefficient: 1.2,
                comment: "Strong algebra work".to_string(),
            },
            ResolvedSubject {
                code: Some("0625".to_string()),
                name: "Physics".to_string(),
                score: 78.0,
                coefficient: 1.2,
                comment: String::new(),
            },
        ];
        let entries: Vec<SubjectEntry> = rows
            .iter()
            .map(|row| SubjectEntry {
                name: row.name.clone(),
                score: row.score,
                coefficient: row.coefficient,
            })
            .collect();
        let outcome = engine.compute_report(&entries).expect("report computes");
        ReportCard::assemble(
            StudentIdentity {
                name: "Jane Student".to_string(),
                candidate_number: Some("CB250001".to_string()),
                center_number: None,
                school: Some("Cambridge International School".to_string()),
                session: Some("May/June 2026".to_string()),
            },
            rows,
            outcome,
        )
        .summary()
    }

    #[test]
    fn document_contains_identity_grades_and_summary() {
        let issued = NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date");
        let document = render_document(&sample_summary(), issued);

        assert!(document.contains("STATEMENT OF RESULTS"));
        assert!(document.contains(&format!("{:<22} Jane Student", "Student:")));
        assert!(document.contains("CB250001"));
        assert!(document.contains("15 June 2026"));
        assert!(document.contains("0580"));
        assert!(document.contains("Mathematics"));
        assert!(document.contains("PERFORMANCE SUMMARY"));
        assert!(document.contains("Strong algebra work"));
    }

    #[test]
    fn blank_identity_fields_render_as_dashes() {
        let mut summary = sample_summary();
        summary.student.candidate_number = None;
        summary.student.school = None;
        let issued = NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date");
        let document = render_document(&summary, issued);
        assert!(document.contains(&format!("{:<22} -", "Candidate Number:")));
        assert!(document.contains(&format!("{:<22} -", "School:")));
    }

    #[test]
    fn comments_section_is_omitted_when_every_comment_is_blank() {
        let mut summary = sample_summary();
        for subject in &mut summary.subjects {
            subject.comment.clear();
        }
        let issued = NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date");
        let document = render_document(&summary, issued);
        assert!(!document.contains("SUBJECT COMMENTS"));
    }
}
