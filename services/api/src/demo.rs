use crate::infra::InMemoryReportArchive;
use camreport::error::AppError;
use camreport::intake::{ReportService, RosterImporter, StoredReport};
use camreport::report::{ReportRequest, StudentIdentity, SubjectScoreInput};
use camreport::subjects::SubjectCatalog;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Student name printed on the card
    #[arg(long)]
    pub(crate) student: String,
    /// Roster CSV with Subject Code,Subject,Score,Coefficient,Comment columns
    #[arg(long)]
    pub(crate) roster_csv: PathBuf,
    /// Candidate number; generated when omitted
    #[arg(long)]
    pub(crate) candidate_number: Option<String>,
    /// Examination centre number
    #[arg(long)]
    pub(crate) center_number: Option<String>,
    /// School name printed on the card
    #[arg(long)]
    pub(crate) school: Option<String>,
    /// Examination session, e.g. "May/June 2026"
    #[arg(long)]
    pub(crate) session: Option<String>,
    /// Write the rendered document here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the full rendered document in the demo output
    #[arg(long)]
    pub(crate) include_document: bool,
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let GenerateArgs {
        student,
        roster_csv,
        candidate_number,
        center_number,
        school,
        session,
        output,
    } = args;

    let subjects = RosterImporter::from_path(&roster_csv)?;
    let request = ReportRequest {
        student: StudentIdentity {
            name: student,
            candidate_number,
            center_number,
            school,
            session,
        },
        subjects,
    };

    let service = demo_service();
    let stored = service.submit(request)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &stored.document)?;
            println!("Report card written to {}", path.display());
            print_overview(&stored);
        }
        None => print!("{}", stored.document),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Report card demo");

    let service = demo_service();
    let stored = service.submit(demo_request())?;

    print_overview(&stored);

    let summary = stored.card.summary();
    println!("\nSubject results");
    for subject in &summary.subjects {
        println!(
            "- {} [{}]: {:.1} -> {} (coeff {:.2}, weighted {:.2}) | {}",
            subject.name,
            subject.code.as_deref().unwrap_or("-"),
            subject.score,
            subject.grade_label,
            subject.coefficient,
            subject.weighted_score,
            subject.comment
        );
    }

    if let Some(strongest) = &summary.insights.strongest_subject {
        println!("Strongest subject: {strongest}");
    }
    if let Some(weakest) = &summary.insights.weakest_subject {
        println!("Needs attention: {weakest}");
    }

    // Round trip through the archive the way the HTTP handlers do.
    let fetched = service.fetch(&stored.report_id)?;
    match serde_json::to_string_pretty(&fetched.archived_view()) {
        Ok(json) => println!("\nArchived listing payload:\n{json}"),
        Err(err) => println!("\nArchived listing payload unavailable: {err}"),
    }

    if args.include_document {
        println!("\n{}", stored.document);
    }

    Ok(())
}

fn demo_service() -> ReportService<InMemoryReportArchive> {
    ReportService::new(
        Arc::new(InMemoryReportArchive::default()),
        SubjectCatalog::cambridge(),
    )
}

fn demo_request() -> ReportRequest {
    let subject = |code: &str, name: &str, score: f64, comment: Option<&str>| SubjectScoreInput {
        code: Some(code.to_string()),
        name: name.to_string(),
        score,
        coefficient: None,
        comment: comment.map(str::to_string),
    };

    ReportRequest {
        student: StudentIdentity {
            name: "Amara Okafor".to_string(),
            candidate_number: None,
            center_number: Some("IA-0042".to_string()),
            school: None,
            session: None,
        },
        subjects: vec![
            subject("0580", "Mathematics", 85.0, Some("Consistently strong")),
            subject("0625", "Physics", 78.0, None),
            subject("0500", "First Language English", 92.0, Some("Outstanding essays")),
        ],
    }
}

fn print_overview(stored: &StoredReport) {
    let student = &stored.card.student;
    println!(
        "Student {} | candidate {} | session {}",
        student.name,
        student.candidate_number.as_deref().unwrap_or("-"),
        student.session.as_deref().unwrap_or("-")
    );
    println!(
        "Overall: weighted average {:.2} -> grade {} | GPA {:.2} -> {} ({})",
        stored.card.overall.weighted_average,
        stored.card.overall.overall_grade.label(),
        stored.card.gpa,
        stored.card.classification.label(),
        stored.card.classification.grade_range()
    );
    println!("Archived as {}", stored.report_id.0);
}
