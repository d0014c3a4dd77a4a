//! Report card assembly, summary views, and document rendering.

mod domain;
mod insights;
mod render;
mod summary;
pub mod views;

pub use domain::{
    GradedSubject, ReportCard, ReportRequest, ResolvedSubject, StudentIdentity, SubjectScoreInput,
};
pub use render::render_document;
