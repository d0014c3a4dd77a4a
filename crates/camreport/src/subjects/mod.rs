//! Static subject reference table.
//!
//! The catalog maps Cambridge syllabus codes to subject names and default
//! coefficients. It is loaded once and never mutated afterwards; a
//! coefficient override produces a new catalog value so concurrent
//! readers of the original are never affected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One catalog entry: syllabus code, display name, default coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub code: String,
    pub name: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown subject code {code}")]
    UnknownSubject { code: String },
    #[error("coefficient {value} for {code} must be positive")]
    InvalidCoefficient { code: String, value: f64 },
}

/// Immutable code-keyed subject table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectCatalog {
    subjects: BTreeMap<String, SubjectInfo>,
}

/// The standard Cambridge syllabus table with official coefficients.
const CAMBRIDGE_SUBJECTS: &[(&str, &str, f64)] = &[
    // Mathematics
    ("0580", "Mathematics", 1.2),
    ("0606", "Additional Mathematics", 1.3),
    ("9709", "Mathematics (A Level)", 1.5),
    // Sciences
    ("0620", "Chemistry", 1.2),
    ("0625", "Physics", 1.2),
    ("0610", "Biology", 1.2),
    ("0654", "Co-ordinated Sciences (Double Award)", 1.1),
    ("0653", "Combined Science", 1.1),
    ("9701", "Chemistry (A Level)", 1.5),
    ("9702", "Physics (A Level)", 1.5),
    ("9700", "Biology (A Level)", 1.5),
    // Languages - English
    ("0500", "First Language English", 1.3),
    ("0510", "English as a Second Language", 1.2),
    ("0522", "First Language English (US)", 1.3),
    ("9093", "English Language (A Level)", 1.4),
    ("9695", "Literature in English (A Level)", 1.4),
    // Languages - other
    ("0520", "French", 1.1),
    ("0530", "Spanish", 1.1),
    ("0525", "German", 1.1),
    ("0515", "Arabic", 1.1),
    ("0547", "Mandarin Chinese", 1.1),
    ("0518", "Hindi", 1.1),
    // Humanities
    ("0470", "History", 1.2),
    ("0460", "Geography", 1.2),
    ("0495", "Sociology", 1.1),
    ("9489", "History (A Level)", 1.4),
    ("9696", "Geography (A Level)", 1.4),
    // Business and economics
    ("0450", "Business Studies", 1.2),
    ("0455", "Economics", 1.2),
    ("0452", "Accounting", 1.2),
    ("9707", "Business Studies (A Level)", 1.4),
    ("9708", "Economics (A Level)", 1.4),
    // Computing
    ("0478", "Computer Science", 1.3),
    ("0417", "Information and Communication Technology", 1.2),
    ("9618", "Computer Science (A Level)", 1.5),
    ("9626", "Information Technology (A Level)", 1.4),
    // Arts and design
    ("0400", "Art & Design", 1.0),
    ("0410", "Music", 1.0),
    ("0419", "Food and Nutrition", 1.0),
    ("0445", "Design and Technology", 1.1),
    ("9479", "Art & Design (A Level)", 1.2),
    // Physical education
    ("0413", "Physical Education", 1.0),
    ("9396", "Physical Education (A Level)", 1.2),
    // Additional subjects
    ("0490", "Religious Studies", 1.0),
    ("0509", "First Language Chinese", 1.2),
    ("0544", "Arabic (Foreign Language)", 1.1),
    ("0549", "Hindi as a Second Language", 1.1),
    // Environmental and global studies
    ("0680", "Environmental Management", 1.1),
    ("0457", "Global Perspectives", 1.0),
    // Psychology and philosophy
    ("9990", "Psychology (A Level)", 1.4),
    ("9774", "Philosophy (A Level)", 1.3),
    // Media
    ("0607", "Media Studies", 1.0),
    ("9607", "Media Studies (A Level)", 1.3),
];

/// Coefficient applied when a subject is unknown to the catalog.
pub const FALLBACK_COEFFICIENT: f64 = 1.0;

impl SubjectCatalog {
    /// Loads the standard Cambridge table.
    pub fn cambridge() -> Self {
        let subjects = CAMBRIDGE_SUBJECTS
            .iter()
            .map(|(code, name, coefficient)| {
                (
                    (*code).to_string(),
                    SubjectInfo {
                        code: (*code).to_string(),
                        name: (*name).to_string(),
                        coefficient: *coefficient,
                    },
                )
            })
            .collect();
        Self { subjects }
    }

    pub fn get(&self, code: &str) -> Option<&SubjectInfo> {
        self.subjects.get(code.trim())
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&SubjectInfo> {
        let wanted = name.trim();
        self.subjects
            .values()
            .find(|subject| subject.name.eq_ignore_ascii_case(wanted))
    }

    /// Default coefficient for an intake row: the code wins over the
    /// name, and unknown subjects fall back to 1.0 so ad-hoc subjects
    /// can still be graded.
    pub fn default_coefficient(&self, code: Option<&str>, name: &str) -> f64 {
        if let Some(code) = code {
            if let Some(subject) = self.get(code) {
                return subject.coefficient;
            }
        }
        self.find_by_name(name)
            .map(|subject| subject.coefficient)
            .unwrap_or(FALLBACK_COEFFICIENT)
    }

    /// Returns a new catalog with one coefficient overridden. The
    /// receiver is left untouched.
    pub fn with_coefficient(&self, code: &str, value: f64) -> Result<Self, CatalogError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CatalogError::InvalidCoefficient {
                code: code.to_string(),
                value,
            });
        }

        let mut subjects = self.subjects.clone();
        match subjects.get_mut(code) {
            Some(subject) => subject.coefficient = value,
            None => {
                return Err(CatalogError::UnknownSubject {
                    code: code.to_string(),
                })
            }
        }

        Ok(Self { subjects })
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &SubjectInfo> {
        self.subjects.values()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
