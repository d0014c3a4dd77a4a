//! CSV roster import.
//!
//! Accepts the spreadsheet export teachers already keep:
//! `Subject Code,Subject,Score,Coefficient,Comment`, one row per
//! subject. Code, coefficient, and comment columns are optional and
//! empty cells are treated as absent.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::report::SubjectScoreInput;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Empty => write!(f, "roster contains no subject rows"),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Empty => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<SubjectScoreInput>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SubjectScoreInput>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut subjects = Vec::new();
        for row in csv_reader.deserialize::<RosterRow>() {
            let row = row?;
            subjects.push(row.into_input());
        }

        if subjects.is_empty() {
            return Err(RosterImportError::Empty);
        }

        Ok(subjects)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(
        rename = "Subject Code",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    code: Option<String>,
    #[serde(rename = "Subject", default)]
    subject: String,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Coefficient", default)]
    coefficient: Option<f64>,
    #[serde(
        rename = "Comment",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    comment: Option<String>,
}

impl RosterRow {
    fn into_input(self) -> SubjectScoreInput {
        SubjectScoreInput {
            code: self.code,
            name: self.subject,
            score: self.score,
            coefficient: self.coefficient,
            comment: self.comment,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
