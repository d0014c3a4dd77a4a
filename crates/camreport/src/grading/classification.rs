//! Performance classification on the 4.0 grade-point scale.
//!
//! This is a second, independent scale: grade points are derived from
//! letter grades and averaged without coefficients. A 0-100 weighted
//! average must never be fed into [`Classification::from_gpa`].

use serde::{Deserialize, Serialize};

use super::scale::Grade;

impl Grade {
    /// Grade points on the 4.0 classification scale.
    pub const fn grade_points(self) -> f64 {
        match self {
            Grade::AStar => 4.0,
            Grade::A => 3.7,
            Grade::B => 3.0,
            Grade::C => 2.3,
            Grade::D => 2.0,
            Grade::E => 1.3,
            Grade::F => 1.0,
            Grade::G => 0.7,
            Grade::U => 0.0,
        }
    }
}

/// Unweighted mean of grade points; 0.0 for an empty slice.
pub fn grade_point_average(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }

    let total: f64 = grades.iter().map(|grade| grade.grade_points()).sum();
    total / grades.len() as f64
}

/// Coarse performance category derived from a 0.0-4.0 average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Distinction,
    Merit,
    Credit,
    Pass,
    Unclassified,
}

impl Classification {
    pub fn from_gpa(gpa: f64) -> Self {
        if gpa >= 3.7 {
            Classification::Distinction
        } else if gpa >= 3.0 {
            Classification::Merit
        } else if gpa >= 2.3 {
            Classification::Credit
        } else if gpa >= 2.0 {
            Classification::Pass
        } else {
            Classification::Unclassified
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Classification::Distinction => "Distinction",
            Classification::Merit => "Merit",
            Classification::Credit => "Credit",
            Classification::Pass => "Pass",
            Classification::Unclassified => "Unclassified",
        }
    }

    /// Letter-grade span the category corresponds to on the printed card.
    pub const fn grade_range(self) -> &'static str {
        match self {
            Classification::Distinction => "A* - A",
            Classification::Merit => "A - B",
            Classification::Credit => "B - C",
            Classification::Pass => "C - D",
            Classification::Unclassified => "Below D",
        }
    }
}
