use serde::{Deserialize, Serialize};

/// Letter grade on the Cambridge 0-100 marking scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    AStar,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    U,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Grade::AStar => "A*",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::G => "G",
            Grade::U => "U",
        }
    }

    /// Comparison points on the 8-point ladder (A* = 8 down to U = 0).
    pub const fn points(self) -> u8 {
        match self {
            Grade::AStar => 8,
            Grade::A => 7,
            Grade::B => 6,
            Grade::C => 5,
            Grade::D => 4,
            Grade::E => 3,
            Grade::F => 2,
            Grade::G => 1,
            Grade::U => 0,
        }
    }
}

/// One contiguous score range mapped to a single letter grade.
///
/// `min_score`/`max_score` are both inclusive at whole-mark resolution;
/// fractional scores resolve through the descending floor scan in
/// [`GradeScale::grade_for`], so 89.5 falls into the 80-89 band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub min_score: f64,
    pub max_score: f64,
    pub grade: Grade,
}

/// Immutable ordered grade table. Bands are kept sorted by descending
/// floor and must cover the whole 0-100 range with no overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    bands: Vec<GradeBand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScaleError {
    #[error("a grade scale needs at least one band")]
    Empty,
    #[error("band {index} must sit strictly below the band before it")]
    Misordered { index: usize },
    #[error("band {index} overlaps or leaves a gap against its neighbour")]
    Discontinuous { index: usize },
    #[error("the lowest band must reach down to a score of 0")]
    UncoveredFloor,
}

impl GradeScale {
    /// Builds a custom scale, rejecting tables that would let a valid
    /// score match zero or several bands.
    pub fn new(bands: Vec<GradeBand>) -> Result<Self, ScaleError> {
        if bands.is_empty() {
            return Err(ScaleError::Empty);
        }

        for (index, band) in bands.iter().enumerate() {
            if band.max_score < band.min_score {
                return Err(ScaleError::Discontinuous { index });
            }
            if index == 0 {
                continue;
            }
            let above = &bands[index - 1];
            if band.min_score >= above.min_score {
                return Err(ScaleError::Misordered { index });
            }
            if band.max_score >= above.min_score {
                return Err(ScaleError::Discontinuous { index });
            }
        }

        let floor = bands[bands.len() - 1].min_score;
        if floor > 0.0 {
            return Err(ScaleError::UncoveredFloor);
        }

        Ok(Self { bands })
    }

    /// The official Cambridge IGCSE/AS&A-Level nine-band table, A* to U.
    pub fn cambridge() -> Self {
        let bands = [
            (90.0, 100.0, Grade::AStar),
            (80.0, 89.0, Grade::A),
            (70.0, 79.0, Grade::B),
            (60.0, 69.0, Grade::C),
            (50.0, 59.0, Grade::D),
            (40.0, 49.0, Grade::E),
            (30.0, 39.0, Grade::F),
            (20.0, 29.0, Grade::G),
            (0.0, 19.0, Grade::U),
        ];

        Self {
            bands: bands
                .into_iter()
                .map(|(min_score, max_score, grade)| GradeBand {
                    min_score,
                    max_score,
                    grade,
                })
                .collect(),
        }
    }

    /// Resolves a score by scanning floors in descending order. Returns
    /// `None` only when the score sits below every band floor, which a
    /// validated scale rules out for scores in range.
    pub fn grade_for(&self, score: f64) -> Option<Grade> {
        self.bands
            .iter()
            .find(|band| score >= band.min_score)
            .map(|band| band.grade)
    }

    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cambridge_scale_has_nine_contiguous_bands() {
        let scale = GradeScale::cambridge();
        assert_eq!(scale.bands().len(), 9);

        for pair in scale.bands().windows(2) {
            assert_eq!(pair[1].max_score, pair[0].min_score - 1.0);
        }
        assert_eq!(scale.bands()[0].max_score, 100.0);
        assert_eq!(scale.bands()[8].min_score, 0.0);
    }

    #[test]
    fn every_whole_score_matches_exactly_one_band() {
        let scale = GradeScale::cambridge();
        for score in 0..=100 {
            let score = f64::from(score);
            let matching = scale
                .bands()
                .iter()
                .filter(|band| band.min_score <= score && score <= band.max_score)
                .count();
            assert_eq!(matching, 1, "score {score} matched {matching} bands");
        }
    }

    #[test]
    fn fractional_scores_resolve_to_the_band_below() {
        let scale = GradeScale::cambridge();
        assert_eq!(scale.grade_for(89.5), Some(Grade::A));
        assert_eq!(scale.grade_for(19.9), Some(Grade::U));
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(GradeScale::new(Vec::new()), Err(ScaleError::Empty));
    }

    #[test]
    fn rejects_overlapping_bands() {
        let bands = vec![
            GradeBand {
                min_score: 50.0,
                max_score: 100.0,
                grade: Grade::A,
            },
            GradeBand {
                min_score: 0.0,
                max_score: 60.0,
                grade: Grade::U,
            },
        ];
        assert_eq!(
            GradeScale::new(bands),
            Err(ScaleError::Discontinuous { index: 1 })
        );
    }

    #[test]
    fn rejects_table_that_never_reaches_zero() {
        let bands = vec![GradeBand {
            min_score: 10.0,
            max_score: 100.0,
            grade: Grade::A,
        }];
        assert_eq!(GradeScale::new(bands), Err(ScaleError::UncoveredFloor));
    }

    #[test]
    fn accepts_a_coarser_custom_table() {
        let bands = vec![
            GradeBand {
                min_score: 50.0,
                max_score: 100.0,
                grade: Grade::A,
            },
            GradeBand {
                min_score: 0.0,
                max_score: 49.0,
                grade: Grade::U,
            },
        ];
        let scale = GradeScale::new(bands).expect("valid two-band scale");
        assert_eq!(scale.grade_for(50.0), Some(Grade::A));
        assert_eq!(scale.grade_for(49.0), Some(Grade::U));
    }
}
