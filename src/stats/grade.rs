use std::fmt;

use serde::{Serialize, Serializer};

/// Networks with fewer ratings than this are not graded.
pub const MIN_GRADED_RATINGS: u64 = 5;

/// Sample size at which a network's average counts in full.
pub const FULL_CONFIDENCE_RATINGS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    InsufficientData,
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::InsufficientData => "Insufficient Data",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Letter grade for a network's average rating, damped by sample size.
///
/// | Adjusted average | Grade |
/// |------------------|-------|
/// | >= 4.5           | A+    |
/// | >= 4.0           | A     |
/// | >= 3.5           | B+    |
/// | >= 3.0           | B     |
/// | >= 2.5           | C+    |
/// | >= 2.0           | C     |
/// | >= 1.5           | D     |
/// | < 1.5            | F     |
///
/// The adjusted average is `average * min(total / 50, 1)`. Fewer than five
/// ratings always yields [`Grade::InsufficientData`].
pub fn grade(average_rating: f64, total_ratings: u64) -> Grade {
    if total_ratings < MIN_GRADED_RATINGS {
        return Grade::InsufficientData;
    }

    let confidence = (total_ratings as f64 / FULL_CONFIDENCE_RATINGS).min(1.0);

    match average_rating * confidence {
        a if a >= 4.5 => Grade::APlus,
        a if a >= 4.0 => Grade::A,
        a if a >= 3.5 => Grade::BPlus,
        a if a >= 3.0 => Grade::B,
        a if a >= 2.5 => Grade::CPlus,
        a if a >= 2.0 => Grade::C,
        a if a >= 1.5 => Grade::D,
        _ => Grade::F,
    }
}
