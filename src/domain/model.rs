use crate::utils::error::PARTIAL_FAILURE_EXIT_CODE;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ratings at or above this many stars count as a recommendation.
pub const POSITIVE_RATING_THRESHOLD: f64 = 3.0;

/// One row of a Letterboxd `reviews.csv` export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub title: String,
    pub rating: Option<f64>,
    pub watched_date: NaiveDate,
    pub review: Option<String>,
}

impl ReviewRecord {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_rating(self.rating)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Positive,
    Negative,
}

impl Verdict {
    /// Unrated entries are never recommended.
    pub fn from_rating(rating: Option<f64>) -> Self {
        match rating {
            Some(stars) if stars >= POSITIVE_RATING_THRESHOLD => Verdict::Positive,
            _ => Verdict::Negative,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Verdict::Positive => "(Yes)",
            Verdict::Negative => "(No)",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// The calendar month a digest covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A title from the dataset paired with a hand-written summary in the
/// voice the generated summaries should imitate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exemplar {
    pub title: String,
    pub summary: String,
}

impl Exemplar {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FewShotExample {
    pub review_text: String,
    pub summary_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestReport {
    pub matched: usize,
    pub summarized: usize,
    pub failures: Vec<RowFailure>,
}

impl DigestReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Zero matching reviews is still a complete run.
    pub fn exit_code(&self) -> i32 {
        if self.is_complete() {
            0
        } else {
            PARTIAL_FAILURE_EXIT_CODE
        }
    }
}
