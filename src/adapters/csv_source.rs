use crate::domain::model::ReviewRecord;
use crate::domain::ports::ReviewSource;
use crate::utils::error::{DigestError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Reads the `reviews.csv` file of a Letterboxd data export.
#[derive(Debug, Clone)]
pub struct CsvReviewSource {
    path: PathBuf,
}

impl CsvReviewSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReviewSource for CsvReviewSource {
    fn load_reviews(&self) -> Result<Vec<ReviewRecord>> {
        tracing::debug!("Reading reviews from {}", self.path.display());
        let file = File::open(&self.path)?;
        let reviews = read_reviews(file)?;
        tracing::info!("Loaded {} reviews from {}", reviews.len(), self.path.display());
        Ok(reviews)
    }
}

// Letterboxd also exports Date, Year, Letterboxd URI, Rewatch and Tags; they are ignored.
#[derive(Debug, Deserialize)]
struct RawReviewRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Rating")]
    rating: Option<String>,
    #[serde(rename = "Watched Date")]
    watched_date: String,
    #[serde(rename = "Review")]
    review: Option<String>,
}

impl RawReviewRow {
    fn into_record(self, line: u64) -> Result<ReviewRecord> {
        let rating = match self.rating.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<f64>().map_err(|_| {
                DigestError::RatingParseError {
                    line,
                    value: value.to_string(),
                }
            })?),
        };

        let watched_date = parse_watched_date(&self.watched_date).ok_or_else(|| {
            DigestError::DateParseError {
                line,
                value: self.watched_date.clone(),
            }
        })?;

        let review = self.review.filter(|text| !text.trim().is_empty());

        Ok(ReviewRecord {
            title: self.name,
            rating,
            watched_date,
            review,
        })
    }
}

fn parse_watched_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

/// Parse a Letterboxd reviews export, keeping the file's row order.
pub fn read_reviews<R: Read>(reader: R) -> Result<Vec<ReviewRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut reviews = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        let raw: RawReviewRow = row.deserialize(Some(&headers))?;
        reviews.push(raw.into_record(line)?);
    }

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Date,Name,Year,Letterboxd URI,Rating,Rewatch,Review,Tags,Watched Date\n";

    #[test]
    fn test_reads_letterboxd_export() {
        let csv = format!(
            "{}{}{}{}",
            HEADER,
            "2025-03-11,Parasite,2019,https://boxd.it/a,4.5,,",
            "\"Great film.\nReally.\",,2025-03-10\n",
            "2025-04-02,Cats,2019,https://boxd.it/b,,Yes,,,2025-04-01\n"
        );

        let reviews = read_reviews(csv.as_bytes()).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].title, "Parasite");
        assert_eq!(reviews[0].rating, Some(4.5));
        assert_eq!(
            reviews[0].watched_date,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert_eq!(reviews[0].review.as_deref(), Some("Great film.\nReally."));
        assert_eq!(reviews[1].rating, None);
        assert_eq!(reviews[1].review, None);
    }

    #[test]
    fn test_accepts_timestamp_watched_date() {
        let csv = format!("{}2025-03-11,Heat,1995,u,4,,ok,,2025-03-10 21:15:00\n", HEADER);
        let reviews = read_reviews(csv.as_bytes()).unwrap();
        assert_eq!(
            reviews[0].watched_date,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv = format!("{}2025-03-11,Heat,1995,u,4,,ok,,not-a-date\n", HEADER);
        match read_reviews(csv.as_bytes()) {
            Err(DigestError::DateParseError { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected DateParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_rating_is_rejected() {
        let csv = format!("{}2025-03-11,Heat,1995,u,great,,ok,,2025-03-10\n", HEADER);
        assert!(matches!(
            read_reviews(csv.as_bytes()),
            Err(DigestError::RatingParseError { .. })
        ));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "Name,Rating,Review\nHeat,4,ok\n";
        assert!(matches!(
            read_reviews(csv.as_bytes()),
            Err(DigestError::CsvError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}2025-03-11,Heat,1995,u,4,,ok,,2025-03-10\n", HEADER).unwrap();

        let source = CsvReviewSource::new(temp_file.path());
        let reviews = source.load_reviews().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].title, "Heat");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvReviewSource::new("/definitely/not/here/reviews.csv");
        assert!(matches!(source.load_reviews(), Err(DigestError::IoError(_))));
    }
}
