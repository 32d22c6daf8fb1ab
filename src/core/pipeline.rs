use crate::core::cleanup::clean_review_text;
use crate::core::exemplars::{render_few_shot_block, resolve_exemplars, system_prompt};
use crate::core::filter::filter_by_period;
use crate::domain::model::{Exemplar, Period, ReviewRecord};
use crate::domain::ports::{ReviewSource, Summarizer};
use crate::utils::error::{DigestError, Result};

/// The loaded dataset together with the system prompt shared by every
/// summary request of a run.
#[derive(Debug, Clone)]
pub struct PreparedDigest {
    pub records: Vec<ReviewRecord>,
    pub system_prompt: String,
}

impl PreparedDigest {
    pub fn prepare<R: ReviewSource>(source: &R, exemplars: &[Exemplar]) -> Result<Self> {
        let records = source.load_reviews()?;
        let examples = resolve_exemplars(&records, exemplars)?;
        tracing::debug!("Resolved {} few-shot examples", examples.len());

        let block = render_few_shot_block(&examples);
        Ok(Self {
            records,
            system_prompt: system_prompt(&block),
        })
    }

    pub fn select(&self, period: Period) -> Vec<&ReviewRecord> {
        filter_by_period(&self.records, period)
    }
}

/// The raw review text, or an error for entries logged without a review.
pub fn review_text(record: &ReviewRecord) -> Result<&str> {
    record
        .review
        .as_deref()
        .ok_or_else(|| DigestError::MissingReviewError {
            title: record.title.clone(),
        })
}

pub async fn summarize_record<S: Summarizer + ?Sized>(
    summarizer: &S,
    system_prompt: &str,
    record: &ReviewRecord,
) -> Result<String> {
    let review = review_text(record)?;

    summarizer
        .summarize(system_prompt, &clean_review_text(review))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct StaticSource(Vec<ReviewRecord>);

    impl ReviewSource for StaticSource {
        fn load_reviews(&self) -> Result<Vec<ReviewRecord>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingSummarizer {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn summarize(&self, system_prompt: &str, review: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), review.to_string()));
            Ok(format!("summary of {}", review))
        }
    }

    fn record(title: &str, review: Option<&str>) -> ReviewRecord {
        ReviewRecord {
            title: title.to_string(),
            rating: Some(4.0),
            watched_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            review: review.map(str::to_string),
        }
    }

    #[test]
    fn test_prepare_builds_prompt_from_exemplars() {
        let source = StaticSource(vec![record("Heat", Some("Tense\nand <i>long</i>."))]);
        let exemplars = [Exemplar::new("Heat", "Loved it.")];
        let prepared = PreparedDigest::prepare(&source, &exemplars).unwrap();

        assert_eq!(prepared.records.len(), 1);
        assert!(prepared
            .system_prompt
            .contains("\n\nExample Review: Tense and long.\nExample Summary: Loved it."));
    }

    #[test]
    fn test_prepare_fails_on_missing_exemplar() {
        let source = StaticSource(vec![record("Heat", Some("text"))]);
        let result = PreparedDigest::prepare(&source, &[Exemplar::new("Ronin", "s")]);
        assert!(matches!(result, Err(DigestError::MissingExemplarsError { .. })));
    }

    #[tokio::test]
    async fn test_summarize_record_sends_cleaned_review() {
        let summarizer = RecordingSummarizer::default();
        let heat = record("Heat", Some("Great\r\nfilm."));
        let summary = summarize_record(&summarizer, "prompt", &heat).await.unwrap();

        assert_eq!(summary, "summary of Great  film.");
        let calls = summarizer.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("prompt".to_string(), "Great  film.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_summarize_record_without_review_skips_call() {
        let summarizer = RecordingSummarizer::default();
        let result = summarize_record(&summarizer, "prompt", &record("Heat", None)).await;

        assert!(matches!(result, Err(DigestError::MissingReviewError { .. })));
        assert!(summarizer.calls.lock().unwrap().is_empty());
    }
}
