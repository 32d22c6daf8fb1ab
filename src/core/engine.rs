use crate::core::exemplars::default_exemplars;
use crate::core::formatter::{write_entry, write_heading};
use crate::core::pipeline::{review_text, summarize_record, PreparedDigest};
use crate::domain::model::{DigestReport, Exemplar, Period, RowFailure};
use crate::domain::ports::{ReviewSource, Summarizer};
use crate::utils::error::Result;
use std::io::Write;

/// Drives a digest run: load the export, build the few-shot prompt, then
/// summarize and print each review of the period one at a time.
pub struct DigestEngine<R: ReviewSource, S: Summarizer> {
    source: R,
    summarizer: S,
    exemplars: Vec<Exemplar>,
}

impl<R: ReviewSource, S: Summarizer> DigestEngine<R, S> {
    pub fn new(source: R, summarizer: S) -> Self {
        Self {
            source,
            summarizer,
            exemplars: default_exemplars(),
        }
    }

    pub fn with_exemplars(mut self, exemplars: Vec<Exemplar>) -> Self {
        self.exemplars = exemplars;
        self
    }

    /// Errors loading the dataset or resolving exemplars abort the run before
    /// any request is made. A failure on a single review is recorded in the
    /// report and the remaining reviews are still processed.
    pub async fn run<W: Write>(&self, period: Period, out: &mut W) -> Result<DigestReport> {
        tracing::info!("Starting digest for {}", period);

        let prepared = PreparedDigest::prepare(&self.source, &self.exemplars)?;
        let selected = prepared.select(period);
        tracing::info!(
            "{} of {} reviews were watched in {}",
            selected.len(),
            prepared.records.len(),
            period
        );

        let mut report = DigestReport {
            matched: selected.len(),
            ..DigestReport::default()
        };

        for record in selected {
            tracing::debug!("Summarizing '{}'", record.title);
            match summarize_record(&self.summarizer, &prepared.system_prompt, record).await {
                Ok(summary) => {
                    write_entry(out, &record.title, record.verdict(), &summary)?;
                    report.summarized += 1;
                }
                Err(e) if e.is_row_scoped() => {
                    tracing::warn!("Could not summarize '{}': {}", record.title, e);
                    report.failures.push(RowFailure {
                        title: record.title.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Summarized {} of {} reviews",
            report.summarized,
            report.matched
        );
        Ok(report)
    }
}

/// List the reviews a run would summarize without contacting the API.
///
/// Entries without review text are left out and logged, since a real run
/// would record them as failures.
pub fn preview<R: ReviewSource, W: Write>(
    source: &R,
    exemplars: &[Exemplar],
    period: Period,
    out: &mut W,
) -> Result<usize> {
    let prepared = PreparedDigest::prepare(source, exemplars)?;
    let mut count = 0;
    for record in prepared.select(period) {
        match review_text(record) {
            Ok(_) => {
                write_heading(out, &record.title, record.verdict())?;
                count += 1;
            }
            Err(e) => tracing::warn!("Would skip '{}': {}", record.title, e),
        }
    }
    Ok(count)
}
