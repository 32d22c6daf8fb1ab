use crate::domain::model::{DigestReport, Verdict};
use std::io::{self, Write};

/// Write one digest entry: a blank separator, the title with its marker,
/// then the summary.
pub fn write_entry<W: Write>(
    out: &mut W,
    title: &str,
    verdict: Verdict,
    summary: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", title, verdict.marker())?;
    writeln!(out, "{}", summary.trim())?;
    out.flush()
}

pub fn write_heading<W: Write>(out: &mut W, title: &str, verdict: Verdict) -> io::Result<()> {
    writeln!(out, "{} {}", title, verdict.marker())
}

pub fn write_failure_report<W: Write>(out: &mut W, report: &DigestReport) -> io::Result<()> {
    if report.failures.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "{} of {} reviews could not be summarized:",
        report.failures.len(),
        report.matched
    )?;
    for failure in &report.failures {
        writeln!(out, "  - {}: {}", failure.title, failure.reason)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RowFailure;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_entry_layout() {
        let output = render(|out| {
            write_entry(out, "Parasite", Verdict::Positive, "  I loved every minute of it.\n")
        });
        assert_eq!(output, "\nParasite (Yes)\nI loved every minute of it.\n");
    }

    #[test]
    fn test_negative_marker() {
        let output = render(|out| write_entry(out, "Cats", Verdict::Negative, "Nope."));
        assert_eq!(output, "\nCats (No)\nNope.\n");
    }

    #[test]
    fn test_failure_report() {
        let report = DigestReport {
            matched: 3,
            summarized: 2,
            failures: vec![RowFailure {
                title: "Cats".to_string(),
                reason: "API returned status 500: boom".to_string(),
            }],
        };
        let output = render(|out| write_failure_report(out, &report));
        assert_eq!(
            output,
            "1 of 3 reviews could not be summarized:\n  - Cats: API returned status 500: boom\n"
        );
    }

    #[test]
    fn test_failure_report_silent_when_complete() {
        let output = render(|out| write_failure_report(out, &DigestReport::default()));
        assert!(output.is_empty());
    }
}
