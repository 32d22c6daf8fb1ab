use crate::core::cleanup::clean_review_text;
use crate::domain::model::{Exemplar, FewShotExample, ReviewRecord};
use crate::utils::error::{DigestError, Result};

const DEFAULT_EXEMPLARS: [(&str, &str); 5] = [
    (
        "Missing Link",
        "A fun animated story. Great stop-motion visual effects, but most people probably won't know it's stop-motion to appreciate it.",
    ),
    (
        "Reservoir Dogs",
        "Tarantino's first feature-length debut lies strongly along the rest of his filmography. Somehow, seeing the physical and mental effects of a bank heist on criminals was way more fascinating than seeing the actual bank heist - that is the power of a strong screenplay. Nonlinear storytelling was executed effectively, and not just as a schtick.",
    ),
    (
        "2001: A Space Odyssey",
        "This is the prime example of film as art. Every frame was meticulously crafted, coming together to generate cinematic hypnotism. Despite being over 50 years old, it is still a masterpiece on current standards – I never felt that the visuals were limited by the filmmaking technology available at the time. This is also one of the most terrifying movies I’ve ever watched. No other film like this exists.",
    ),
    (
        "American Graffiti",
        "I’m glad this movie was successful to give George Lucas the power to make Star Wars. But I think this movie would only resonate well to people that were in their teenage years in the 1960s.",
    ),
    (
        "Violent Night",
        "Die Hard with David Harbour as Santa. On paper, this should be perfect for me: I’m a sucker for action thrillers and anything Christmas. But, I disagreed with every plot choice and there were many inconsistencies that gave me more frustration than enjoyment.",
    ),
];

pub fn default_exemplars() -> Vec<Exemplar> {
    DEFAULT_EXEMPLARS
        .iter()
        .map(|(title, summary)| Exemplar::new(*title, *summary))
        .collect()
}

/// Pair each exemplar with the cleaned text of its review in `records`.
///
/// The first row with a matching title wins. Every exemplar whose title is
/// absent, or whose row has no review text, is reported in one error.
pub fn resolve_exemplars(
    records: &[ReviewRecord],
    exemplars: &[Exemplar],
) -> Result<Vec<FewShotExample>> {
    let mut resolved = Vec::with_capacity(exemplars.len());
    let mut missing = Vec::new();

    for exemplar in exemplars {
        let review = records
            .iter()
            .find(|record| record.title == exemplar.title)
            .and_then(|record| record.review.as_deref());

        match review {
            Some(text) => resolved.push(FewShotExample {
                review_text: clean_review_text(text),
                summary_text: exemplar.summary.clone(),
            }),
            None => missing.push(exemplar.title.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(DigestError::MissingExemplarsError { titles: missing });
    }

    Ok(resolved)
}

pub fn render_few_shot_block(examples: &[FewShotExample]) -> String {
    examples
        .iter()
        .map(|example| {
            format!(
                "\n\nExample Review: {}\nExample Summary: {}",
                example.review_text, example.summary_text
            )
        })
        .collect()
}

pub fn system_prompt(few_shot_block: &str) -> String {
    format!(
        "You are a helpful assistant that summarizes movie reviews within one to four sentences. \
         Summarize in the first person, expressing the viewpoints as if they are your own. \
         Summarize movie reviews in the same style as these examples: {} ",
        few_shot_block
    )
}
