/// Flatten Letterboxd review text onto one line and drop its italic markup.
pub fn clean_review_text(review: &str) -> String {
    let mut cleaned = review.replace(['\u{a0}', '\r', '\n'], " ");
    // Removing one tag can splice a new one together ("<<i>i>").
    while cleaned.contains("<i>") || cleaned.contains("</i>") {
        cleaned = cleaned.replace("<i>", "").replace("</i>", "");
    }
    cleaned
}
