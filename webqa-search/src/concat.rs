//! Joins per-source text into a single labelled grounding blob.

use crate::extractor::ContentExtractor;
use crate::types::SearchHit;

/// Fetch each hit in order and concatenate the non-empty results.
///
/// Every source that produced text contributes one block:
///
/// ```text
/// \n\n=== {title} ===\n{text}\n
/// ```
///
/// Sources whose extraction came back empty contribute nothing, not even a
/// header. Returns an empty string for no hits or when every hit failed.
/// Fetches run one after another; there is no fan-out.
pub async fn concatenate(hits: &[SearchHit], extractor: &dyn ContentExtractor) -> String {
    let mut full_text = String::new();

    for hit in hits {
        let text = extractor.extract(&hit.link).await;
        if text.is_empty() {
            tracing::debug!(link = %hit.link, "source produced no text, skipping");
            continue;
        }
        full_text.push_str(&format_block(&hit.title, &text));
    }

    full_text
}

/// Render one labelled source block.
fn format_block(title: &str, text: &str) -> String {
    format!("\n\n=== {title} ===\n{text}\n")
}
