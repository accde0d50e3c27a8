//! HTML content extraction: strips boilerplate and returns readable text.
//!
//! Parses raw HTML, detaches non-content elements from the tree, narrows
//! the scope to the first `<article>` when one exists, and collects the
//! text of level 1-3 headings and paragraphs in document order.

use scraper::{ElementRef, Html, Selector};

/// Elements removed, with their whole subtree, before extraction.
pub const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "form", "aside", "noscript", "header",
];

/// Elements whose text is collected.
const TEXT_SELECTOR: &str = "h1, h2, h3, p";

/// Separator placed between collected blocks.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Extract readable text from raw HTML.
///
/// Returns an empty string when nothing survives extraction; this
/// function never fails.
pub fn extract_article_text(html: &str) -> String {
    let mut document = Html::parse_document(html);
    strip_boilerplate(&mut document);

    let (Ok(text_sel), Ok(article_sel)) =
        (Selector::parse(TEXT_SELECTOR), Selector::parse("article"))
    else {
        return String::new();
    };

    let blocks = match document.select(&article_sel).next() {
        Some(article) => collect_blocks(article.select(&text_sel)),
        None => collect_blocks(document.select(&text_sel)),
    };

    blocks.join(BLOCK_SEPARATOR).trim().to_owned()
}

/// Detach every boilerplate element from the parse tree.
fn strip_boilerplate(document: &mut Html) {
    let Ok(selector) = Selector::parse(&STRIPPED_TAGS.join(", ")) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Each element's text with surrounding whitespace trimmed; empty ones dropped.
fn collect_blocks<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    elements
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .filter(|text| !text.is_empty())
        .collect()
}
