//! Analysis Sectionizer
//!
//! The service returns a literary analysis as free text. Section headings
//! come from a fixed keyword vocabulary ("Theme:", "Characters:", ...), so
//! the text is split at each heading occurrence and each fragment becomes a
//! titled section.
//!
//! This is deliberately naive text processing: the service gives no format
//! guarantees, so keywordless or malformed input degrades to a single
//! section whose title is whatever precedes the first colon.

use std::sync::OnceLock;

use regex::Regex;

/// A titled fragment of an analysis
///
/// Derived and transient: recomputed per analysis request, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisSection {
    /// Heading text (may be empty or garbage for keywordless input)
    pub title: String,
    /// Body text after the heading colon
    pub content: String,
}

/// Heading keywords, optionally pluralized, followed by a colon
fn heading_pattern() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:theme|plot|characters|setting|style|summary|analysis|symbolism|conclusion)s?:",
        )
        .expect("heading pattern is valid")
    })
}

/// Split analysis text into titled sections at heading keywords
///
/// Fragments run from one heading occurrence to the next; text before the
/// first heading survives as its own section unless it is blank. Within a
/// fragment, everything before the first `:` is the trimmed title and the
/// rest is the trimmed content (inner colons stay in the content). Order
/// preserves source occurrence. Zero heading matches yield exactly one
/// section carrying the whole text.
pub fn sectionize(text: &str) -> Vec<AnalysisSection> {
    let mut bounds = vec![0];
    bounds.extend(
        heading_pattern()
            .find_iter(text)
            .map(|m| m.start())
            .filter(|&s| s != 0),
    );
    bounds.push(text.len());

    let mut sections = Vec::new();
    for pair in bounds.windows(2) {
        let fragment = &text[pair[0]..pair[1]];
        if fragment.trim().is_empty() {
            continue;
        }
        let (title, content) = match fragment.split_once(':') {
            Some((title, content)) => (title, content),
            None => (fragment, ""),
        };
        sections.push(AnalysisSection {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
        });
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(title: &str, content: &str) -> AnalysisSection {
        AnalysisSection {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_sectionize_two_headings() {
        let sections = sectionize("Theme: love. Characters: Alice, Bob.");
        assert_eq!(
            sections,
            vec![
                section("Theme", "love."),
                section("Characters", "Alice, Bob."),
            ]
        );
    }

    #[test]
    fn test_sectionize_no_keyword_is_single_section() {
        let sections = sectionize("Just some prose about a book.");
        assert_eq!(
            sections,
            vec![section("Just some prose about a book.", "")]
        );

        // A stray colon still yields one section with a best-effort title.
        let sections = sectionize("note: nothing recognized here");
        assert_eq!(sections, vec![section("note", "nothing recognized here")]);
    }

    #[test]
    fn test_sectionize_leading_text_kept_when_nonempty() {
        let sections = sectionize("An overview first. Theme: loss.");
        assert_eq!(
            sections,
            vec![
                section("An overview first.", ""),
                section("Theme", "loss."),
            ]
        );
    }

    #[test]
    fn test_sectionize_blank_leading_text_dropped() {
        let sections = sectionize("   Theme: hope.");
        assert_eq!(sections, vec![section("Theme", "hope.")]);
    }

    #[test]
    fn test_sectionize_case_insensitive_and_plural() {
        let sections = sectionize("THEMES: war. symbolisms: the sea.");
        assert_eq!(
            sections,
            vec![
                section("THEMES", "war."),
                section("symbolisms", "the sea."),
            ]
        );
    }

    #[test]
    fn test_sectionize_keyword_needs_word_boundary() {
        // "subtheme:" must not split; the whole text stays one section.
        let sections = sectionize("the subtheme: irrelevant");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "the subtheme");
    }

    #[test]
    fn test_sectionize_inner_colons_stay_in_content() {
        let sections = sectionize("Plot: part one: the setup; part two: the fall");
        assert_eq!(
            sections,
            vec![section("Plot", "part one: the setup; part two: the fall")]
        );
    }

    #[test]
    fn test_sectionize_empty_input() {
        assert_eq!(sectionize(""), Vec::new());
        assert_eq!(sectionize("   \n  "), Vec::new());
    }

    #[test]
    fn test_sectionize_order_preserves_source() {
        let text = "Conclusion: z. Theme: a. Plot: m.";
        let sections = sectionize(text);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Conclusion", "Theme", "Plot"]);
    }

    #[test]
    fn test_sectionize_roundtrip_up_to_whitespace() {
        let text = "Theme: love and loss. Characters: Alice, Bob. Conclusion: a classic.";
        let rebuilt: Vec<String> = sectionize(text)
            .iter()
            .map(|s| format!("{}: {}", s.title, s.content))
            .collect();
        let normalized: Vec<&str> = text.split_whitespace().collect();
        let rebuilt_words: Vec<&str> = rebuilt
            .iter()
            .flat_map(|s| s.split_whitespace())
            .collect();
        assert_eq!(rebuilt_words, normalized);
    }
}
