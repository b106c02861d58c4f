//! Citation collation.
//!
//! Web search answers come back with URL annotations, usually repeating the
//! same source several times. `collate` keeps the first occurrence of every
//! source and renders them as a markdown "Sources" section.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Section header placed above rendered citations
pub const SOURCES_HEADER: &str = "## Sources";

/// A (source URL, source title) pair attached to generated content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub url: String,
    pub title: String,
}

impl CitationEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Identity key; entries with equal keys are duplicates
    pub fn key(&self) -> String {
        format!("{}|{}", self.url, self.title)
    }

    fn render(&self) -> String {
        format!("- [{}]({})", self.title, self.url)
    }
}

/// Deduplicated citations in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedCitations {
    entries: Vec<String>,
}

impl RenderedCitations {
    /// Rendered citation lines, without the section header
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every output line: header, blank separator, then the entries.
    /// Empty when there is nothing to cite.
    pub fn lines(&self) -> Vec<&str> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push(SOURCES_HEADER);
        lines.push("");
        lines.extend(self.entries.iter().map(String::as_str));
        lines
    }

    pub fn to_markdown(&self) -> String {
        self.lines().join("\n")
    }

    /// Append the Sources section to `text`, separated by a blank line.
    pub fn append_to(&self, text: &mut String) {
        if self.entries.is_empty() {
            return;
        }
        text.push_str("\n\n");
        text.push_str(&self.to_markdown());
    }
}

/// Deduplicate and render citations in a single pass.
pub fn collate<I>(entries: I) -> RenderedCitations
where
    I: IntoIterator<Item = CitationEntry>,
{
    let mut seen = HashSet::new();
    let mut rendered = Vec::new();

    for entry in entries {
        if seen.insert(entry.key()) {
            rendered.push(entry.render());
        }
    }

    RenderedCitations { entries: rendered }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn research() -> CitationEntry {
        CitationEntry::new("https://example.com/ai-research", "AI Research Advances 2025")
    }

    fn news() -> CitationEntry {
        CitationEntry::new("https://another-source.com/tech-news", "Technology News Today")
    }

    #[test]
    fn test_duplicates_are_dropped_in_first_seen_order() {
        let rendered = collate(vec![research(), news(), research()]);

        assert_eq!(
            rendered.entries(),
            &[
                "- [AI Research Advances 2025](https://example.com/ai-research)".to_string(),
                "- [Technology News Today](https://another-source.com/tech-news)".to_string(),
            ]
        );
        let lines = rendered.lines();
        assert_eq!(lines[0], SOURCES_HEADER);
        assert_eq!(lines[1], "");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        let rendered = collate(Vec::<CitationEntry>::new());

        assert!(rendered.is_empty());
        assert!(rendered.lines().is_empty());
        assert_eq!(rendered.to_markdown(), "");

        let mut text = "Answer.".to_string();
        rendered.append_to(&mut text);
        assert_eq!(text, "Answer.");
    }

    #[test]
    fn test_same_url_or_same_title_are_distinct() {
        let rendered = collate(vec![
            CitationEntry::new("https://a.example", "First"),
            CitationEntry::new("https://a.example", "Second"),
            CitationEntry::new("https://b.example", "First"),
        ]);
        assert_eq!(rendered.len(), 3);
    }

    #[test]
    fn test_key_is_case_sensitive() {
        let rendered = collate(vec![
            CitationEntry::new("https://a.example", "Title"),
            CitationEntry::new("https://a.example", "title"),
        ]);
        assert_eq!(rendered.len(), 2);
    }

    #[test]
    fn test_later_duplicate_does_not_reorder() {
        let rendered = collate(vec![news(), research(), news(), research()]);
        assert!(rendered.entries()[0].contains("Technology News Today"));
        assert!(rendered.entries()[1].contains("AI Research Advances 2025"));
    }

    #[test]
    fn test_append_to_text() {
        let mut text = "Based on recent research.".to_string();
        collate([research()]).append_to(&mut text);

        assert_eq!(
            text,
            "Based on recent research.\n\n## Sources\n\n- [AI Research Advances 2025](https://example.com/ai-research)"
        );
    }

    #[test]
    fn test_collate_accepts_lazy_iterators() {
        let rendered = collate((0..3).map(|i| CitationEntry::new(format!("https://{i}.example"), "Page")));
        assert_eq!(rendered.len(), 3);
    }
}
