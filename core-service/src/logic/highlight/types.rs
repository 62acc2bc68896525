//! Highlight Types

use serde::{Deserialize, Serialize};

/// Source tag for matches found by the cross-field phrase scan
pub const MULTI_FIELD_PHRASE: &str = "multi_field_phrase";

/// One keyword occurrence in the original explanation
///
/// `[start, end)` is a byte span into the unannotated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Candidate field the keyword came from
    pub field: String,
    pub keyword: String,
    #[serde(rename = "start_pos")]
    pub start: usize,
    #[serde(rename = "end_pos")]
    pub end: usize,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Explanation with candidate evidence marked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedExplanation {
    #[serde(rename = "original_explanation")]
    pub original: String,
    /// HTML rendering with `<span>` annotations
    #[serde(rename = "highlighted_explanation_html")]
    pub rendered_rich: String,
    /// Markdown rendering with `**` emphasis
    #[serde(rename = "highlighted_explanation_markdown")]
    pub rendered_light: String,
    /// Sorted by start, longer span first on ties
    pub matches: Vec<Match>,
    pub match_count: usize,
}

impl AnnotatedExplanation {
    /// Annotation of a text that carries no evidence
    pub fn unannotated(text: &str) -> Self {
        Self {
            original: text.to_string(),
            rendered_rich: text.to_string(),
            rendered_light: text.to_string(),
            matches: Vec::new(),
            match_count: 0,
        }
    }

    /// Distinct fields that produced at least one match
    pub fn matched_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for m in &self.matches {
            if !fields.contains(&m.field.as_str()) {
                fields.push(&m.field);
            }
        }
        fields
    }
}
