//! Phrase Matcher
//!
//! Locates candidate attribute values inside an explanation.
//! All spans refer to the explanation exactly as given.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::types::{Match, MULTI_FIELD_PHRASE};
use crate::logic::candidate::CandidateRecord;

/// Candidate fields searched for evidence, in scan order
pub const KEY_FIELDS: [&str; 12] = [
    "skills",
    "experience",
    "education",
    "years_of_experience",
    "job_title",
    "certifications",
    "achievements",
    "languages",
    "tools",
    "projects",
    "name",
    "location",
];

/// Keywords never matched on their own
pub const STOP_WORDS: [&str; 7] = ["and", "the", "has", "with", "for", "are", "not"];

/// Split keywords must be longer than this (in characters)
const MIN_KEYWORD_CHARS: usize = 2;

/// Cross-field phrases must be longer than this (in characters)
const MIN_PHRASE_CHARS: usize = 10;

// Maximal runs of three or more whitespace-separated words
static PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\s+\w+\s+\w+(?:\s+\w+)*\b").expect("phrase pattern"));

/// Keywords for one field value
///
/// Comma/semicolon pieces longer than two characters; when none survive the
/// whole trimmed value is used as-is so short values like `"5"` still count.
pub fn field_keywords(value: &str) -> Vec<String> {
    let pieces: Vec<String> = value
        .split([',', ';'])
        .map(str::trim)
        .filter(|k| k.chars().count() > MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect();

    let keywords = if pieces.is_empty() {
        let whole = value.trim();
        if whole.is_empty() {
            Vec::new()
        } else {
            vec![whole.to_string()]
        }
    } else {
        pieces
    };

    keywords
        .into_iter()
        .filter(|k| !is_stop_word(k))
        .collect()
}

fn is_stop_word(keyword: &str) -> bool {
    let lower = keyword.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

/// Every case-insensitive, non-overlapping occurrence of `keyword`
///
/// Keywords of two characters or fewer only match as whole words.
pub fn find_occurrences(text: &str, keyword: &str, field: &str) -> Vec<Match> {
    let pattern = match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            log::warn!("Skipping keyword {:?} from {}: {}", keyword, field, e);
            return Vec::new();
        }
    };

    let keyword_lower = keyword.to_lowercase();
    let whole_word = keyword.chars().count() <= MIN_KEYWORD_CHARS;
    pattern
        .find_iter(text)
        // Case folding is wider than lowercasing; keep only exact lowercase equals
        .filter(|m| m.as_str().to_lowercase() == keyword_lower)
        .filter(|m| !whole_word || is_whole_word(text, m.start(), m.end()))
        .map(|m| Match {
            field: field.to_string(),
            keyword: keyword.to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    !text[..start].chars().next_back().is_some_and(is_word)
        && !text[end..].chars().next().is_some_and(is_word)
}

/// Multi-word phrases (3+ words, >10 chars) from the lowercased field values
pub fn cross_field_phrases(values: &[&str]) -> Vec<String> {
    let combined = values.join(" ").to_lowercase();
    let mut seen = HashSet::new();

    PHRASE_RE
        .find_iter(&combined)
        .map(|m| m.as_str().to_string())
        .filter(|p| p.chars().count() > MIN_PHRASE_CHARS)
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// All matches between a candidate and an explanation, sorted
pub fn find_matches(explanation: &str, candidate: &CandidateRecord) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut values: Vec<&str> = Vec::new();

    if explanation.is_empty() {
        return matches;
    }

    for field in KEY_FIELDS {
        let Some(value) = candidate.non_empty(field) else {
            continue;
        };
        values.push(value);

        for keyword in field_keywords(value) {
            matches.extend(find_occurrences(explanation, &keyword, field));
        }
    }

    for phrase in cross_field_phrases(&values) {
        matches.extend(find_occurrences(explanation, &phrase, MULTI_FIELD_PHRASE));
    }

    sort_matches(&mut matches);
    matches
}

/// Ascending start; on equal starts the longer span first
pub fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));
}
