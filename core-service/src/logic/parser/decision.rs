//! Structured decision extraction
//!
//! Each field has its own total extractor returning `Option`; a reply that
//! is missing one field still yields the others.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DECISION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)DECISION:\s*(yes|no)").expect("decision pattern"));

static CONFIDENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CONFIDENCE:\s*(\d+)").expect("confidence pattern"));

// Lazy body stops at the first blank line or end of text
static EXPLANATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)EXPLANATION:\s*(.*?)(?:\n\n|\z)").expect("explanation pattern"));

/// Hiring decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Yes => "yes",
            Decision::No => "no",
            Decision::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision / confidence / explanation triple read from an oracle reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDecision {
    pub decision: Decision,
    /// 0-100, 0 when the reply carries none
    pub confidence: u8,
    pub explanation: String,
}

/// Parse an oracle reply. Never fails.
pub fn parse_decision(reply: &str) -> ParsedDecision {
    let decision = extract_decision(reply);
    let confidence = extract_confidence(reply);
    let explanation = extract_explanation(reply);

    if decision.is_none() || confidence.is_none() || explanation.is_none() {
        log::debug!(
            "Partially structured reply (decision={}, confidence={}, explanation={})",
            decision.is_some(),
            confidence.is_some(),
            explanation.is_some()
        );
    }

    ParsedDecision {
        decision: decision.unwrap_or_default(),
        confidence: confidence.unwrap_or(0),
        explanation: explanation.unwrap_or_else(|| reply.to_string()),
    }
}

pub fn extract_decision(reply: &str) -> Option<Decision> {
    let caps = DECISION_RE.captures(reply)?;
    match caps[1].to_ascii_lowercase().as_str() {
        "yes" => Some(Decision::Yes),
        "no" => Some(Decision::No),
        _ => None,
    }
}

/// Values above 100 are clamped; digit runs too long to read are ignored
pub fn extract_confidence(reply: &str) -> Option<u8> {
    let caps = CONFIDENCE_RE.captures(reply)?;
    let value: u64 = caps[1].parse().ok()?;
    Some(value.min(100) as u8)
}

pub fn extract_explanation(reply: &str) -> Option<String> {
    EXPLANATION_RE
        .captures(reply)
        .map(|caps| caps[1].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_reply() {
        let parsed = parse_decision("DECISION: yes\nCONFIDENCE: 82%\nEXPLANATION: Strong fit.");
        assert_eq!(parsed.decision, Decision::Yes);
        assert_eq!(parsed.confidence, 82);
        assert_eq!(parsed.explanation, "Strong fit.");
    }

    #[test]
    fn test_empty_reply_defaults() {
        let parsed = parse_decision("");
        assert_eq!(parsed.decision, Decision::Unknown);
        assert_eq!(parsed.confidence, 0);
        assert_eq!(parsed.explanation, "");
    }

    #[test]
    fn test_unstructured_reply_is_explanation() {
        let reply = "I think this person would do well.";
        let parsed = parse_decision(reply);
        assert_eq!(parsed.decision, Decision::Unknown);
        assert_eq!(parsed.confidence, 0);
        assert_eq!(parsed.explanation, reply);
    }

    #[test]
    fn test_fields_are_independent() {
        let parsed = parse_decision("Decision: NO\nExplanation: Lacks SQL.");
        assert_eq!(parsed.decision, Decision::No);
        assert_eq!(parsed.confidence, 0);
        assert_eq!(parsed.explanation, "Lacks SQL.");

        let parsed = parse_decision("confidence:   40 percent");
        assert_eq!(parsed.decision, Decision::Unknown);
        assert_eq!(parsed.confidence, 40);
        assert_eq!(parsed.explanation, "confidence:   40 percent");
    }

    #[test]
    fn test_explanation_stops_at_blank_line() {
        let reply = "DECISION: yes\nEXPLANATION: Knows Rust.\nShipped a compiler.\n\nNote: generated text.";
        let parsed = parse_decision(reply);
        assert_eq!(parsed.explanation, "Knows Rust.\nShipped a compiler.");
    }

    #[test]
    fn test_confidence_clamped_and_overflow_ignored() {
        assert_eq!(extract_confidence("CONFIDENCE: 150%"), Some(100));
        assert_eq!(extract_confidence("CONFIDENCE: 99999999999999999999999"), None);
    }

    #[test]
    fn test_decision_needs_yes_or_no() {
        assert_eq!(extract_decision("DECISION: maybe"), None);
        assert_eq!(extract_decision("DECISION:Yes, hire"), Some(Decision::Yes));
    }

    #[test]
    fn test_decision_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Decision::Unknown).unwrap(), "\"unknown\"");
        assert_eq!(Decision::Yes.to_string(), "yes");
    }
}
