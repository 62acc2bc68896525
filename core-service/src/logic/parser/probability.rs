//! Suitability score extraction
//!
//! Reads a probability out of a scoring reply. Unreadable replies map to a
//! caller-supplied neutral value so one bad reply never breaks a fit.

use once_cell::sync::Lazy;
use regex::Regex;

static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0\.\d+").expect("decimal pattern"));

/// Probability from a reply, or `None` when nothing readable is present
pub fn parse_probability(reply: &str) -> Option<f64> {
    if let Some(m) = DECIMAL_RE.find(reply) {
        if let Ok(p) = m.as_str().parse::<f64>() {
            return Some(p);
        }
    }

    let trimmed = reply.trim();
    if reply.contains("1.0") || trimmed == "1" {
        Some(1.0)
    } else if reply.contains("0.0") || trimmed == "0" {
        Some(0.0)
    } else {
        None
    }
}

/// Probability from a reply with the neutral fallback applied
pub fn extract_probability(reply: &str, neutral: f64) -> f64 {
    match parse_probability(reply) {
        Some(p) => p,
        None => {
            log::debug!("Unreadable score reply {:?}, using neutral {}", truncate(reply, 40), neutral);
            neutral
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
