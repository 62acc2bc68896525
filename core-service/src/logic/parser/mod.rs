//! Parser Module
//!
//! Turns free-text oracle replies into typed values.
//!
//! ## Structure
//! - `decision`: DECISION / CONFIDENCE / EXPLANATION extraction
//! - `probability`: numeric suitability score extraction

pub mod decision;
pub mod probability;

pub use decision::{parse_decision, Decision, ParsedDecision};
pub use probability::{extract_probability, parse_probability};
