//! Logic Module - Evaluation Engines
//!
//! ## Structure
//! - `candidate/` - Candidate records and CSV source
//! - `oracle/` - Text-generation client
//! - `parser/` - Reply parsing (decision, probability)
//! - `highlight/` - Phrase matching and annotated renders
//! - `explain/` - Local surrogate explainer
//! - `evaluation/` - Per-candidate orchestration

pub mod config;
pub mod prompt;

pub mod candidate;
pub mod oracle;
pub mod parser;
pub mod highlight;
pub mod explain;
pub mod evaluation;
