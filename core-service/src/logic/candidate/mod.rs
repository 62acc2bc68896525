//! Candidate Module
//!
//! Candidate records and the CSV source they are read from.

pub mod types;
pub mod loader;

pub use types::CandidateRecord;
pub use loader::{load_candidates, read_candidates};

/// Candidate source errors
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error("cannot read candidate file {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed candidate CSV at row {row}: {message}")]
    Csv { row: usize, message: String },
}
