//! Highlight Module
//!
//! Marks the places where an oracle explanation repeats candidate attributes,
//! so a reviewer can see which claims are grounded in the profile.
//!
//! ## Structure
//! - `types`: `Match`, `AnnotatedExplanation`
//! - `matcher`: keyword and cross-field phrase search
//! - `render`: rich (HTML) and light (markdown) folds
//!
//! ## Usage
//! ```ignore
//! use fitlens_core::logic::highlight::highlight;
//!
//! let annotated = highlight(&explanation, &candidate);
//! println!("{} matches: {}", annotated.match_count, annotated.rendered_light);
//! ```

pub mod types;
pub mod matcher;
pub mod render;


pub use types::{AnnotatedExplanation, Match, MULTI_FIELD_PHRASE};
pub use matcher::{find_matches, KEY_FIELDS, STOP_WORDS};
pub use render::{render, LightMarker, Marker, RichMarker};

use crate::logic::candidate::CandidateRecord;

/// Annotate `explanation` with every candidate attribute it mentions
pub fn highlight(explanation: &str, candidate: &CandidateRecord) -> AnnotatedExplanation {
    let matches = find_matches(explanation, candidate);
    if matches.is_empty() {
        return AnnotatedExplanation::unannotated(explanation);
    }

    let rendered_rich = render(explanation, &matches, &RichMarker);
    let rendered_light = render(explanation, &matches, &LightMarker);

    log::debug!("Highlighted {} matches for {}", matches.len(), candidate.label());

    AnnotatedExplanation {
        original: explanation.to_string(),
        rendered_rich,
        rendered_light,
        match_count: matches.len(),
        matches,
    }
}
