//! Perturbation generator
//!
//! Splits a candidate description into labelled fields and masks random
//! subsets of them. Pure given the RNG.

use ndarray::Array2;
use once_cell::sync::Lazy;
use rand::seq::index;
use rand::Rng;
use regex::Regex;

/// Separator used when re-joining fields
pub const FIELD_SEPARATOR: &str = ". ";

// "Skills:", "Years of experience:" ...
static LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][A-Za-z ]{0,40}:\s").expect("label pattern"));

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.;!?]\s+").expect("sentence pattern"));

/// Perturbed copies of one instance
#[derive(Debug, Clone)]
pub struct PerturbationSet {
    pub features: Vec<String>,
    /// samples x features, 1.0 = field kept; row 0 is the unperturbed instance
    pub masks: Array2<f64>,
    /// Rebuilt text per row
    pub texts: Vec<String>,
}

impl PerturbationSet {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Split a description into fields
///
/// Fields start at a capitalised `Label: ` at the beginning of the text or
/// after a sentence break. Text without labels is split into sentences.
pub fn segment_features(text: &str) -> Vec<String> {
    let starts: Vec<usize> = LABEL_RE
        .find_iter(text)
        .map(|m| m.start())
        .filter(|&pos| pos == 0 || text[..pos].trim_end().ends_with('.'))
        .collect();

    if starts.is_empty() {
        return SENTENCE_RE
            .split(text)
            .map(|s| s.trim().trim_end_matches('.').trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    let mut bounds = starts.clone();
    if bounds[0] != 0 {
        bounds.insert(0, 0);
    }
    bounds.push(text.len());

    bounds
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let segment = text[w[0]..w[1]].trim();
            // The separator dot belongs to the join, not the value
            if i + 2 < bounds.len() {
                segment.strip_suffix('.').unwrap_or(segment).trim_end()
            } else {
                segment
            }
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Re-join the fields kept by a mask row
pub fn compose(features: &[String], mask: impl IntoIterator<Item = f64>) -> String {
    features
        .iter()
        .zip(mask)
        .filter(|(_, keep)| *keep > 0.5)
        .map(|(f, _)| f.as_str())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Build `num_samples` rows (at least 2): the instance itself, then rows
/// with between 1 and `max(d - 1, 1)` fields masked
pub fn generate<R: Rng + ?Sized>(features: &[String], num_samples: usize, rng: &mut R) -> PerturbationSet {
    let d = features.len();
    let n = num_samples.max(2);
    let mut masks = Array2::<f64>::ones((n, d));

    if d > 0 {
        let max_removed = d.saturating_sub(1).max(1);
        for row in 1..n {
            let removed = rng.gen_range(1..=max_removed);
            for col in index::sample(rng, d, removed) {
                masks[[row, col]] = 0.0;
            }
        }
    }

    let texts = masks
        .rows()
        .into_iter()
        .map(|row| compose(features, row.iter().copied()))
        .collect();

    PerturbationSet {
        features: features.to_vec(),
        masks,
        texts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fields() -> Vec<String> {
        segment_features("Skills: Python, SQL. Experience: Led a team. Education: BSc. Years of experience: 5")
    }

    #[test]
    fn test_segment_labelled_fields() {
        assert_eq!(
            fields(),
            vec![
                "Skills: Python, SQL",
                "Experience: Led a team",
                "Education: BSc",
                "Years of experience: 5",
            ]
        );
    }

    #[test]
    fn test_segment_ignores_colons_inside_values() {
        let features = segment_features("Experience: Worked at Acme: built APIs. Skills: Go");
        assert_eq!(features, vec!["Experience: Worked at Acme: built APIs", "Skills: Go"]);
    }

    #[test]
    fn test_segment_unlabelled_text_by_sentence() {
        let features = segment_features("Knows Rust. Likes compilers; ships fast.");
        assert_eq!(features, vec!["Knows Rust", "Likes compilers", "ships fast"]);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment_features("").is_empty());
        assert!(segment_features("  . ").is_empty());
    }

    #[test]
    fn test_compose_round_trip() {
        let features = fields();
        let text = compose(&features, vec![1.0; features.len()]);
        assert_eq!(text, "Skills: Python, SQL. Experience: Led a team. Education: BSc. Years of experience: 5");
        assert_eq!(segment_features(&text), features);
    }

    #[test]
    fn test_generate_shape_and_first_row() {
        let features = fields();
        let mut rng = StdRng::seed_from_u64(42);
        let set = generate(&features, 10, &mut rng);

        assert_eq!(set.masks.dim(), (10, 4));
        assert_eq!(set.len(), 10);
        assert!(set.masks.row(0).iter().all(|&v| v == 1.0));
        assert_eq!(set.texts[0], compose(&features, vec![1.0; 4]));

        for row in set.masks.rows().into_iter().skip(1) {
            let kept = row.iter().filter(|&&v| v == 1.0).count();
            assert!((1..=3).contains(&kept), "kept {} of 4", kept);
        }
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let features = fields();
        let a = generate(&features, 12, &mut StdRng::seed_from_u64(7));
        let b = generate(&features, 12, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.masks, b.masks);
        assert_eq!(a.texts, b.texts);
    }

    #[test]
    fn test_generate_single_feature_masks_it() {
        let features = vec!["Skills: Rust".to_string()];
        let set = generate(&features, 3, &mut StdRng::seed_from_u64(1));
        assert_eq!(set.texts, vec!["Skills: Rust", "", ""]);
    }

    #[test]
    fn test_generate_minimum_two_rows() {
        let set = generate(&fields(), 0, &mut StdRng::seed_from_u64(1));
        assert_eq!(set.len(), 2);
    }
}
