//! Surrogate pipeline
//!
//! segment -> perturb -> score -> kernel -> select -> fit -> rank.

use ndarray::{s, Array1, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::fit::{kernel_weights, select_features, weighted_ridge};
use super::perturb::{generate, segment_features, PerturbationSet};
use super::probability::ProbabilityModel;
use super::types::{ExplainError, FeatureImportance, SurrogateExplanation};
use crate::logic::config::ExplainConfig;

/// Explain one prediction of `model` around free-form `text`
///
/// Segments the text into fields, queries the model on masked copies and
/// fits a locality-weighted linear surrogate on the field masks.
pub async fn explain(
    text: &str,
    model: &dyn ProbabilityModel,
    config: &ExplainConfig,
) -> Result<SurrogateExplanation, ExplainError> {
    explain_segments(segment_features(text), model, config).await
}

/// Same as [`explain`] with the fields already known
///
/// Each segment is masked as a unit; nothing inside it is re-split.
pub async fn explain_segments(
    segments: Vec<String>,
    model: &dyn ProbabilityModel,
    config: &ExplainConfig,
) -> Result<SurrogateExplanation, ExplainError> {
    let features: Vec<String> = segments
        .into_iter()
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect();
    if features.is_empty() {
        return Err(ExplainError::NoFeatures);
    }

    let set = {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate(&features, config.num_samples, &mut rng)
    };

    log::debug!(
        "Explaining {} features over {} perturbed samples",
        set.features.len(),
        set.len()
    );

    let rows = match (config.deadline(), config.deadline_secs) {
        (Some(deadline), Some(secs)) => tokio::time::timeout(deadline, model.predict_proba(&set.texts))
            .await
            .map_err(|_| ExplainError::DeadlineExceeded(secs))??,
        _ => model.predict_proba(&set.texts).await?,
    };

    let y = positive_column(&rows, set.len())?;
    fit_explanation(&set, &y, config)
}

/// Check the model output and keep P(positive)
fn positive_column(rows: &[[f64; 2]], expected: usize) -> Result<Array1<f64>, ExplainError> {
    if rows.len() != expected {
        return Err(ExplainError::RowCountMismatch {
            expected,
            got: rows.len(),
        });
    }

    for (index, row) in rows.iter().enumerate() {
        if !row.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p)) {
            return Err(ExplainError::InvalidProbability { index, value: *row });
        }
    }

    Ok(rows.iter().map(|row| row[1]).collect())
}

/// Fit the surrogate on an already-scored perturbation set
pub fn fit_explanation(
    set: &PerturbationSet,
    y: &Array1<f64>,
    config: &ExplainConfig,
) -> Result<SurrogateExplanation, ExplainError> {
    let weights = kernel_weights(&set.masks, config.kernel_width);
    let used = select_features(&set.masks, y, &weights, config.num_features)?;

    let x = set.masks.select(Axis(1), &used);
    let fit = weighted_ridge(&x, y, &weights, config.ridge_alpha)?;
    let score = fit.score(&x, y, &weights);
    let local_prediction = fit.predict(&x.slice(s![0..1, ..]).to_owned())[0];

    let mut ranked: Vec<(usize, f64)> = used
        .iter()
        .copied()
        .zip(fit.coefficients.iter().copied())
        .collect();
    ranked.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let importances = ranked
        .into_iter()
        .map(|(col, weight)| {
            let weight = round3(weight);
            FeatureImportance {
                feature: set.features[col].clone(),
                weight,
                supports_positive_class: weight > 0.0,
            }
        })
        .collect();

    Ok(SurrogateExplanation {
        importances,
        intercept: fit.intercept,
        score,
        local_prediction,
        sample_count: set.len(),
    })
}

fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // -0.0 serializes as "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::explain::probability::FnProbability;
    use async_trait::async_trait;
    use std::time::Duration;

    const PROFILE: &str =
        "Skills: Python, SQL. Experience: Led a data team. Education: BSc Statistics. Years of experience: 5";

    fn config(num_features: usize, num_samples: usize) -> ExplainConfig {
        ExplainConfig {
            num_features,
            num_samples,
            ..ExplainConfig::seeded(42)
        }
    }

    fn python_driven(texts: &[String]) -> Result<Vec<[f64; 2]>, ExplainError> {
        Ok(texts
            .iter()
            .map(|t| if t.contains("Python") { [0.1, 0.9] } else { [0.9, 0.1] })
            .collect())
    }

    #[tokio::test]
    async fn test_driver_feature_ranks_first() {
        let explanation = explain(PROFILE, &FnProbability(python_driven), &config(4, 60))
            .await
            .unwrap();

        assert!(explanation.importances.len() <= 4);
        let top = &explanation.importances[0];
        assert_eq!(top.feature, "Skills: Python, SQL");
        assert!(top.weight > 0.3, "weight {}", top.weight);
        assert!(top.supports_positive_class);
        for other in &explanation.importances[1..] {
            assert!(other.weight.abs() < top.weight);
        }
        assert_eq!(explanation.sample_count, 60);
    }

    #[tokio::test]
    async fn test_constant_model_gives_zero_weights() {
        let model = FnProbability(|texts: &[String]| -> Result<Vec<[f64; 2]>, ExplainError> {
            Ok(vec![[0.5, 0.5]; texts.len()])
        });
        let explanation = explain(PROFILE, &model, &config(4, 20)).await.unwrap();

        assert!(!explanation.importances.is_empty());
        for item in &explanation.importances {
            assert_eq!(item.weight, 0.0);
            assert!(!item.supports_positive_class);
        }
        assert!((explanation.local_prediction - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_importances_sorted_and_bounded() {
        let model = FnProbability(|texts: &[String]| -> Result<Vec<[f64; 2]>, ExplainError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut p: f64 = 0.1;
                    if t.contains("Python") {
                        p += 0.5;
                    }
                    if t.contains("BSc") {
                        p += 0.2;
                    }
                    [1.0 - p, p]
                })
                .collect())
        });
        let explanation = explain(PROFILE, &model, &config(2, 80)).await.unwrap();

        assert_eq!(explanation.importances.len(), 2);
        assert!(explanation.importances[0].weight.abs() >= explanation.importances[1].weight.abs());
        assert_eq!(explanation.importances[0].feature, "Skills: Python, SQL");
        assert_eq!(explanation.importances[1].feature, "Education: BSc Statistics");
    }

    #[tokio::test]
    async fn test_seeded_runs_are_identical() {
        let a = explain(PROFILE, &FnProbability(python_driven), &config(3, 30)).await.unwrap();
        let b = explain(PROFILE, &FnProbability(python_driven), &config(3, 30)).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_empty_text_has_no_features() {
        let err = explain("   ", &FnProbability(python_driven), &config(4, 10))
            .await
            .unwrap_err();
        assert_eq!(err, ExplainError::NoFeatures);
    }

    #[tokio::test]
    async fn test_wrong_row_count_is_rejected() {
        let model = FnProbability(|_: &[String]| -> Result<Vec<[f64; 2]>, ExplainError> {
            Ok(vec![[0.5, 0.5]; 3])
        });
        let err = explain(PROFILE, &model, &config(4, 10)).await.unwrap_err();
        assert_eq!(err, ExplainError::RowCountMismatch { expected: 10, got: 3 });
    }

    #[tokio::test]
    async fn test_invalid_probability_is_rejected() {
        let model = FnProbability(|texts: &[String]| -> Result<Vec<[f64; 2]>, ExplainError> {
            let mut rows = vec![[0.5, 0.5]; texts.len()];
            rows[2] = [f64::NAN, 0.5];
            Ok(rows)
        });
        let err = explain(PROFILE, &model, &config(4, 10)).await.unwrap_err();
        assert!(matches!(err, ExplainError::InvalidProbability { index: 2, .. }));
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = FnProbability(|_: &[String]| -> Result<Vec<[f64; 2]>, ExplainError> {
            Err(ExplainError::ProbabilityFailed("backend down".to_string()))
        });
        let err = explain(PROFILE, &model, &config(4, 10)).await.unwrap_err();
        assert_eq!(err, ExplainError::ProbabilityFailed("backend down".to_string()));
    }

    struct SlowModel;

    #[async_trait]
    impl ProbabilityModel for SlowModel {
        async fn predict_proba(&self, texts: &[String]) -> Result<Vec<[f64; 2]>, ExplainError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![[0.5, 0.5]; texts.len()])
        }
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let config = ExplainConfig {
            deadline_secs: Some(1),
            ..config(4, 10)
        };
        let err = explain(PROFILE, &SlowModel, &config).await.unwrap_err();
        assert_eq!(err, ExplainError::DeadlineExceeded(1));
    }

    #[tokio::test]
    async fn test_segments_are_not_resplit() {
        let segments = vec![
            "Skills: Rust".to_string(),
            "Experience: Worked at Acme. Role: lead engineer".to_string(),
        ];
        let model = FnProbability(|texts: &[String]| -> Result<Vec<[f64; 2]>, ExplainError> {
            Ok(texts
                .iter()
                .map(|t| if t.contains("Acme") { [0.2, 0.8] } else { [0.8, 0.2] })
                .collect())
        });
        let explanation = explain_segments(segments, &model, &config(4, 30)).await.unwrap();

        assert_eq!(explanation.importances.len(), 2);
        assert_eq!(
            explanation.importances[0].feature,
            "Experience: Worked at Acme. Role: lead engineer"
        );
        assert!(explanation.importances.iter().all(|i| i.feature != "Role: lead engineer"));
    }

    #[tokio::test]
    async fn test_blank_segments_have_no_features() {
        let err = explain_segments(vec!["  ".to_string()], &FnProbability(python_driven), &config(4, 10))
            .await
            .unwrap_err();
        assert_eq!(err, ExplainError::NoFeatures);
    }

    #[test]
    fn test_round3_normalizes_negative_zero() {
        assert_eq!(round3(-0.0001).to_string(), "0");
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(-0.4567), -0.457);
    }
}
