//! Per-candidate evaluation flow
//!
//! oracle -> parse -> highlight -> relevance -> surrogate, one candidate at a
//! time. Dropping the returned future stops the batch before the next
//! oracle call.

use std::sync::Arc;

use super::types::{
    EvaluateError, Evaluation, EvaluationMode, EvaluationRequest, EvaluationResult, InputProblem,
    LimeOutcome, RawFallback, RelevanceMetrics, StructuredEvaluation,
};
use crate::logic::candidate::CandidateRecord;
use crate::logic::config::EvaluatorConfig;
use crate::logic::explain::{explain_segments, ExplainerFailure, OracleProbability, SurrogateDiagnostics};
use crate::logic::highlight::highlight;
use crate::logic::oracle::{Oracle, OracleError};
use crate::logic::parser::parse_decision;
use crate::logic::prompt::{advanced_prompt, basic_prompt, surrogate_segments};

pub struct Evaluator {
    oracle: Arc<dyn Oracle>,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(oracle: Arc<dyn Oracle>, config: EvaluatorConfig) -> Self {
        Self { oracle, config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Model named by the request, or the configured default
    pub fn resolve_model<'a>(&'a self, request: &'a EvaluationRequest) -> &'a str {
        request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.config.oracle.default_model.as_str())
    }

    /// Evaluate every candidate in source order
    ///
    /// Input problems are reported before the oracle is called at all.
    /// Oracle failures stay inside the affected candidate's result.
    pub async fn evaluate_batch(
        &self,
        request: &EvaluationRequest,
        candidates: &[CandidateRecord],
    ) -> Result<Vec<EvaluationResult>, EvaluateError> {
        if request.job_description.trim().is_empty() {
            return Err(EvaluateError::InputInvalid(InputProblem::MissingJobDescription));
        }
        if candidates.is_empty() {
            return Err(EvaluateError::InputInvalid(InputProblem::NoCandidates));
        }

        let model = self.resolve_model(request);
        log::info!(
            "Evaluating {} candidates with {} ({:?} mode)",
            candidates.len(),
            model,
            request.mode
        );

        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let result = match request.mode {
                EvaluationMode::Basic => self.evaluate_basic(&request.job_description, model, candidate).await,
                EvaluationMode::Advanced => {
                    self.evaluate_advanced(&request.job_description, model, candidate).await
                }
            };
            results.push(result);
        }

        let failed = results.iter().filter(|r| r.is_failed()).count();
        if failed > 0 {
            log::warn!("{} of {} candidates had no oracle reply", failed, results.len());
        }

        Ok(results)
    }

    pub async fn evaluate_basic(
        &self,
        job_description: &str,
        model: &str,
        candidate: &CandidateRecord,
    ) -> EvaluationResult {
        let prompt = basic_prompt(job_description, candidate);

        match self.oracle.generate(&prompt, model).await {
            Ok(reply) => {
                let annotated = highlight(&reply, candidate);
                EvaluationResult {
                    candidate: candidate.clone(),
                    evaluation: Evaluation::Text(reply),
                    phrase_matches: Some(annotated),
                    lime_explanation: None,
                    lime_diagnostics: None,
                }
            }
            Err(e) => failed_result(candidate, &e),
        }
    }

    pub async fn evaluate_advanced(
        &self,
        job_description: &str,
        model: &str,
        candidate: &CandidateRecord,
    ) -> EvaluationResult {
        let prompt = advanced_prompt(job_description, candidate);

        let reply = match self.oracle.generate(&prompt, model).await {
            Ok(reply) => reply,
            Err(e) => return failed_result(candidate, &e),
        };

        let parsed = parse_decision(&reply);
        let annotated = highlight(&parsed.explanation, candidate);
        let relevance_metrics = RelevanceMetrics::compute(annotated.match_count, &parsed.explanation);

        let (lime_explanation, lime_diagnostics) = if self.config.explain.enabled {
            let (outcome, diagnostics) = self.surrogate(job_description, model, candidate).await;
            (Some(outcome), diagnostics)
        } else {
            (None, None)
        };

        EvaluationResult {
            candidate: candidate.clone(),
            evaluation: Evaluation::Structured(StructuredEvaluation {
                decision: parsed.decision,
                confidence: parsed.confidence,
                explanation: parsed.explanation,
                phrase_matches: annotated,
                relevance_metrics,
            }),
            phrase_matches: None,
            lime_explanation,
            lime_diagnostics,
        }
    }

    async fn surrogate(
        &self,
        job_description: &str,
        model: &str,
        candidate: &CandidateRecord,
    ) -> (LimeOutcome, Option<SurrogateDiagnostics>) {
        let explain_config = &self.config.explain;
        let segments = surrogate_segments(candidate);
        let probability = OracleProbability::new(
            self.oracle.as_ref(),
            model,
            job_description,
            explain_config.neutral_probability,
        )
        .with_max_concurrency(explain_config.max_concurrency);

        match explain_segments(segments, &probability, explain_config).await {
            Ok(explanation) => {
                let diagnostics = explanation.diagnostics();
                log::debug!(
                    "Surrogate for {}: R² {:.3}, local prediction {:.3}",
                    candidate.label(),
                    diagnostics.score,
                    diagnostics.local_prediction
                );
                (LimeOutcome::Ranking(explanation.importances), Some(diagnostics))
            }
            Err(e) => {
                log::warn!("No surrogate explanation for {}: {}", candidate.label(), e);
                (LimeOutcome::Failed(vec![ExplainerFailure::from(&e)]), None)
            }
        }
    }
}

fn failed_result(candidate: &CandidateRecord, error: &OracleError) -> EvaluationResult {
    log::warn!("Oracle call failed for {}: {}", candidate.label(), error);
    EvaluationResult {
        candidate: candidate.clone(),
        evaluation: Evaluation::Failed(RawFallback {
            raw_response: match error {
                OracleError::Status { body, .. } => body.clone(),
                _ => String::new(),
            },
            error: error.to_string(),
        }),
        phrase_matches: None,
        lime_explanation: None,
        lime_diagnostics: None,
    }
}
