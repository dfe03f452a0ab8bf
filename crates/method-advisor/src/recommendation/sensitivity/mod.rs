//! Sensitivity/gate/nudge linear model over a fixed, hand-tuned configuration.

mod catalog;
mod normalizer;
mod rules;

pub use catalog::{bias, factor_catalog, sensitivity, FactorDefinition, FactorOption};

use super::domain::{
    rank, round4, Answers, Contribution, MethodScore, NormalizedInputs, ScoringResult,
    SensitivityContribution,
};
use super::ScoringStrategy;
use catalog::METHOD_PROFILES;
use normalizer::normalize_answers;
use rules::apply_rules;

pub const SENSITIVITY_ENGINE_VERSION: &str = "3.0.0";

/// Stateless scorer backed by the static sensitivity tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitivityEngine;

impl SensitivityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, answers: &Answers) -> ScoringResult {
        let inputs = normalize_answers(answers);
        let effects = apply_rules(&inputs);

        let mut ranking: Vec<MethodScore> = METHOD_PROFILES
            .iter()
            .filter(|profile| !effects.excluded.contains(&profile.methodology))
            .map(|profile| {
                let mut score = profile.bias + effects.nudge_total(profile.methodology);
                let mut contributions = Vec::new();

                for (factor, value) in inputs.iter() {
                    let sensitivity = profile.sensitivity(factor);
                    let delta = sensitivity * value;
                    score += delta;
                    contributions.push(Contribution::Sensitivity(SensitivityContribution {
                        factor,
                        normalized_value: value,
                        sensitivity,
                        delta: round4(delta),
                    }));
                }

                MethodScore {
                    method: profile.methodology.label().to_string(),
                    score: round4(score),
                    contributions,
                }
            })
            .collect();

        rank(&mut ranking);

        let inputs_normalized: NormalizedInputs = inputs
            .iter()
            .map(|(factor, value)| (factor.as_str().to_string(), value))
            .collect();

        ScoringResult {
            inputs_normalized,
            ranking,
            rules_applied: effects.trace,
            engine_version: SENSITIVITY_ENGINE_VERSION.to_string(),
        }
    }
}

impl ScoringStrategy for SensitivityEngine {
    fn engine_version(&self) -> &'static str {
        SENSITIVITY_ENGINE_VERSION
    }

    fn score(&self, answers: &Answers) -> ScoringResult {
        SensitivityEngine::score(self, answers)
    }
}
