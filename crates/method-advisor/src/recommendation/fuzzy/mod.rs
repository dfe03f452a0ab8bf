//! Entropy-weighted fuzzy matching over a data-driven attribute catalog.

mod catalog;
mod matcher;
mod weights;

pub use catalog::{CatalogError, MethodAttributes, MethodCatalog};
pub use matcher::fuzzy_match;
pub use weights::FactorWeights;

use super::domain::{
    rank, round4, Answers, Contribution, FuzzyContribution, MethodScore, NormalizedInputs,
    ScoringResult,
};
use super::ScoringStrategy;
use std::sync::Arc;

pub const FUZZY_ENGINE_VERSION: &str = "4.3.0-entropy-weighted-fuzzy";

/// Scores every catalog methodology by weighted attribute similarity.
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    catalog: Arc<MethodCatalog>,
}

impl FuzzyEngine {
    pub fn new(catalog: Arc<MethodCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MethodCatalog {
        &self.catalog
    }

    pub fn score(&self, answers: &Answers) -> ScoringResult {
        let weights = self.catalog.weights().renormalize(answers);

        let mut ranking: Vec<MethodScore> = self
            .catalog
            .methods()
            .iter()
            .map(|method| {
                let mut score = 0.0;
                let mut contributions = Vec::with_capacity(weights.len());

                for (factor, weight) in &weights {
                    let user_value = answers.get(factor).map(String::as_str).unwrap_or_default();
                    let method_value = method.attribute(factor);
                    let match_score = fuzzy_match(user_value, method_value);
                    let delta = weight * match_score;
                    score += delta;

                    contributions.push(Contribution::Fuzzy(FuzzyContribution {
                        factor: factor.clone(),
                        user_value: user_value.to_string(),
                        method_value: method_value.map(str::to_string),
                        weight: round4(*weight),
                        match_score: round4(match_score),
                        delta: round4(delta),
                    }));
                }

                MethodScore {
                    method: method.name.clone(),
                    score: round4(score),
                    contributions,
                }
            })
            .collect();

        rank(&mut ranking);

        let inputs_normalized: NormalizedInputs = weights
            .into_iter()
            .map(|(factor, weight)| (factor, round4(weight)))
            .collect();

        ScoringResult {
            inputs_normalized,
            ranking,
            rules_applied: Vec::new(),
            engine_version: FUZZY_ENGINE_VERSION.to_string(),
        }
    }
}

impl ScoringStrategy for FuzzyEngine {
    fn engine_version(&self) -> &'static str {
        FUZZY_ENGINE_VERSION
    }

    fn score(&self, answers: &Answers) -> ScoringResult {
        FuzzyEngine::score(self, answers)
    }
}
