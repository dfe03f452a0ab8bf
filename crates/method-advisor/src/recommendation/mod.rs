//! Methodology recommendation engines.
//!
//! Two strategies rank the same methodologies from the same questionnaire
//! answers: a sensitivity/gate/nudge linear model over fixed tables, and an
//! entropy-weighted fuzzy matcher over a CSV attribute catalog. Both produce a
//! [`ScoringResult`] and are selected through [`EngineKind`].

pub mod domain;
pub mod fuzzy;
pub mod router;
pub mod sensitivity;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    canonical_method_name, round4, Answers, Contribution, FactorKey, FuzzyContribution,
    MethodDelta, MethodScore, Methodology, NormalizedInputs, RuleApplication, ScoringResult,
    SensitivityContribution,
};
pub use fuzzy::{
    fuzzy_match, CatalogError, FactorWeights, FuzzyEngine, MethodAttributes, MethodCatalog,
    FUZZY_ENGINE_VERSION,
};
pub use router::recommendation_router;
pub use sensitivity::{SensitivityEngine, SENSITIVITY_ENGINE_VERSION};
pub use service::RecommendationService;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Common contract for every ranking strategy.
pub trait ScoringStrategy: Send + Sync {
    fn engine_version(&self) -> &'static str;
    fn score(&self, answers: &Answers) -> ScoringResult;
}

/// Selector for the available scoring strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    SensitivityGateNudge,
    EntropyWeightedFuzzy,
}

impl EngineKind {
    pub fn label(&self) -> &'static str {
        match self {
            EngineKind::SensitivityGateNudge => "sensitivity",
            EngineKind::EntropyWeightedFuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scoring engine '{0}' (expected 'sensitivity' or 'fuzzy')")]
pub struct EngineSelectionError(pub String);

impl FromStr for EngineKind {
    type Err = EngineSelectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sensitivity" | "gate-nudge" | "sensitivity_gate_nudge" | "v3" => {
                Ok(Self::SensitivityGateNudge)
            }
            "fuzzy" | "entropy" | "entropy_weighted_fuzzy" | "v4" => Ok(Self::EntropyWeightedFuzzy),
            _ => Err(EngineSelectionError(value.to_string())),
        }
    }
}

/// A configured scoring strategy.
#[derive(Debug, Clone)]
pub enum Recommender {
    SensitivityGateNudge(SensitivityEngine),
    EntropyWeightedFuzzy(FuzzyEngine),
}

impl Recommender {
    pub fn new(kind: EngineKind, catalog: Arc<MethodCatalog>) -> Self {
        match kind {
            EngineKind::SensitivityGateNudge => Self::SensitivityGateNudge(SensitivityEngine::new()),
            EngineKind::EntropyWeightedFuzzy => Self::EntropyWeightedFuzzy(FuzzyEngine::new(catalog)),
        }
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Recommender::SensitivityGateNudge(_) => EngineKind::SensitivityGateNudge,
            Recommender::EntropyWeightedFuzzy(_) => EngineKind::EntropyWeightedFuzzy,
        }
    }
}

impl ScoringStrategy for Recommender {
    fn engine_version(&self) -> &'static str {
        match self {
            Recommender::SensitivityGateNudge(engine) => engine.engine_version(),
            Recommender::EntropyWeightedFuzzy(engine) => engine.engine_version(),
        }
    }

    fn score(&self, answers: &Answers) -> ScoringResult {
        match self {
            Recommender::SensitivityGateNudge(engine) => engine.score(answers),
            Recommender::EntropyWeightedFuzzy(engine) => engine.score(answers),
        }
    }
}
