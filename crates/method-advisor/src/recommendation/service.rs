use std::sync::Arc;

use super::domain::{Answers, ScoringResult};
use super::fuzzy::MethodCatalog;
use super::{EngineKind, Recommender, ScoringStrategy};

/// Facade holding both configured engines and the deployment's default choice.
///
/// Built once at startup and shared behind an `Arc`; nothing in it mutates.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    sensitivity: Recommender,
    fuzzy: Recommender,
    default_engine: EngineKind,
}

impl RecommendationService {
    pub fn new(catalog: Arc<MethodCatalog>, default_engine: EngineKind) -> Self {
        Self {
            sensitivity: Recommender::new(EngineKind::SensitivityGateNudge, catalog.clone()),
            fuzzy: Recommender::new(EngineKind::EntropyWeightedFuzzy, catalog),
            default_engine,
        }
    }

    pub fn default_engine(&self) -> EngineKind {
        self.default_engine
    }

    pub fn engine(&self, kind: EngineKind) -> &Recommender {
        match kind {
            EngineKind::SensitivityGateNudge => &self.sensitivity,
            EngineKind::EntropyWeightedFuzzy => &self.fuzzy,
        }
    }

    /// Score `answers` with `kind`, or the default engine when none is requested.
    pub fn recommend(&self, kind: Option<EngineKind>, answers: &Answers) -> ScoringResult {
        self.engine(kind.unwrap_or(self.default_engine)).score(answers)
    }
}
