use super::super::domain::Answers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discriminative weight per factor, derived offline from attribute entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorWeights(BTreeMap<String, f64>);

const ENTROPY_WEIGHTS: &[(&str, f64)] = &[
    ("project_size", 0.0712),
    ("planning", 0.1035),
    ("sourcing", 0.0654),
    ("goals", 0.0821),
    ("customer_size", 0.0588),
    ("customer_communication", 0.0947),
    ("payment_method", 0.0763),
    ("design", 0.0892),
    ("teams", 0.0985),
    ("development", 0.1024),
    ("integration_testing", 0.0931),
    ("closing", 0.0648),
];

impl Default for FactorWeights {
    fn default() -> Self {
        Self(
            ENTROPY_WEIGHTS
                .iter()
                .map(|(factor, weight)| (factor.to_string(), *weight))
                .collect(),
        )
    }
}

impl FactorWeights {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self(weights)
    }

    pub fn get(&self, factor: &str) -> Option<f64> {
        self.0.get(factor).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rescale the static table to the factors actually answered.
    ///
    /// Answered factors with a known weight share a total of 1.0. When none of
    /// the answered factors is known, every answered factor gets `1/N`.
    pub fn renormalize(&self, answers: &Answers) -> BTreeMap<String, f64> {
        let known: BTreeMap<String, f64> = answers
            .keys()
            .filter_map(|factor| self.get(factor).map(|weight| (factor.clone(), weight)))
            .collect();
        let total: f64 = known.values().sum();

        if !known.is_empty() && total > 0.0 {
            return known
                .into_iter()
                .map(|(factor, weight)| (factor, weight / total))
                .collect();
        }

        if answers.is_empty() {
            return BTreeMap::new();
        }

        let uniform = 1.0 / answers.len() as f64;
        answers
            .keys()
            .map(|factor| (factor.clone(), uniform))
            .collect()
    }
}
