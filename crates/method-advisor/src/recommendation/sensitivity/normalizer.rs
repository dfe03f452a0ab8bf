use super::super::domain::{Answers, FactorKey};
use super::catalog::{FactorDefinition, FACTOR_OPTIONS};
use std::collections::BTreeMap;

/// Ordinal inputs keyed by factor, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct OrdinalInputs {
    values: BTreeMap<FactorKey, f64>,
}

impl OrdinalInputs {
    pub(crate) fn get(&self, factor: FactorKey) -> Option<f64> {
        self.values.get(&factor).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (FactorKey, f64)> + '_ {
        self.values.iter().map(|(factor, value)| (*factor, *value))
    }

    pub(crate) fn at_least(&self, factor: FactorKey, threshold: f64) -> bool {
        self.get(factor).is_some_and(|value| value >= threshold)
    }

    pub(crate) fn at_most(&self, factor: FactorKey, threshold: f64) -> bool {
        self.get(factor).is_some_and(|value| value <= threshold)
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: &[(FactorKey, f64)]) -> Self {
        Self {
            values: pairs.iter().copied().collect(),
        }
    }
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

fn resolve(definition: &FactorDefinition, answer: &str) -> Option<f64> {
    if let Some(option) = definition.options.iter().find(|option| option.label == answer) {
        return Some(option.value);
    }

    let folded = fold(answer);
    definition
        .options
        .iter()
        .find(|option| fold(option.label) == folded)
        .map(|option| option.value)
}

/// Map free-text answers onto catalog ordinals, silently dropping anything unresolved.
pub(crate) fn normalize_answers(answers: &Answers) -> OrdinalInputs {
    let values = FACTOR_OPTIONS
        .iter()
        .filter_map(|definition| {
            let answer = answers.get(definition.factor.as_str())?;
            resolve(definition, answer).map(|value| (definition.factor, value))
        })
        .collect();

    OrdinalInputs { values }
}
