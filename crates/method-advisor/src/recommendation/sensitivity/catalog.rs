use serde::Serialize;

use super::super::domain::{FactorKey, Methodology};

/// One selectable answer for a factor and its ordinal position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorOption {
    pub label: &'static str,
    pub value: f64,
}

/// Question definition exposing every option a factor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorDefinition {
    pub factor: FactorKey,
    pub options: &'static [FactorOption],
}

const fn option(label: &'static str, value: f64) -> FactorOption {
    FactorOption { label, value }
}

// Ordinals run from the lightest, most adaptive practice (0.0) to the most
// formal or large-scale one (1.0). Development and integration testing run
// from manual/batched (0.0) to continuous (1.0).
pub(crate) const FACTOR_OPTIONS: [FactorDefinition; 12] = [
    FactorDefinition {
        factor: FactorKey::ProjectSize,
        options: &[option("Small", 0.0), option("Medium", 0.5), option("Large", 1.0)],
    },
    FactorDefinition {
        factor: FactorKey::Planning,
        options: &[
            option("Just-in-Time", 0.0),
            option("Iterative", 0.5),
            option("Up-front", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::Sourcing,
        options: &[
            option("Internal Sourcing", 0.0),
            option("Mixed Sourcing", 0.5),
            option("External Sourcing", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::Goals,
        options: &[
            option("Speed", 0.0),
            option("Balanced", 0.5),
            option("Predictability", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::CustomerSize,
        options: &[option("Small", 0.0), option("Medium", 0.5), option("Large", 1.0)],
    },
    FactorDefinition {
        factor: FactorKey::CustomerCommunication,
        options: &[
            option("Continuous Feedback Loops", 0.0),
            option("Milestone Reviews", 0.5),
            option("Formal Reporting", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::PaymentMethod,
        options: &[
            option("Time & Materials", 0.0),
            option("Capped Time & Materials", 0.5),
            option("Fixed Price", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::Design,
        options: &[
            option("Emergent", 0.0),
            option("Just Enough Up-front", 0.5),
            option("Big Design Up-front", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::Teams,
        options: &[
            option("Cross-functional", 0.0),
            option("Component Teams", 0.5),
            option("Structured Silo Teams", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::Development,
        options: &[
            option("Sequential", 0.0),
            option("Iterative", 0.5),
            option("Continuous", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::IntegrationTesting,
        options: &[
            option("End of Project", 0.0),
            option("Per Release", 0.5),
            option("Continuous", 1.0),
        ],
    },
    FactorDefinition {
        factor: FactorKey::Closing,
        options: &[
            option("Team Acceptance", 0.0),
            option("Customer Acceptance", 0.5),
            option("3rd Party Acceptance", 1.0),
        ],
    },
];

/// Fixed prior and per-factor sensitivities for one methodology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MethodProfile {
    pub methodology: Methodology,
    pub bias: f64,
    /// Indexed in `FactorKey::ALL` order.
    pub sensitivities: [f64; 12],
}

impl MethodProfile {
    pub(crate) fn sensitivity(&self, factor: FactorKey) -> f64 {
        FactorKey::ALL
            .iter()
            .position(|candidate| *candidate == factor)
            .map(|index| self.sensitivities[index])
            .unwrap_or(0.0)
    }
}

//                                size  plan  src   goal  cust  comm  pay   dsgn  team  dev   test  close
pub(crate) const METHOD_PROFILES: [MethodProfile; 8] = [
    MethodProfile {
        methodology: Methodology::Scrum,
        bias: 0.60,
        sensitivities: [-0.30, -0.40, -0.20, -0.20, -0.10, -0.30, -0.30, -0.30, -0.40, 0.10, 0.20, -0.30],
    },
    MethodProfile {
        methodology: Methodology::Kanban,
        bias: 0.50,
        sensitivities: [-0.20, -0.30, -0.10, -0.10, -0.10, -0.20, -0.20, -0.20, -0.20, 0.15, 0.15, -0.20],
    },
    MethodProfile {
        methodology: Methodology::Waterfall,
        bias: 0.30,
        sensitivities: [0.20, 0.50, 0.30, 0.40, 0.20, 0.40, 0.50, 0.50, 0.30, -0.40, -0.40, 0.40],
    },
    MethodProfile {
        methodology: Methodology::Prince2,
        bias: 0.25,
        sensitivities: [0.40, 0.50, 0.40, 0.40, 0.40, 0.50, 0.40, 0.30, 0.30, -0.30, -0.20, 0.50],
    },
    MethodProfile {
        methodology: Methodology::Safe,
        bias: 0.15,
        sensitivities: [0.60, 0.20, 0.20, 0.10, 0.50, 0.10, 0.10, 0.20, 0.40, 0.20, 0.10, 0.10],
    },
    MethodProfile {
        methodology: Methodology::Hybrid,
        bias: 0.35,
        sensitivities: [0.30, 0.20, 0.30, 0.20, 0.20, 0.10, 0.20, 0.20, 0.20, 0.00, 0.10, 0.20],
    },
    MethodProfile {
        methodology: Methodology::DisciplinedAgile,
        bias: 0.25,
        sensitivities: [0.30, 0.10, 0.10, 0.10, 0.20, -0.10, 0.00, 0.20, 0.10, 0.20, 0.10, 0.10],
    },
    MethodProfile {
        methodology: Methodology::ContinuousDelivery,
        bias: 0.20,
        sensitivities: [-0.10, -0.50, -0.10, -0.30, 0.00, -0.20, -0.20, -0.30, -0.30, 0.60, 0.30, -0.30],
    },
];

/// Question catalog presented upstream; every option maps onto {0, 0.5, 1}.
pub fn factor_catalog() -> &'static [FactorDefinition] {
    &FACTOR_OPTIONS
}

pub(crate) fn profile(methodology: Methodology) -> Option<&'static MethodProfile> {
    METHOD_PROFILES
        .iter()
        .find(|profile| profile.methodology == methodology)
}

/// Prior added to every score of the given methodology.
pub fn bias(methodology: Methodology) -> f64 {
    profile(methodology).map(|entry| entry.bias).unwrap_or(0.0)
}

/// Directional responsiveness of `methodology` to `factor`.
pub fn sensitivity(methodology: Methodology, factor: FactorKey) -> f64 {
    profile(methodology)
        .map(|entry| entry.sensitivity(factor))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_factor_has_an_option_table_in_declaration_order() {
        let factors: Vec<_> = FACTOR_OPTIONS.iter().map(|entry| entry.factor).collect();
        assert_eq!(factors, FactorKey::ALL.to_vec());
    }

    #[test]
    fn option_values_are_ordinal() {
        for definition in &FACTOR_OPTIONS {
            for option in definition.options {
                assert!(
                    [0.0, 0.5, 1.0].contains(&option.value),
                    "{} option {} has value {}",
                    definition.factor,
                    option.label,
                    option.value
                );
            }
        }
    }

    #[test]
    fn sensitivities_stay_within_unit_range() {
        for profile in &METHOD_PROFILES {
            assert!(profile
                .sensitivities
                .iter()
                .all(|value| (-1.0..=1.0).contains(value)));
        }
    }

    #[test]
    fn profiles_cover_every_methodology_in_order() {
        let order: Vec<_> = METHOD_PROFILES.iter().map(|entry| entry.methodology).collect();
        assert_eq!(order, Methodology::ALL.to_vec());
        assert_eq!(sensitivity(Methodology::Safe, FactorKey::Teams), 0.40);
        assert_eq!(bias(Methodology::Scrum), 0.60);
    }
}
