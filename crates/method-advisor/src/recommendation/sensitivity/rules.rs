use super::super::domain::{round4, FactorKey, MethodDelta, Methodology, RuleApplication};
use super::normalizer::OrdinalInputs;
use std::collections::{BTreeMap, BTreeSet};

/// Hard exclusion rule evaluated before any scoring.
pub(crate) struct Gate {
    pub name: &'static str,
    pub reason: &'static str,
    pub excludes: &'static [Methodology],
    pub predicate: fn(&OrdinalInputs) -> bool,
}

/// Soft additive adjustment triggered by a combination of inputs.
pub(crate) struct Nudge {
    pub name: &'static str,
    pub deltas: &'static [(Methodology, f64)],
    pub predicate: fn(&OrdinalInputs) -> bool,
}

pub(crate) struct GateOutcome {
    pub fired: bool,
    pub excluded: &'static [Methodology],
    pub reason: &'static str,
}

impl Gate {
    pub(crate) fn evaluate(&self, inputs: &OrdinalInputs) -> GateOutcome {
        let fired = (self.predicate)(inputs);
        GateOutcome {
            fired,
            excluded: if fired { self.excludes } else { &[] },
            reason: self.reason,
        }
    }
}

impl Nudge {
    pub(crate) fn evaluate(&self, inputs: &OrdinalInputs) -> BTreeMap<Methodology, f64> {
        if (self.predicate)(inputs) {
            self.deltas.iter().copied().collect()
        } else {
            BTreeMap::new()
        }
    }
}

fn heavy_planning_heavy_closing(inputs: &OrdinalInputs) -> bool {
    inputs.at_least(FactorKey::Planning, 0.75) && inputs.at_least(FactorKey::Closing, 0.75)
}

fn continuous_delivery_signal(inputs: &OrdinalInputs) -> bool {
    inputs.at_most(FactorKey::Planning, 0.25)
        && inputs.at_least(FactorKey::IntegrationTesting, 0.8)
        && inputs.at_least(FactorKey::Development, 0.8)
}

fn large_structured_teams(inputs: &OrdinalInputs) -> bool {
    inputs.at_least(FactorKey::ProjectSize, 0.75) && inputs.at_least(FactorKey::Teams, 0.75)
}

fn continuous_delivery_pattern(inputs: &OrdinalInputs) -> bool {
    inputs.at_least(FactorKey::IntegrationTesting, 0.8)
        && inputs.at_least(FactorKey::Development, 0.8)
        && inputs.at_most(FactorKey::Planning, 0.5)
}

fn mixed_disciplined_agile(inputs: &OrdinalInputs) -> bool {
    let structured = [
        inputs.at_least(FactorKey::Planning, 0.65),
        inputs.at_least(FactorKey::Closing, 0.65),
        inputs.at_least(FactorKey::Design, 0.65),
    ];
    let adaptive = [
        inputs.at_least(FactorKey::Development, 0.65),
        inputs.at_least(FactorKey::IntegrationTesting, 0.65),
        inputs.at_most(FactorKey::CustomerCommunication, 0.4),
    ];
    structured.iter().filter(|hit| **hit).count() >= 1
        && adaptive.iter().filter(|hit| **hit).count() >= 1
}

pub(crate) const GATES: [Gate; 2] = [
    Gate {
        name: "HeavyPlanningHeavyClosing",
        reason: "up-front planning with formal third-party closing conflicts with sprint-level acceptance",
        excludes: &[Methodology::Scrum],
        predicate: heavy_planning_heavy_closing,
    },
    Gate {
        name: "ContinuousDeliverySignal",
        reason: "continuous integration and delivery with minimal planning rules out phase-gated delivery",
        excludes: &[Methodology::Waterfall, Methodology::Prince2],
        predicate: continuous_delivery_signal,
    },
];

// GovernanceHeavy shares its trigger with the HeavyPlanningHeavyClosing gate.
pub(crate) const NUDGES: [Nudge; 4] = [
    Nudge {
        name: "LargeStructuredTeams",
        deltas: &[
            (Methodology::Safe, 0.15),
            (Methodology::Hybrid, 0.10),
            (Methodology::Prince2, 0.08),
        ],
        predicate: large_structured_teams,
    },
    Nudge {
        name: "GovernanceHeavy",
        deltas: &[(Methodology::Prince2, 0.15), (Methodology::Waterfall, 0.10)],
        predicate: heavy_planning_heavy_closing,
    },
    Nudge {
        name: "ContinuousDeliveryPattern",
        deltas: &[
            (Methodology::ContinuousDelivery, 0.18),
            (Methodology::Scrum, 0.05),
            (Methodology::Safe, 0.03),
        ],
        predicate: continuous_delivery_pattern,
    },
    Nudge {
        name: "MixedDisciplinedAgile",
        deltas: &[
            (Methodology::DisciplinedAgile, 0.12),
            (Methodology::Hybrid, 0.06),
        ],
        predicate: mixed_disciplined_agile,
    },
];

/// Combined effect of every gate and nudge for one set of inputs.
pub(crate) struct RuleEffects {
    pub excluded: BTreeSet<Methodology>,
    pub nudges: BTreeMap<Methodology, f64>,
    pub trace: Vec<RuleApplication>,
}

impl RuleEffects {
    pub(crate) fn nudge_total(&self, methodology: Methodology) -> f64 {
        self.nudges.get(&methodology).copied().unwrap_or(0.0)
    }
}

/// Run all gates, then all nudges, without short-circuiting.
///
/// Deltas aimed at a gated methodology are discarded from both the totals and
/// the trace; a nudge left with no deltas records no trace entry.
pub(crate) fn apply_rules(inputs: &OrdinalInputs) -> RuleEffects {
    let mut excluded = BTreeSet::new();
    let mut trace = Vec::new();

    for gate in &GATES {
        let outcome = gate.evaluate(inputs);
        if !outcome.fired {
            continue;
        }
        excluded.extend(outcome.excluded.iter().copied());
        trace.push(RuleApplication::Gate {
            rule: gate.name.to_string(),
            reason: outcome.reason.to_string(),
            excluded: outcome
                .excluded
                .iter()
                .map(|methodology| methodology.label().to_string())
                .collect(),
        });
    }

    let mut nudges: BTreeMap<Methodology, f64> = BTreeMap::new();
    for nudge in &NUDGES {
        let applied: Vec<(Methodology, f64)> = nudge
            .evaluate(inputs)
            .into_iter()
            .filter(|(methodology, _)| !excluded.contains(methodology))
            .collect();
        if applied.is_empty() {
            continue;
        }

        // Trace keeps the nudge's own declaration order, not the map order.
        let mut deltas = Vec::with_capacity(applied.len());
        for (methodology, delta) in nudge.deltas {
            if applied.iter().any(|(hit, _)| hit == methodology) {
                *nudges.entry(*methodology).or_insert(0.0) += delta;
                deltas.push(MethodDelta {
                    method: methodology.label().to_string(),
                    delta: round4(*delta),
                });
            }
        }

        trace.push(RuleApplication::Nudge {
            rule: nudge.name.to_string(),
            deltas,
        });
    }

    RuleEffects {
        excluded,
        nudges,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heavy_planning_and_closing_excludes_scrum() {
        let inputs =
            OrdinalInputs::from_pairs(&[(FactorKey::Planning, 1.0), (FactorKey::Closing, 1.0)]);

        let effects = apply_rules(&inputs);

        assert!(effects.excluded.contains(&Methodology::Scrum));
        assert!(effects
            .trace
            .iter()
            .any(|entry| entry.rule() == "HeavyPlanningHeavyClosing"));
        assert_eq!(effects.nudge_total(Methodology::Prince2), 0.15);
        assert_eq!(effects.nudge_total(Methodology::Waterfall), 0.10);
    }

    #[test]
    fn continuous_delivery_signal_excludes_phase_gated_methods() {
        let inputs = OrdinalInputs::from_pairs(&[
            (FactorKey::Planning, 0.0),
            (FactorKey::IntegrationTesting, 1.0),
            (FactorKey::Development, 1.0),
        ]);

        let effects = apply_rules(&inputs);

        assert!(effects.excluded.contains(&Methodology::Waterfall));
        assert!(effects.excluded.contains(&Methodology::Prince2));
        assert_eq!(effects.nudge_total(Methodology::ContinuousDelivery), 0.18);
        assert_eq!(effects.nudge_total(Methodology::Scrum), 0.05);
    }

    #[test]
    fn gates_do_not_fire_when_a_factor_is_missing() {
        let inputs = OrdinalInputs::from_pairs(&[(FactorKey::Planning, 1.0)]);

        let effects = apply_rules(&inputs);

        assert!(effects.excluded.is_empty());
        assert!(effects.trace.is_empty());
    }

    #[test]
    fn mixed_disciplined_agile_needs_one_signal_from_each_side() {
        let one_sided = OrdinalInputs::from_pairs(&[
            (FactorKey::Design, 1.0),
            (FactorKey::Closing, 1.0),
            (FactorKey::CustomerCommunication, 1.0),
        ]);
        assert_eq!(apply_rules(&one_sided).nudge_total(Methodology::DisciplinedAgile), 0.0);

        let mixed = OrdinalInputs::from_pairs(&[
            (FactorKey::Design, 1.0),
            (FactorKey::CustomerCommunication, 0.0),
        ]);
        let effects = apply_rules(&mixed);
        assert_eq!(effects.nudge_total(Methodology::DisciplinedAgile), 0.12);
        assert_eq!(effects.nudge_total(Methodology::Hybrid), 0.06);
    }

    #[test]
    fn nudge_deltas_accumulate_per_methodology() {
        let inputs = OrdinalInputs::from_pairs(&[
            (FactorKey::ProjectSize, 1.0),
            (FactorKey::Teams, 1.0),
            (FactorKey::Design, 1.0),
            (FactorKey::CustomerCommunication, 0.0),
        ]);

        let effects = apply_rules(&inputs);

        assert!((effects.nudge_total(Methodology::Hybrid) - 0.16).abs() < 1e-12);
        assert_eq!(effects.trace.len(), 2);
    }

    #[test]
    fn deltas_for_gated_methods_are_dropped() {
        let inputs = OrdinalInputs::from_pairs(&[
            (FactorKey::ProjectSize, 1.0),
            (FactorKey::Teams, 1.0),
            (FactorKey::Planning, 0.0),
            (FactorKey::IntegrationTesting, 1.0),
            (FactorKey::Development, 1.0),
        ]);

        let effects = apply_rules(&inputs);

        assert!(effects.excluded.contains(&Methodology::Prince2));
        assert_eq!(effects.nudge_total(Methodology::Prince2), 0.0);
        assert_eq!(effects.nudge_total(Methodology::Safe), 0.18);
        for entry in &effects.trace {
            if let RuleApplication::Nudge { deltas, .. } = entry {
                assert!(deltas.iter().all(|delta| delta.method != "PRINCE2"));
            }
        }
    }
}
