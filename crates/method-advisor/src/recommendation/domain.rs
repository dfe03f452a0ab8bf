use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw questionnaire answers keyed by factor name.
///
/// Keys and values are free text; nothing is validated at this boundary.
pub type Answers = BTreeMap<String, String>;

/// Factor → numeric input actually used by an engine.
pub type NormalizedInputs = BTreeMap<String, f64>;

/// Round to the four decimal places every numeric output is reported with.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Categorical dimensions understood by the sensitivity engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKey {
    ProjectSize,
    Planning,
    Sourcing,
    Goals,
    CustomerSize,
    CustomerCommunication,
    PaymentMethod,
    Design,
    Teams,
    Development,
    IntegrationTesting,
    Closing,
}

impl FactorKey {
    pub const ALL: [FactorKey; 12] = [
        FactorKey::ProjectSize,
        FactorKey::Planning,
        FactorKey::Sourcing,
        FactorKey::Goals,
        FactorKey::CustomerSize,
        FactorKey::CustomerCommunication,
        FactorKey::PaymentMethod,
        FactorKey::Design,
        FactorKey::Teams,
        FactorKey::Development,
        FactorKey::IntegrationTesting,
        FactorKey::Closing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKey::ProjectSize => "project_size",
            FactorKey::Planning => "planning",
            FactorKey::Sourcing => "sourcing",
            FactorKey::Goals => "goals",
            FactorKey::CustomerSize => "customer_size",
            FactorKey::CustomerCommunication => "customer_communication",
            FactorKey::PaymentMethod => "payment_method",
            FactorKey::Design => "design",
            FactorKey::Teams => "teams",
            FactorKey::Development => "development",
            FactorKey::IntegrationTesting => "integration_testing",
            FactorKey::Closing => "closing",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim();
        Self::ALL
            .into_iter()
            .find(|factor| factor.as_str().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed set of methodologies ranked by the sensitivity engine, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Methodology {
    Scrum,
    Kanban,
    Waterfall,
    Prince2,
    Safe,
    Hybrid,
    DisciplinedAgile,
    ContinuousDelivery,
}

const METHODOLOGY_ALIASES: &[(&str, Methodology)] = &[
    ("scrum", Methodology::Scrum),
    ("kanban", Methodology::Kanban),
    ("lean kanban", Methodology::Kanban),
    ("waterfall", Methodology::Waterfall),
    ("traditional waterfall", Methodology::Waterfall),
    ("prince2", Methodology::Prince2),
    ("prince 2", Methodology::Prince2),
    ("safe", Methodology::Safe),
    ("scaled agile framework", Methodology::Safe),
    ("hybrid", Methodology::Hybrid),
    ("hybrid agile", Methodology::Hybrid),
    ("disciplined agile", Methodology::DisciplinedAgile),
    ("disciplinedagile", Methodology::DisciplinedAgile),
    ("disciplined agile delivery", Methodology::DisciplinedAgile),
    ("dad", Methodology::DisciplinedAgile),
    ("continuous delivery", Methodology::ContinuousDelivery),
    ("continuousdelivery", Methodology::ContinuousDelivery),
    ("lean continuous delivery", Methodology::ContinuousDelivery),
    ("lean / continuous delivery", Methodology::ContinuousDelivery),
    ("cd", Methodology::ContinuousDelivery),
];

impl Methodology {
    pub const ALL: [Methodology; 8] = [
        Methodology::Scrum,
        Methodology::Kanban,
        Methodology::Waterfall,
        Methodology::Prince2,
        Methodology::Safe,
        Methodology::Hybrid,
        Methodology::DisciplinedAgile,
        Methodology::ContinuousDelivery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Methodology::Scrum => "Scrum",
            Methodology::Kanban => "Kanban",
            Methodology::Waterfall => "Waterfall",
            Methodology::Prince2 => "PRINCE2",
            Methodology::Safe => "SAFe",
            Methodology::Hybrid => "Hybrid",
            Methodology::DisciplinedAgile => "Disciplined Agile",
            Methodology::ContinuousDelivery => "Continuous Delivery",
        }
    }

    /// Resolve a display name or known variant through the alias table.
    pub fn from_alias(raw: &str) -> Option<Self> {
        let folded = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let folded = folded.to_lowercase();
        METHODOLOGY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == folded)
            .map(|(_, methodology)| *methodology)
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical display name for a methodology loaded from external data.
///
/// Known variants collapse onto the fixed labels; anything else is kept as
/// trimmed text.
pub fn canonical_method_name(raw: &str) -> String {
    match Methodology::from_alias(raw) {
        Some(methodology) => methodology.label().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Sensitivity-model audit record for one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityContribution {
    pub factor: FactorKey,
    pub normalized_value: f64,
    pub sensitivity: f64,
    pub delta: f64,
}

/// Fuzzy-model audit record for one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyContribution {
    pub factor: String,
    pub user_value: String,
    pub method_value: Option<String>,
    pub weight: f64,
    #[serde(rename = "match")]
    pub match_score: f64,
    pub delta: f64,
}

/// Discrete contribution to a methodology score, kept even when the delta is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Contribution {
    Sensitivity(SensitivityContribution),
    Fuzzy(FuzzyContribution),
}

impl Contribution {
    pub fn factor(&self) -> &str {
        match self {
            Contribution::Sensitivity(entry) => entry.factor.as_str(),
            Contribution::Fuzzy(entry) => &entry.factor,
        }
    }

    pub fn delta(&self) -> f64 {
        match self {
            Contribution::Sensitivity(entry) => entry.delta,
            Contribution::Fuzzy(entry) => entry.delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodScore {
    pub method: String,
    pub score: f64,
    pub contributions: Vec<Contribution>,
}

/// Score adjustment a nudge applied to one methodology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDelta {
    pub method: String,
    pub delta: f64,
}

/// Trace entry for a rule that fired during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleApplication {
    Gate {
        rule: String,
        reason: String,
        excluded: Vec<String>,
    },
    Nudge {
        rule: String,
        deltas: Vec<MethodDelta>,
    },
}

impl RuleApplication {
    pub fn rule(&self) -> &str {
        match self {
            RuleApplication::Gate { rule, .. } | RuleApplication::Nudge { rule, .. } => rule,
        }
    }
}

/// Ranked output shared by every scoring strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub inputs_normalized: NormalizedInputs,
    pub ranking: Vec<MethodScore>,
    pub rules_applied: Vec<RuleApplication>,
    pub engine_version: String,
}

impl ScoringResult {
    pub fn top(&self) -> Option<&MethodScore> {
        self.ranking.first()
    }

    pub fn method(&self, name: &str) -> Option<&MethodScore> {
        self.ranking.iter().find(|entry| entry.method == name)
    }
}

/// Sort descending by score. The sort is stable so equal scores keep input order.
pub(crate) fn rank(scores: &mut [MethodScore]) {
    scores.sort_by(|left, right| right.score.total_cmp(&left.score));
}
