use std::sync::Arc;

use crate::recommendation::domain::{Answers, MethodScore, ScoringResult};
use crate::recommendation::fuzzy::MethodCatalog;
use crate::recommendation::{EngineKind, RecommendationService};

pub(super) fn answers(pairs: &[(&str, &str)]) -> Answers {
    pairs
        .iter()
        .map(|(factor, value)| (factor.to_string(), value.to_string()))
        .collect()
}

/// Small agile team with continuous integration and team-level acceptance.
pub(super) fn agile_team_answers() -> Answers {
    answers(&[
        ("project_size", "Small"),
        ("planning", "Iterative"),
        ("sourcing", "Internal Sourcing"),
        ("goals", "Speed"),
        ("customer_size", "Small"),
        ("customer_communication", "Continuous Feedback Loops"),
        ("payment_method", "Time & Materials"),
        ("design", "Emergent"),
        ("teams", "Cross-functional"),
        ("development", "Iterative"),
        ("integration_testing", "Continuous"),
        ("closing", "Team Acceptance"),
    ])
}

/// The agile team answers with up-front planning and third-party sign-off.
pub(super) fn governed_team_answers() -> Answers {
    let mut answers = agile_team_answers();
    answers.insert("planning".to_string(), "Up-front".to_string());
    answers.insert("closing".to_string(), "3rd Party Acceptance".to_string());
    answers
}

/// Answers mirroring the bundled Waterfall attribute row.
pub(super) fn waterfall_answers() -> Answers {
    answers(&[
        ("project_size", "Large"),
        ("planning", "Up-front"),
        ("sourcing", "External Sourcing"),
        ("goals", "Predictability"),
        ("customer_size", "Large"),
        ("customer_communication", "Formal Reporting"),
        ("payment_method", "Fixed Price"),
        ("design", "Big Design Up-front"),
        ("teams", "Structured Silo Teams"),
        ("development", "Sequential"),
        ("integration_testing", "End of Project"),
        ("closing", "3rd Party Acceptance"),
    ])
}

pub(super) fn bundled_catalog() -> Arc<MethodCatalog> {
    Arc::new(MethodCatalog::bundled().expect("bundled catalog parses"))
}

pub(super) fn service(default_engine: EngineKind) -> Arc<RecommendationService> {
    Arc::new(RecommendationService::new(bundled_catalog(), default_engine))
}

pub(super) fn score_of<'a>(result: &'a ScoringResult, method: &str) -> &'a MethodScore {
    result
        .method(method)
        .unwrap_or_else(|| panic!("{method} missing from ranking"))
}

pub(super) fn assert_ranked_descending(result: &ScoringResult) {
    for pair in result.ranking.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "{} ({}) ranked above {} ({})",
            pair[0].method,
            pair[0].score,
            pair[1].method,
            pair[1].score
        );
    }
}
