use crate::cli::ScoreArgs;
use crate::infra::load_catalog;
use method_advisor::config::AppConfig;
use method_advisor::error::AppError;
use method_advisor::recommendation::router::collect_answers;
use method_advisor::recommendation::{Answers, RecommendationService, ScoringResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let result = score(args, &config)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn read_answers(args: &ScoreArgs) -> Result<Answers, AppError> {
    let mut answers = match &args.answers {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let body: BTreeMap<String, Value> = serde_json::from_str(&raw)?;
            collect_answers(body)
        }
        None => Answers::new(),
    };

    for (factor, value) in &args.answer {
        answers.insert(factor.clone(), value.clone());
    }
    Ok(answers)
}

fn score(args: ScoreArgs, config: &AppConfig) -> Result<ScoringResult, AppError> {
    let answers = read_answers(&args)?;
    let catalog_path = args
        .catalog
        .as_deref()
        .or(config.scoring.method_catalog.as_deref());
    let catalog = load_catalog(catalog_path)?;
    let service = RecommendationService::new(Arc::new(catalog), config.scoring.default_engine);

    Ok(service.recommend(args.engine, &answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use method_advisor::config::{
        AppEnvironment, ScoringConfig, ServerConfig, TelemetryConfig,
    };
    use method_advisor::recommendation::EngineKind;

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            scoring: ScoringConfig {
                default_engine: EngineKind::SensitivityGateNudge,
                method_catalog: None,
            },
        }
    }

    #[test]
    fn command_line_answers_are_scored_with_default_engine() {
        let args = ScoreArgs {
            answer: vec![
                ("planning".to_string(), "Up-front".to_string()),
                ("closing".to_string(), "3rd Party Acceptance".to_string()),
            ],
            ..ScoreArgs::default()
        };

        let result = score(args, &config()).expect("scores");

        assert_eq!(result.engine_version, "3.0.0");
        assert!(result.method("Scrum").is_none());
    }

    #[test]
    fn engine_flag_overrides_configuration() {
        let args = ScoreArgs {
            engine: Some(EngineKind::EntropyWeightedFuzzy),
            answer: vec![("project_size".to_string(), "small".to_string())],
            ..ScoreArgs::default()
        };

        let result = score(args, &config()).expect("scores");

        assert_eq!(result.engine_version, "4.3.0-entropy-weighted-fuzzy");
        assert!(result.rules_applied.is_empty());
    }
}
