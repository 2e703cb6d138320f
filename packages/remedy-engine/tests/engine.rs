use std::sync::Arc;

use serde_json::{Value, json};

use remedy_config::Config;
use remedy_domain::{
	ComplexityLevel, Corpus, CostLevel, Industry, PainPointQuery, Preferences, QueryContext,
	QueryInput, SolutionRecord, Timeline, UrgencyLevel,
};
use remedy_engine::{Error, MatchReport, MatchingEngine};

const FIXTURE: &str = include_str!("fixtures/knowledge_base.json");

fn record(id: &str, overrides: Value) -> SolutionRecord {
	let mut base = json!({
		"feature_id": id,
		"feature_name": format!("{id} feature"),
		"category": "Voice of Customer",
		"description": {
			"short": "Collect customer feedback through surveys.",
			"detailed": "Email and web surveys with reminders."
		},
		"pain_points_addressed": [],
		"implementation": { "complexity": "low", "setup_time": "1-2 weeks", "estimated_cost": "low" }
	});

	if let (Some(base), Some(overrides)) = (base.as_object_mut(), overrides.as_object()) {
		for (key, value) in overrides {
			base.insert(key.clone(), value.clone());
		}
	}

	serde_json::from_value(base).expect("Record fixture must deserialize.")
}

fn voc_surveys() -> SolutionRecord {
	record(
		"voc_surveys",
		json!({
			"pain_points_addressed": [
				{ "pain_category": "low_feedback_response", "keywords": ["survey", "response rate"] }
			],
			"industry_fit": ["e_commerce"]
		}),
	)
}

fn permissive_config() -> Config {
	let mut cfg = Config::default();

	cfg.ranking.confidence_threshold = 0.0;
	cfg.ranking.max_results = 50;

	cfg
}

fn engine(cfg: Config, records: Vec<SolutionRecord>) -> MatchingEngine {
	let corpus = Corpus::from_records(records).expect("Corpus fixture must validate.");

	MatchingEngine::new(cfg, Arc::new(corpus)).expect("Engine must build.")
}

fn fixture_engine(cfg: Config) -> MatchingEngine {
	let corpus = Corpus::from_json_str(FIXTURE).expect("Fixture must validate.");

	MatchingEngine::new(cfg, Arc::new(corpus)).expect("Engine must build.")
}

fn with_industry(description: &str, industry: Industry) -> PainPointQuery {
	PainPointQuery::new(description)
		.with_context(QueryContext { industry: Some(industry), ..QueryContext::default() })
}

fn result<'a>(report: &'a MatchReport, id: &str) -> &'a remedy_engine::RankedResult {
	report
		.results
		.iter()
		.find(|result| result.solution_id == id)
		.unwrap_or_else(|| panic!("Expected {id} in results."))
}

#[test]
fn keyword_and_industry_match_surface_the_survey_solution() {
	let engine = engine(Config::default(), vec![voc_surveys()]);
	let report = engine
		.analyze(&with_industry("survey response rate is very low", Industry::ECommerce))
		.unwrap();
	let breakdown = &result(&report, "voc_surveys").score_breakdown;

	assert!(breakdown.text_similarity > 0.0);
	assert_eq!(breakdown.context_relevance, 1.0);
	assert_eq!(breakdown.matched_keywords, vec!["survey".to_string(), "response rate".to_string()]);
	assert_eq!(breakdown.matched_categories, vec!["low_feedback_response".to_string()]);
}

#[test]
fn industry_mismatch_lowers_confidence() {
	let engine = engine(Config::default(), vec![voc_surveys()]);
	let matching = engine
		.analyze(&with_industry("survey response rate is very low", Industry::ECommerce))
		.unwrap();
	let mismatched = engine
		.analyze(&with_industry("survey response rate is very low", Industry::Banking))
		.unwrap();
	let matching = result(&matching, "voc_surveys");
	let mismatched = result(&mismatched, "voc_surveys");

	assert_eq!(mismatched.score_breakdown.context_relevance, 0.0);
	assert!(mismatched.confidence < matching.confidence);
}

#[test]
fn malformed_candidate_is_excluded_without_failing_the_query() {
	let broken = record(
		"broken",
		json!({ "implementation": { "complexity": "extreme", "setup_time": "1 week" } }),
	);
	let engine = engine(permissive_config(), vec![voc_surveys(), broken]);
	let report = engine.analyze(&PainPointQuery::new("survey response rate is very low")).unwrap();

	assert_eq!(report.total_candidates_considered, 1);
	assert_eq!(report.results.len(), 1);
	assert_eq!(report.results[0].solution_id, "voc_surveys");
	assert_eq!(report.excluded.len(), 1);
	assert_eq!(report.excluded[0].solution_id, "broken");
	assert!(report.excluded[0].reason.contains("implementation.complexity"));
}

#[test]
fn unparseable_setup_time_is_excluded() {
	let broken = record(
		"vague",
		json!({ "implementation": { "complexity": "low", "setup_time": "it depends" } }),
	);
	let engine = engine(permissive_config(), vec![broken, voc_surveys()]);
	let report = engine.analyze(&PainPointQuery::new("survey feedback is poor")).unwrap();

	assert_eq!(report.excluded[0].solution_id, "vague");
	assert!(report.excluded[0].reason.contains("implementation.setup_time"));
}

#[test]
fn absent_context_and_preferences_score_neutral_for_every_candidate() {
	let engine = fixture_engine(permissive_config());
	let report = engine.analyze(&PainPointQuery::new("customers churn after checkout")).unwrap();

	assert_eq!(report.results.len(), 3);

	for result in &report.results {
		assert_eq!(result.score_breakdown.context_relevance, 0.5, "{}", result.solution_id);
		assert_eq!(result.score_breakdown.feasibility, 0.5, "{}", result.solution_id);
	}
}

#[test]
fn identical_queries_produce_identical_reports() {
	let engine = fixture_engine(permissive_config());
	let query = PainPointQuery::new("support tickets wait too long in the backlog")
		.with_affected_areas(["customer_service"]);
	let first = serde_json::to_string(&engine.analyze(&query).unwrap()).unwrap();
	let second = serde_json::to_string(&engine.analyze(&query).unwrap()).unwrap();

	assert_eq!(first, second);
}

#[test]
fn equal_confidence_keeps_load_order() {
	let same_name = json!({ "feature_name": "Survey tool" });
	let engine = engine(
		permissive_config(),
		vec![
			record("first", same_name.clone()),
			record("second", same_name.clone()),
			record("third", same_name),
		],
	);
	let report = engine.analyze(&PainPointQuery::new("customer feedback surveys")).unwrap();
	let ids: Vec<&str> = report.results.iter().map(|result| result.solution_id.as_str()).collect();

	assert_eq!(ids, ["first", "second", "third"]);
	assert_eq!(report.results.iter().map(|result| result.rank).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn results_respect_threshold_order_and_limit() {
	let mut cfg = Config::default();

	cfg.ranking.confidence_threshold = 0.3;
	cfg.ranking.max_results = 2;

	let engine = fixture_engine(cfg);
	let report = engine
		.analyze(&with_industry("survey response rate is low and tickets pile up", Industry::Saas))
		.unwrap();

	assert!(report.results.len() <= 2);
	assert_eq!(report.confidence_threshold_applied, 0.3);

	for pair in report.results.windows(2) {
		assert!(pair[0].confidence >= pair[1].confidence);
	}
	for result in &report.results {
		assert!(result.confidence >= 0.3);
		assert!((0.0..=1.0).contains(&result.confidence));
	}
}

#[test]
fn empty_descriptions_are_rejected() {
	let engine = fixture_engine(Config::default());

	for description in ["", "   \n\t", "the and of it", "?!"] {
		let err = engine.analyze(&PainPointQuery::new(description)).unwrap_err();

		assert!(matches!(err, Error::EmptyQuery), "{description:?} gave {err:?}");
	}
}

#[test]
fn unmatched_keyword_category_raises_text_similarity() {
	let query = PainPointQuery::new("survey response rate is very low");
	let before = engine(permissive_config(), vec![record("s", json!({}))]);
	let after = engine(
		permissive_config(),
		vec![record(
			"s",
			json!({ "pain_points_addressed": [{ "pain_category": "feedback", "keywords": ["Response Rate"] }] }),
		)],
	);
	let before = before.analyze(&query).unwrap().results[0].score_breakdown.text_similarity;
	let after = after.analyze(&query).unwrap().results[0].score_breakdown.text_similarity;

	assert!(after > before, "before={before} after={after}");
}

#[test]
fn urgency_shifts_weights_toward_relevance() {
	let engine = fixture_engine(permissive_config());
	let calm = engine.analyze(&PainPointQuery::new("customers churn")).unwrap();
	let urgent = engine
		.analyze(&PainPointQuery::new("customers churn").with_context(QueryContext {
			urgency_level: Some(UrgencyLevel::Critical),
			..QueryContext::default()
		}))
		.unwrap();

	assert!(urgent.weights_applied.text > calm.weights_applied.text);
	assert!(urgent.weights_applied.context > calm.weights_applied.context);
	assert!(urgent.weights_applied.feasibility < calm.weights_applied.feasibility);
}

#[test]
fn matching_preferences_beat_distant_ones() {
	let engine = fixture_engine(permissive_config());
	let quick_and_cheap = Preferences {
		timeline: Some(Timeline::WithinOneMonth),
		budget_range: Some(CostLevel::Low),
		technical_complexity: Some(ComplexityLevel::Low),
	};
	let report = engine
		.analyze(&PainPointQuery::new("customer feedback").with_preferences(quick_and_cheap))
		.unwrap();
	let surveys = result(&report, "voc_surveys").score_breakdown.feasibility;
	let journeys = result(&report, "journey_analytics").score_breakdown.feasibility;

	assert_eq!(surveys, 1.0);
	assert!(journeys < surveys);
}

#[test]
fn related_solutions_in_the_same_report_are_linked() {
	let engine = fixture_engine(permissive_config());
	let report =
		engine.analyze(&PainPointQuery::new("survey feedback and support tickets")).unwrap();

	assert_eq!(result(&report, "voc_surveys").related_in_results, vec!["ticket_inbox".to_string()]);
	assert_eq!(result(&report, "ticket_inbox").related_in_results, vec!["voc_surveys".to_string()]);
	assert!(result(&report, "journey_analytics").related_in_results.is_empty());
}

#[test]
fn wire_query_parses_and_analyzes() {
	let input: QueryInput = serde_json::from_value(json!({
		"description": "Survey response rate is very low",
		"affected_areas": ["marketing"],
		"context": { "industry": "e_commerce", "urgency_level": "high" },
		"preferences": { "budget_range": "low" }
	}))
	.unwrap();
	let query = PainPointQuery::parse(input).unwrap();
	let report = fixture_engine(Config::default()).analyze(&query).unwrap();

	assert_eq!(report.results[0].solution_id, "voc_surveys");
	assert_eq!(report.results[0].score_breakdown.matched_areas, vec!["marketing".to_string()]);
}
