use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use remedy_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.expect("Sample config must include the requested section.");
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("remedy_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> remedy_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = remedy_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation_message(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error kind: {err:?}");
	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn loads_sample_config() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.ranking.max_results, 5);
	assert!((cfg.scoring.weights.sum() - 1.0).abs() < 1e-6);
	assert_eq!(cfg.normalizer.extra_stop_words, vec!["please".to_string(), "really".to_string()]);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
	let cfg = load_payload("[ranking]\nmax_results = 3\n".to_string())
		.expect("Partial config must load.");

	assert_eq!(cfg.ranking.max_results, 3);
	assert!((cfg.ranking.confidence_threshold - 0.1).abs() < f32::EPSILON);
	assert!((cfg.scoring.neutral_default - 0.5).abs() < f32::EPSILON);
	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn weights_must_sum_to_one() {
	let payload = sample_with(&["scoring", "weights"], "text", Value::Float(0.7));

	expect_validation_message(payload, "scoring.weights must sum to 1.0.");
}

#[test]
fn neutral_default_must_be_in_unit_range() {
	let payload = sample_with(&["scoring"], "neutral_default", Value::Float(1.5));

	expect_validation_message(payload, "scoring.neutral_default must be in the range 0.0-1.0.");
}

#[test]
fn keyword_boost_per_category_cannot_exceed_cap() {
	let payload = sample_with(&["scoring", "keyword_boost"], "per_category", Value::Float(0.2));

	expect_validation_message(
		payload,
		"scoring.keyword_boost.per_category must not exceed scoring.keyword_boost.max_total.",
	);
}

#[test]
fn urgency_high_shift_cannot_exceed_critical_shift() {
	let payload = sample_with(&["scoring", "urgency"], "high_shift", Value::Float(0.5));

	expect_validation_message(
		payload,
		"scoring.urgency.high_shift must not exceed scoring.urgency.critical_shift.",
	);
}

#[test]
fn timeline_decay_must_be_positive() {
	let payload =
		sample_with(&["scoring", "feasibility"], "timeline_decay_days", Value::Float(0.0));

	expect_validation_message(payload, "scoring.feasibility.timeline_decay_days must be a finite");
}

#[test]
fn max_results_must_be_positive() {
	let payload = sample_with(&["ranking"], "max_results", Value::Integer(0));

	expect_validation_message(payload, "ranking.max_results must be greater than zero.");
}

#[test]
fn empty_log_level_is_rejected() {
	let payload = sample_with(&["service"], "log_level", Value::String("   ".to_string()));

	expect_validation_message(payload, "service.log_level must be non-empty.");
}

#[test]
fn unreadable_path_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("remedy_config_test_missing_file.toml");

	let err = remedy_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err =
		load_payload("[ranking\nmax_results = ".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}
