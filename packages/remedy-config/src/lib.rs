mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, ContextScoring, FeasibilityScoring, KeywordBoost, Normalizer, Ranking, Scoring,
	ScoringWeights, Service, UrgencyShift,
};

use std::{fs, path::Path};

const WEIGHT_SUM_TOLERANCE: f32 = 1e-3;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	check_unit_range("scoring.neutral_default", cfg.scoring.neutral_default)?;

	let weights = &cfg.scoring.weights;

	for (label, value) in [
		("scoring.weights.text", weights.text),
		("scoring.weights.context", weights.context),
		("scoring.weights.feasibility", weights.feasibility),
	] {
		check_unit_range(label, value)?;
	}

	if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
		return Err(Error::Validation { message: "scoring.weights must sum to 1.0.".to_string() });
	}

	let boost = &cfg.scoring.keyword_boost;

	check_unit_range("scoring.keyword_boost.per_category", boost.per_category)?;
	check_unit_range("scoring.keyword_boost.max_total", boost.max_total)?;

	if boost.per_category > boost.max_total {
		return Err(Error::Validation {
			message: "scoring.keyword_boost.per_category must not exceed scoring.keyword_boost.max_total."
				.to_string(),
		});
	}

	let urgency = &cfg.scoring.urgency;

	check_unit_range("scoring.urgency.high_shift", urgency.high_shift)?;
	check_unit_range("scoring.urgency.critical_shift", urgency.critical_shift)?;

	if urgency.high_shift > urgency.critical_shift {
		return Err(Error::Validation {
			message: "scoring.urgency.high_shift must not exceed scoring.urgency.critical_shift."
				.to_string(),
		});
	}

	check_unit_range("scoring.context.mismatch_credit", cfg.scoring.context.mismatch_credit)?;

	let decay = cfg.scoring.feasibility.timeline_decay_days;

	if !decay.is_finite() || decay <= 0.0 {
		return Err(Error::Validation {
			message: "scoring.feasibility.timeline_decay_days must be a finite number greater than zero."
				.to_string(),
		});
	}

	check_unit_range("ranking.confidence_threshold", cfg.ranking.confidence_threshold)?;

	if cfg.ranking.max_results == 0 {
		return Err(Error::Validation {
			message: "ranking.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.normalizer.min_token_len == 0 {
		return Err(Error::Validation {
			message: "normalizer.min_token_len must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn check_unit_range(label: &str, value: f32) -> Result<()> {
	if !value.is_finite() {
		return Err(Error::Validation { message: format!("{label} must be a finite number.") });
	}
	if !(0.0..=1.0).contains(&value) {
		return Err(Error::Validation {
			message: format!("{label} must be in the range 0.0-1.0."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	let mut stop_words: Vec<String> = cfg
		.normalizer
		.extra_stop_words
		.iter()
		.map(|word| word.trim().to_lowercase())
		.filter(|word| !word.is_empty())
		.collect();

	stop_words.sort();
	stop_words.dedup();

	cfg.normalizer.extra_stop_words = stop_words;
}
