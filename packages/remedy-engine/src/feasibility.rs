//! Implementation feasibility against the caller's preferences.

use std::sync::LazyLock;

use regex::Regex;

use remedy_config::Scoring;
use remedy_domain::{ComplexityLevel, CostLevel, Implementation, Preferences, Timeline};

use crate::{
	Error, Result,
	scoring::{CandidateView, QueryView, ScoreOutcome, Scorer},
};

static SETUP_TIME: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:(?:-|–|—|to)\s*(\d+(?:\.\d+)?)\s*)?(day|week|month|year)s?\s*$",
	)
});

/// Setup time as an inclusive range of days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayRange {
	pub min: f32,
	pub max: f32,
}

/// Typed view of a solution's implementation block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImplementationProfile {
	pub complexity: ComplexityLevel,
	pub setup_time: DayRange,
	pub estimated_cost: Option<CostLevel>,
}
impl ImplementationProfile {
	pub fn parse(implementation: &Implementation) -> std::result::Result<Self, String> {
		let complexity = implementation.complexity.parse::<ComplexityLevel>().map_err(|err| {
			format!(
				"implementation.complexity {:?} is not one of {}",
				err.value,
				err.allowed.join(", ")
			)
		})?;
		let estimated_cost = implementation
			.estimated_cost
			.as_deref()
			.map(|raw| {
				raw.parse::<CostLevel>().map_err(|err| {
					format!(
						"implementation.estimated_cost {:?} is not one of {}",
						err.value,
						err.allowed.join(", ")
					)
				})
			})
			.transpose()?;
		let setup_time = parse_setup_time(&implementation.setup_time)?;

		Ok(Self { complexity, setup_time, estimated_cost })
	}
}

/// Accepts `N unit`, `N-M unit`, `N–M unit` and `N to M unit`, with day, week, month or year units.
pub fn parse_setup_time(raw: &str) -> std::result::Result<DayRange, String> {
	let re = SETUP_TIME.as_ref().map_err(|err| format!("setup time pattern is invalid: {err}"))?;
	let caps = re
		.captures(raw)
		.ok_or_else(|| format!("implementation.setup_time {raw:?} is not a duration"))?;
	let number = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<f32>().ok());
	let Some(low) = number(1) else {
		return Err(format!("implementation.setup_time {raw:?} is not a duration"));
	};
	let high = number(2).unwrap_or(low);
	let unit_days = match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
		Some("day") => 1.0,
		Some("week") => 7.0,
		Some("month") => 30.0,
		Some("year") => 365.0,
		_ => return Err(format!("implementation.setup_time {raw:?} has an unknown unit")),
	};

	if high < low {
		return Err(format!("implementation.setup_time {raw:?} has a reversed range"));
	}

	Ok(DayRange { min: low * unit_days, max: high * unit_days })
}

/// `1 - distance / max_distance` on an ordinal scale of `steps` values.
pub fn ordinal_fit(preferred: usize, actual: usize, steps: usize) -> f32 {
	let max_distance = steps.saturating_sub(1).max(1) as f32;
	let distance = preferred.abs_diff(actual) as f32;

	(1.0 - distance / max_distance).clamp(0.0, 1.0)
}

/// Full credit on overlap, then linear decay over `decay_days` of gap.
pub fn timeline_fit(preferred: Timeline, setup: DayRange, decay_days: f32) -> f32 {
	let (pref_min, pref_max) = preferred.day_range();
	let gap = if setup.max < pref_min {
		pref_min - setup.max
	} else if setup.min > pref_max {
		setup.min - pref_max
	} else {
		return 1.0;
	};

	(1.0 - gap / decay_days).max(0.0)
}

/// Mean of the complexity, budget and timeline fits. Unset preferences count as `neutral_default`.
pub fn feasibility_fit(
	preferences: &Preferences,
	profile: &ImplementationProfile,
	cfg: &Scoring,
) -> f32 {
	let neutral = cfg.neutral_default;

	if preferences.is_empty() {
		return neutral;
	}

	let complexity = preferences
		.technical_complexity
		.map(|pref| {
			ordinal_fit(
				pref.ordinal(),
				profile.complexity.ordinal(),
				ComplexityLevel::ALL.len(),
			)
		})
		.unwrap_or(neutral);
	let budget = match (preferences.budget_range, profile.estimated_cost) {
		(Some(pref), Some(cost)) =>
			ordinal_fit(pref.ordinal(), cost.ordinal(), CostLevel::ALL.len()),
		_ => neutral,
	};
	let timeline = preferences
		.timeline
		.map(|pref| timeline_fit(pref, profile.setup_time, cfg.feasibility.timeline_decay_days))
		.unwrap_or(neutral);

	((complexity + budget + timeline) / 3.0).clamp(0.0, 1.0)
}

pub struct FeasibilityScorer;
impl Scorer for FeasibilityScorer {
	fn score(&self, query: &QueryView<'_>, candidate: &CandidateView<'_>) -> Result<ScoreOutcome> {
		let profile = ImplementationProfile::parse(&candidate.entry.implementation).map_err(
			|message| Error::Scoring { solution_id: candidate.entry.id.clone(), message },
		)?;

		Ok(ScoreOutcome::value(feasibility_fit(
			&query.query.preferences,
			&profile,
			&query.cfg.scoring,
		)))
	}
}
