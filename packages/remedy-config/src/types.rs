use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub scoring: Scoring,
	pub ranking: Ranking,
	pub normalizer: Normalizer,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	/// An `EnvFilter` directive, e.g. "info" or "remedy_engine=debug".
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Scoring {
	/// Score given to context and feasibility when the query supplies nothing to compare.
	pub neutral_default: f32,
	pub weights: ScoringWeights,
	pub keyword_boost: KeywordBoost,
	pub urgency: UrgencyShift,
	pub context: ContextScoring,
	pub feasibility: FeasibilityScoring,
}
impl Default for Scoring {
	fn default() -> Self {
		Self {
			neutral_default: 0.5,
			weights: ScoringWeights::default(),
			keyword_boost: KeywordBoost::default(),
			urgency: UrgencyShift::default(),
			context: ContextScoring::default(),
			feasibility: FeasibilityScoring::default(),
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
	pub text: f32,
	pub context: f32,
	pub feasibility: f32,
}
impl ScoringWeights {
	pub fn sum(&self) -> f32 {
		self.text + self.context + self.feasibility
	}
}
impl Default for ScoringWeights {
	fn default() -> Self {
		Self { text: 0.5, context: 0.3, feasibility: 0.2 }
	}
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct KeywordBoost {
	/// Added once per pain category with at least one keyword found in the query text.
	pub per_category: f32,
	pub max_total: f32,
}
impl Default for KeywordBoost {
	fn default() -> Self {
		Self { per_category: 0.05, max_total: 0.15 }
	}
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct UrgencyShift {
	/// Weight moved from feasibility to text and context for "high" urgency.
	pub high_shift: f32,
	/// Weight moved from feasibility to text and context for "critical" urgency.
	pub critical_shift: f32,
}
impl Default for UrgencyShift {
	fn default() -> Self {
		Self { high_shift: 0.05, critical_shift: 0.1 }
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContextScoring {
	/// Credit for a supplied context field that the candidate does not list.
	pub mismatch_credit: f32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct FeasibilityScoring {
	/// Gap in days between the preferred timeline and the setup time at which the timeline
	/// score reaches zero.
	pub timeline_decay_days: f32,
}
impl Default for FeasibilityScoring {
	fn default() -> Self {
		Self { timeline_decay_days: 90.0 }
	}
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// Candidates strictly below this confidence are dropped.
	pub confidence_threshold: f32,
	pub max_results: u32,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { confidence_threshold: 0.1, max_results: 5 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Normalizer {
	pub min_token_len: u32,
	pub stemming: bool,
	pub extra_stop_words: Vec<String>,
}
impl Default for Normalizer {
	fn default() -> Self {
		Self { min_token_len: 2, stemming: true, extra_stop_words: Vec::new() }
	}
}
