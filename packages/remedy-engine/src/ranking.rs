use std::cmp::Ordering;

use serde::Serialize;

use remedy_config::{Ranking, ScoringWeights, UrgencyShift};
use remedy_domain::UrgencyLevel;

/// Aggregation weights after urgency adjustment. Always sums to the configured total.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Weights {
	pub text: f32,
	pub context: f32,
	pub feasibility: f32,
}
impl Weights {
	/// High and critical urgency move weight from feasibility to text and context in equal halves.
	pub fn for_urgency(
		base: &ScoringWeights,
		shift: &UrgencyShift,
		urgency: Option<UrgencyLevel>,
	) -> Self {
		let requested = match urgency {
			Some(UrgencyLevel::High) => shift.high_shift,
			Some(UrgencyLevel::Critical) => shift.critical_shift,
			_ => 0.0,
		};
		let moved = requested.min(base.feasibility).max(0.0);

		Self {
			text: base.text + moved / 2.0,
			context: base.context + moved / 2.0,
			feasibility: base.feasibility - moved,
		}
	}

	pub fn combine(&self, text: f32, context: f32, feasibility: f32) -> f32 {
		let confidence = self.text * text + self.context * context + self.feasibility * feasibility;

		if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 }
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreBreakdown {
	pub solution_id: String,
	pub text_similarity: f32,
	pub context_relevance: f32,
	pub feasibility: f32,
	pub confidence: f32,
	pub matched_keywords: Vec<String>,
	pub matched_categories: Vec<String>,
	pub matched_areas: Vec<String>,
	/// Corpus load order, used for tie-breaking.
	#[serde(skip)]
	pub position: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedResult {
	pub rank: u32,
	pub solution_id: String,
	pub confidence: f32,
	pub score_breakdown: ScoreBreakdown,
	/// Related solutions that also made this list. Informational only.
	pub related_in_results: Vec<String>,
}

/// Filters below the threshold, orders by confidence then load position, and truncates.
pub fn rank(mut candidates: Vec<ScoreBreakdown>, cfg: &Ranking) -> Vec<RankedResult> {
	candidates.retain(|candidate| candidate.confidence >= cfg.confidence_threshold);
	candidates.sort_by(|a, b| {
		cmp_f32_desc(a.confidence, b.confidence).then_with(|| a.position.cmp(&b.position))
	});
	candidates.truncate(cfg.max_results as usize);

	candidates
		.into_iter()
		.enumerate()
		.map(|(idx, breakdown)| RankedResult {
			rank: idx as u32 + 1,
			solution_id: breakdown.solution_id.clone(),
			confidence: breakdown.confidence,
			score_breakdown: breakdown,
			related_in_results: Vec::new(),
		})
		.collect()
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
