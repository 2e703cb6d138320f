//! Business-context fit. Urgency is not matched here; it shifts aggregation weights instead.

use remedy_config::Scoring;
use remedy_domain::{QueryContext, SolutionEntry};

use crate::{
	Result,
	scoring::{CandidateView, QueryView, ScoreOutcome, Scorer},
};

/// Mean per-field credit over the industry and company-size fields the query supplies.
///
/// A field earns full credit when the candidate lists the value or leaves its fit list empty,
/// and `mismatch_credit` otherwise. With no supplied field the result is `neutral_default`.
pub fn context_fit(context: &QueryContext, entry: &SolutionEntry, cfg: &Scoring) -> f32 {
	let mismatch = cfg.context.mismatch_credit;
	let mut credits = Vec::with_capacity(2);

	if let Some(industry) = context.industry {
		credits.push(membership_credit(&entry.industry_fit, &industry, mismatch));
	}
	if let Some(size) = context.company_size {
		credits.push(membership_credit(&entry.company_size_fit, &size, mismatch));
	}

	if credits.is_empty() {
		return cfg.neutral_default;
	}

	let score = credits.iter().sum::<f32>() / credits.len() as f32;

	score.clamp(0.0, 1.0)
}

fn membership_credit<T>(fit: &[T], value: &T, mismatch: f32) -> f32
where
	T: PartialEq,
{
	if fit.is_empty() || fit.contains(value) { 1.0 } else { mismatch }
}

pub struct ContextFitScorer;
impl Scorer for ContextFitScorer {
	fn score(&self, query: &QueryView<'_>, candidate: &CandidateView<'_>) -> Result<ScoreOutcome> {
		Ok(ScoreOutcome::value(context_fit(
			&query.query.context,
			candidate.entry,
			&query.cfg.scoring,
		)))
	}
}
