use std::sync::Arc;

use remedy_config::Config;
use remedy_domain::{PainPointQuery, SolutionEntry};

use crate::{
	Result,
	context::ContextFitScorer,
	feasibility::FeasibilityScorer,
	similarity::{TermVector, TextSimilarityScorer},
};

/// Everything a scorer may read about the query. Built once per analysis.
pub struct QueryView<'a> {
	pub cfg: &'a Config,
	pub query: &'a PainPointQuery,
	/// The query projected into the corpus vector space.
	pub vector: &'a TermVector,
	/// Lower-cased raw description, used for keyword substring matching.
	pub description_lower: &'a str,
}

pub struct CandidateView<'a> {
	pub entry: &'a SolutionEntry,
	pub document: &'a TermVector,
	/// Load-order position in the corpus.
	pub position: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreOutcome {
	pub value: f32,
	pub matched_keywords: Vec<String>,
	pub matched_categories: Vec<String>,
	pub matched_areas: Vec<String>,
}
impl ScoreOutcome {
	pub fn value(value: f32) -> Self {
		Self { value, ..Self::default() }
	}
}

/// Computes one sub-score in `[0, 1]` for a candidate. An error excludes only that candidate.
pub trait Scorer
where
	Self: Send + Sync,
{
	fn score(&self, query: &QueryView<'_>, candidate: &CandidateView<'_>) -> Result<ScoreOutcome>;
}

#[derive(Clone)]
pub struct Scorers {
	pub text: Arc<dyn Scorer>,
	pub context: Arc<dyn Scorer>,
	pub feasibility: Arc<dyn Scorer>,
}
impl Default for Scorers {
	fn default() -> Self {
		Self {
			text: Arc::new(TextSimilarityScorer),
			context: Arc::new(ContextFitScorer),
			feasibility: Arc::new(FeasibilityScorer),
		}
	}
}
