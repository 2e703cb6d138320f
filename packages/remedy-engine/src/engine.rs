use std::sync::{Arc, PoisonError, RwLock};

use rayon::prelude::*;
use serde::Serialize;

use remedy_config::Config;
use remedy_domain::{Corpus, PainPointQuery, QueryInput, SolutionEntry};

use crate::{
	Error, Result,
	ranking::{self, RankedResult, ScoreBreakdown, Weights},
	scoring::{CandidateView, QueryView, ScoreOutcome, Scorer, Scorers},
	similarity::{TermVector, TfIdfIndex},
	text::{self, NormalizedText},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchReport {
	pub results: Vec<RankedResult>,
	/// Candidates that produced a score, before thresholding.
	pub total_candidates_considered: usize,
	pub confidence_threshold_applied: f32,
	pub weights_applied: Weights,
	pub excluded: Vec<CandidateExclusion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateExclusion {
	pub solution_id: String,
	pub reason: String,
}

struct Snapshot {
	corpus: Arc<Corpus>,
	index: TfIdfIndex,
}
impl Snapshot {
	fn build(corpus: Arc<Corpus>, cfg: &Config) -> Self {
		let index = TfIdfIndex::build(&corpus, &cfg.normalizer);

		Self { corpus, index }
	}
}

/// Parses a knowledge-base document. Any schema problem fails the whole load.
pub fn load_corpus(raw: &str) -> Result<Corpus> {
	Ok(Corpus::from_json_str(raw)?)
}

/// Checks every enum field of a raw request against the shared vocabularies.
pub fn parse_query(input: QueryInput) -> Result<PainPointQuery> {
	Ok(PainPointQuery::parse(input)?)
}

/// Scores a query against the current corpus snapshot.
///
/// The snapshot is swapped whole; a query holds the one it started with until it returns.
pub struct MatchingEngine {
	cfg: Config,
	scorers: Scorers,
	snapshot: RwLock<Arc<Snapshot>>,
}
impl MatchingEngine {
	pub fn new(cfg: Config, corpus: Arc<Corpus>) -> Result<Self> {
		Self::with_scorers(cfg, corpus, Scorers::default())
	}

	pub fn with_scorers(cfg: Config, corpus: Arc<Corpus>, scorers: Scorers) -> Result<Self> {
		remedy_config::validate(&cfg)?;

		let snapshot = Snapshot::build(corpus, &cfg);

		tracing::info!(
			entries = snapshot.corpus.len(),
			vocabulary = snapshot.index.vocabulary_len(),
			"Matching engine ready."
		);

		Ok(Self { cfg, scorers, snapshot: RwLock::new(Arc::new(snapshot)) })
	}

	pub fn corpus(&self) -> Arc<Corpus> {
		self.current().corpus.clone()
	}

	/// Looks `id` up in the current snapshot.
	pub fn solution(&self, id: &str) -> Result<SolutionEntry> {
		Ok(self.current().corpus.get(id)?.clone())
	}

	/// Builds the index for `corpus` first, then publishes it for new queries.
	pub fn replace_corpus(&self, corpus: Arc<Corpus>) {
		let snapshot = Arc::new(Snapshot::build(corpus, &self.cfg));
		let entries = snapshot.corpus.len();
		let vocabulary = snapshot.index.vocabulary_len();

		*self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;

		tracing::info!(entries, vocabulary, "Corpus snapshot replaced.");
	}

	pub fn analyze(&self, query: &PainPointQuery) -> Result<MatchReport> {
		let normalized = text::normalize(&query.description, &self.cfg.normalizer);

		if normalized.is_empty() {
			return Err(Error::EmptyQuery);
		}

		let snapshot = self.current();
		let query_text = normalize_query_text(query, &normalized, &self.cfg);
		let vector = snapshot.index.project(&query_text);
		let description_lower = query.description.to_lowercase();
		let view = QueryView {
			cfg: &self.cfg,
			query,
			vector: &vector,
			description_lower: &description_lower,
		};
		let weights = Weights::for_urgency(
			&self.cfg.scoring.weights,
			&self.cfg.scoring.urgency,
			query.context.urgency_level,
		);
		let outcomes: Vec<std::result::Result<ScoreBreakdown, CandidateExclusion>> = snapshot
			.corpus
			.all()
			.par_iter()
			.enumerate()
			.map(|(position, entry)| {
				let empty = TermVector::default();
				let candidate = CandidateView {
					entry,
					document: snapshot.index.document(position).unwrap_or(&empty),
					position,
				};

				self.score_candidate(&view, &candidate, &weights).map_err(|err| {
					CandidateExclusion { solution_id: entry.id.clone(), reason: err.to_string() }
				})
			})
			.collect();
		let mut scored = Vec::with_capacity(outcomes.len());
		let mut excluded = Vec::new();

		for outcome in outcomes {
			match outcome {
				Ok(breakdown) => scored.push(breakdown),
				Err(exclusion) => {
					tracing::warn!(
						solution_id = %exclusion.solution_id,
						reason = %exclusion.reason,
						"Excluding candidate from results."
					);

					excluded.push(exclusion);
				},
			}
		}

		let total_candidates_considered = scored.len();
		let mut results = ranking::rank(scored, &self.cfg.ranking);

		link_related(&mut results, &snapshot.corpus);

		tracing::debug!(
			candidates = total_candidates_considered,
			returned = results.len(),
			excluded = excluded.len(),
			top = results.first().map(|result| result.solution_id.as_str()).unwrap_or(""),
			"Pain point analyzed."
		);

		Ok(MatchReport {
			results,
			total_candidates_considered,
			confidence_threshold_applied: self.cfg.ranking.confidence_threshold,
			weights_applied: weights,
			excluded,
		})
	}

	fn current(&self) -> Arc<Snapshot> {
		self.snapshot.read().unwrap_or_else(PoisonError::into_inner).clone()
	}

	fn score_candidate(
		&self,
		view: &QueryView<'_>,
		candidate: &CandidateView<'_>,
		weights: &Weights,
	) -> Result<ScoreBreakdown> {
		let id = &candidate.entry.id;
		let text = checked(id, "text", self.scorers.text.as_ref(), view, candidate)?;
		let context = checked(id, "context", self.scorers.context.as_ref(), view, candidate)?;
		let feasibility =
			checked(id, "feasibility", self.scorers.feasibility.as_ref(), view, candidate)?;
		let confidence = weights.combine(text.value, context.value, feasibility.value);

		Ok(ScoreBreakdown {
			solution_id: id.clone(),
			text_similarity: text.value,
			context_relevance: context.value,
			feasibility: feasibility.value,
			confidence,
			matched_keywords: text.matched_keywords,
			matched_categories: text.matched_categories,
			matched_areas: text.matched_areas,
			position: candidate.position,
		})
	}
}

/// Description tokens plus the affected areas, projected together.
fn normalize_query_text(
	query: &PainPointQuery,
	description: &NormalizedText,
	cfg: &Config,
) -> NormalizedText {
	if query.affected_areas.is_empty() {
		return description.clone();
	}

	let mut tokens = description.tokens().to_vec();

	for area in &query.affected_areas {
		let area = text::normalize(&area.replace('_', " "), &cfg.normalizer);

		tokens.extend_from_slice(area.tokens());
	}

	NormalizedText::Tokens(tokens)
}

fn checked(
	solution_id: &str,
	label: &str,
	scorer: &dyn Scorer,
	view: &QueryView<'_>,
	candidate: &CandidateView<'_>,
) -> Result<ScoreOutcome> {
	let mut outcome = scorer.score(view, candidate)?;

	if !outcome.value.is_finite() {
		return Err(Error::Scoring {
			solution_id: solution_id.to_string(),
			message: format!("{label} score is not a finite number"),
		});
	}

	outcome.value = outcome.value.clamp(0.0, 1.0);

	Ok(outcome)
}

fn link_related(results: &mut [RankedResult], corpus: &Corpus) {
	let returned: Vec<String> = results.iter().map(|result| result.solution_id.clone()).collect();

	for result in results.iter_mut() {
		let Ok(entry) = corpus.get(&result.solution_id) else { continue };

		result.related_in_results = entry
			.related_features
			.iter()
			.filter(|related| **related != result.solution_id && returned.contains(related))
			.cloned()
			.collect();
	}
}
