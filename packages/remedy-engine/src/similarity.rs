//! TF-IDF vector space over the corpus plus the exact-keyword boost.
//!
//! Each solution's descriptive text is one document. The vocabulary is closed: query terms the
//! corpus never uses carry no weight.

use std::collections::HashMap;

use remedy_config::{KeywordBoost, Normalizer};
use remedy_domain::{Corpus, SolutionEntry};

use crate::{
	Result,
	scoring::{CandidateView, QueryView, ScoreOutcome, Scorer},
	text::{self, NormalizedText},
};

/// Sparse, L2-normalized vector sorted by term id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermVector {
	terms: Vec<(usize, f32)>,
}
impl TermVector {
	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}

	fn from_weights(mut terms: Vec<(usize, f32)>) -> Self {
		terms.retain(|(_, weight)| *weight > 0.0);
		terms.sort_by_key(|(term, _)| *term);

		let norm = terms.iter().map(|(_, weight)| weight * weight).sum::<f32>().sqrt();

		if norm <= f32::EPSILON {
			return Self::default();
		}

		for (_, weight) in &mut terms {
			*weight /= norm;
		}

		Self { terms }
	}
}

#[derive(Debug, Default)]
pub struct TfIdfIndex {
	vocabulary: HashMap<String, usize>,
	idf: Vec<f32>,
	documents: Vec<TermVector>,
}
impl TfIdfIndex {
	/// Term ids follow first appearance in corpus load order.
	pub fn build(corpus: &Corpus, cfg: &Normalizer) -> Self {
		let tokenized: Vec<NormalizedText> = corpus
			.all()
			.iter()
			.map(|entry| text::normalize(&entry.descriptive_text(), cfg))
			.collect();
		let mut vocabulary = HashMap::new();
		let mut doc_freq: Vec<u32> = Vec::new();

		for doc in &tokenized {
			let mut seen_in_doc = Vec::new();

			for token in doc.tokens() {
				let next_id = vocabulary.len();
				let id = *vocabulary.entry(token.clone()).or_insert(next_id);

				if id == doc_freq.len() {
					doc_freq.push(0);
				}
				if !seen_in_doc.contains(&id) {
					seen_in_doc.push(id);

					doc_freq[id] += 1;
				}
			}
		}

		let n_docs = tokenized.len() as f32;
		let idf =
			doc_freq.iter().map(|df| ((1.0 + n_docs) / (1.0 + *df as f32)).ln() + 1.0).collect();
		let mut index = Self { vocabulary, idf, documents: Vec::with_capacity(tokenized.len()) };

		for doc in &tokenized {
			let vector = index.project(doc);

			index.documents.push(vector);
		}

		index
	}

	/// Document vector for the entry at `position` in corpus load order.
	pub fn document(&self, position: usize) -> Option<&TermVector> {
		self.documents.get(position)
	}

	pub fn vocabulary_len(&self) -> usize {
		self.vocabulary.len()
	}

	/// Sublinear tf (`1 + ln(count)`) times smoothed idf. Unknown terms are skipped.
	pub fn project(&self, text: &NormalizedText) -> TermVector {
		let mut counts: HashMap<usize, u32> = HashMap::new();

		for token in text.tokens() {
			if let Some(id) = self.vocabulary.get(token) {
				*counts.entry(*id).or_default() += 1;
			}
		}

		let weights = counts
			.into_iter()
			.map(|(id, count)| (id, (1.0 + (count as f32).ln()) * self.idf[id]))
			.collect();

		TermVector::from_weights(weights)
	}
}

/// Cosine similarity of two normalized vectors, clamped to `[0, 1]`.
pub fn cosine(lhs: &TermVector, rhs: &TermVector) -> f32 {
	if lhs.is_empty() || rhs.is_empty() {
		return 0.0;
	}

	let (mut i, mut j) = (0, 0);
	let mut dot = 0.0_f32;

	while i < lhs.terms.len() && j < rhs.terms.len() {
		let (l_id, l_weight) = lhs.terms[i];
		let (r_id, r_weight) = rhs.terms[j];

		match l_id.cmp(&r_id) {
			std::cmp::Ordering::Less => i += 1,
			std::cmp::Ordering::Greater => j += 1,
			std::cmp::Ordering::Equal => {
				dot += l_weight * r_weight;
				i += 1;
				j += 1;
			},
		}
	}

	if dot.is_finite() { dot.clamp(0.0, 1.0) } else { 0.0 }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordHits {
	pub boost: f32,
	pub matched_keywords: Vec<String>,
	pub matched_categories: Vec<String>,
}

/// Adds `per_category` for each pain category with a keyword found (case-insensitive substring)
/// in the query text, capped at `max_total`.
pub fn keyword_boost(
	description_lower: &str,
	entry: &SolutionEntry,
	cfg: &KeywordBoost,
) -> KeywordHits {
	let mut hits = KeywordHits::default();

	for pain_point in &entry.pain_points {
		let mut category_matched = false;

		for keyword in &pain_point.keywords {
			let needle = keyword.to_lowercase();

			if needle.is_empty() || !description_lower.contains(needle.as_str()) {
				continue;
			}

			category_matched = true;

			if !hits.matched_keywords.contains(&needle) {
				hits.matched_keywords.push(needle);
			}
		}

		if category_matched && !hits.matched_categories.contains(&pain_point.category) {
			hits.matched_categories.push(pain_point.category.clone());
		}
	}

	let raw = cfg.per_category * hits.matched_categories.len() as f32;

	hits.boost = raw.min(cfg.max_total).max(0.0);

	hits
}

/// Areas named in the query that appear in a capability name or use case.
pub fn matched_areas(affected_areas: &[String], entry: &SolutionEntry) -> Vec<String> {
	let haystacks: Vec<String> = entry
		.capabilities
		.iter()
		.map(|cap| cap.name.to_lowercase())
		.chain(entry.use_cases().map(str::to_lowercase))
		.collect();

	affected_areas
		.iter()
		.filter(|area| {
			let needle = area.to_lowercase().replace('_', " ");

			haystacks.iter().any(|haystack| haystack.contains(needle.as_str()))
		})
		.cloned()
		.collect()
}

pub struct TextSimilarityScorer;
impl Scorer for TextSimilarityScorer {
	fn score(&self, query: &QueryView<'_>, candidate: &CandidateView<'_>) -> Result<ScoreOutcome> {
		let base = cosine(query.vector, candidate.document);
		let hits = keyword_boost(
			query.description_lower,
			candidate.entry,
			&query.cfg.scoring.keyword_boost,
		);

		Ok(ScoreOutcome {
			value: (base + hits.boost).clamp(0.0, 1.0),
			matched_keywords: hits.matched_keywords,
			matched_categories: hits.matched_categories,
			matched_areas: matched_areas(&query.query.affected_areas, candidate.entry),
		})
	}
}
