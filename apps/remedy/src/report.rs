//! Presentation of engine output: the analysis report and knowledge-base listings.

use std::fmt;

use serde::Serialize;

use remedy_domain::{Corpus, PainPointQuery};
use remedy_engine::{CandidateExclusion, MatchReport, ScoreBreakdown, Weights};

use crate::guidance::{self, AlternativeApproach, NextSteps};

const LISTING_DESCRIPTION_CHARS: usize = 60;

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
	pub summary: String,
	pub key_challenges: Vec<String>,
	pub impact_assessment: String,
	pub solutions: Vec<SolutionReport>,
	pub alternative_approaches: Vec<AlternativeApproach>,
	pub next_steps: NextSteps,
	pub metadata: RunMetadata,
}
impl AnalysisReport {
	pub fn new(query: &PainPointQuery, corpus: &Corpus, report: MatchReport) -> Self {
		let mut solutions = Vec::with_capacity(report.results.len());
		let mut picks = Vec::with_capacity(report.results.len());

		for result in report.results {
			let Ok(entry) = corpus.get(&result.solution_id) else { continue };

			picks.push((entry, result.confidence));
			solutions.push(SolutionReport {
				rank: result.rank,
				feature_id: entry.id.clone(),
				feature_name: entry.name.clone(),
				category: entry.category.clone(),
				confidence: result.confidence,
				score_breakdown: result.score_breakdown,
				setup_time: entry.implementation.setup_time.clone(),
				complexity: entry.implementation.complexity.clone(),
				quantitative_benefits: entry.benefits.quantitative.clone(),
				qualitative_benefits: entry.benefits.qualitative.clone(),
				how_it_helps: guidance::how_it_helps(entry, query),
				implementation_steps: guidance::implementation_steps(entry),
				success_metrics: guidance::success_metrics(entry),
				related_case_studies: guidance::case_studies(entry),
				related_in_results: result.related_in_results,
			});
		}

		Self {
			summary: summarize(query),
			key_challenges: guidance::key_challenges(query),
			impact_assessment: guidance::assess_impact(query),
			alternative_approaches: guidance::alternative_approaches(query, solutions.len()),
			next_steps: guidance::next_steps(query, &picks),
			solutions,
			metadata: RunMetadata {
				version: remedy_cli::VERSION,
				knowledge_base_entries: corpus.len(),
				total_candidates_considered: report.total_candidates_considered,
				confidence_threshold_applied: report.confidence_threshold_applied,
				weights_applied: report.weights_applied,
				excluded: report.excluded,
			},
		}
	}
}

#[derive(Debug, Serialize)]
pub struct SolutionReport {
	pub rank: u32,
	pub feature_id: String,
	pub feature_name: String,
	pub category: String,
	pub confidence: f32,
	pub score_breakdown: ScoreBreakdown,
	pub setup_time: String,
	pub complexity: String,
	pub quantitative_benefits: Vec<String>,
	pub qualitative_benefits: Vec<String>,
	pub how_it_helps: String,
	pub implementation_steps: Vec<String>,
	pub success_metrics: Vec<String>,
	pub related_case_studies: Vec<String>,
	pub related_in_results: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RunMetadata {
	pub version: &'static str,
	pub knowledge_base_entries: usize,
	pub total_candidates_considered: usize,
	pub confidence_threshold_applied: f32,
	pub weights_applied: Weights,
	pub excluded: Vec<CandidateExclusion>,
}

/// One-line restatement of the query: issue, industry, scale and affected areas.
pub fn summarize(query: &PainPointQuery) -> String {
	let mut parts = vec![format!("Main issue: {}", query.description.trim())];

	if let Some(industry) = query.context.industry {
		parts.push(format!("Industry: {industry}"));
	}
	if let Some(size) = query.context.company_size {
		parts.push(format!("Scale: {size}"));
	}
	if !query.affected_areas.is_empty() {
		parts.push(format!("Affected areas: {}", query.affected_areas.join(", ")));
	}

	parts.join(". ")
}

pub struct Markdown<'a>(pub &'a AnalysisReport);
impl fmt::Display for Markdown<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let report = self.0;

		writeln!(f, "# Pain Point Analysis Report")?;
		writeln!(f)?;
		writeln!(f, "**Summary:** {}", report.summary)?;
		writeln!(f)?;
		writeln!(f, "**Impact:** {}", report.impact_assessment)?;
		writeln!(f)?;
		writeln!(f, "## Key Challenges")?;
		writeln!(f)?;

		for challenge in &report.key_challenges {
			writeln!(f, "- {challenge}")?;
		}

		writeln!(f)?;
		writeln!(f, "## Recommended Solutions")?;
		writeln!(f)?;

		if report.solutions.is_empty() {
			writeln!(f, "No solution reached the confidence threshold.")?;
			writeln!(f)?;
		}

		for solution in &report.solutions {
			let breakdown = &solution.score_breakdown;

			writeln!(
				f,
				"### {}. {} ({})",
				solution.rank, solution.feature_name, solution.category
			)?;
			writeln!(f)?;
			writeln!(f, "{}", solution.how_it_helps)?;
			writeln!(f)?;
			writeln!(f, "**Confidence:** {:.2}/1.00", solution.confidence)?;
			writeln!(
				f,
				"**Breakdown:** text {:.2}, context {:.2}, feasibility {:.2}",
				breakdown.text_similarity, breakdown.context_relevance, breakdown.feasibility
			)?;
			writeln!(
				f,
				"**Implementation:** {} complexity, {}",
				solution.complexity, solution.setup_time
			)?;

			if !breakdown.matched_keywords.is_empty() {
				writeln!(f, "**Matched keywords:** {}", breakdown.matched_keywords.join(", "))?;
			}

			if !solution.success_metrics.is_empty() {
				writeln!(f, "**Success metrics:** {}", solution.success_metrics.join(", "))?;
			}

			writeln!(f)?;

			let benefits =
				solution.quantitative_benefits.iter().chain(&solution.qualitative_benefits);

			for benefit in benefits {
				writeln!(f, "- {benefit}")?;
			}

			if !solution.related_in_results.is_empty() {
				writeln!(f, "- Works with: {}", solution.related_in_results.join(", "))?;
			}

			for case in &solution.related_case_studies {
				writeln!(f, "- Case study: {case}")?;
			}

			writeln!(f)?;
			writeln!(f, "Implementation steps:")?;
			writeln!(f)?;

			for (idx, step) in solution.implementation_steps.iter().enumerate() {
				writeln!(f, "{}. {step}", idx + 1)?;
			}

			writeln!(f)?;
		}

		if !report.alternative_approaches.is_empty() {
			writeln!(f, "## Alternative Approaches")?;
			writeln!(f)?;

			for approach in &report.alternative_approaches {
				writeln!(f, "### {}", approach.approach_name)?;
				writeln!(f)?;
				writeln!(f, "{}", approach.description)?;
				writeln!(f)?;
				writeln!(f, "- Pros: {}", approach.pros.join(", "))?;
				writeln!(f, "- Cons: {}", approach.cons.join(", "))?;
				writeln!(f)?;
			}
		}

		let next = &report.next_steps;

		writeln!(f, "## Next Steps")?;
		writeln!(f)?;

		for action in &next.immediate_actions {
			writeln!(f, "- {action}")?;
		}

		if !next.demo_requests.is_empty() {
			writeln!(f, "- Demos: {}", next.demo_requests.join(", "))?;
		}

		writeln!(
			f,
			"- Consultation: {}",
			if next.consultation_needed { "recommended" } else { "optional" }
		)?;
		writeln!(f)?;

		let meta = &report.metadata;

		writeln!(f, "## Run")?;
		writeln!(f)?;
		writeln!(
			f,
			"- Candidates considered: {} of {}",
			meta.total_candidates_considered, meta.knowledge_base_entries
		)?;
		writeln!(f, "- Confidence threshold: {:.2}", meta.confidence_threshold_applied)?;
		writeln!(
			f,
			"- Weights: text {:.2}, context {:.2}, feasibility {:.2}",
			meta.weights_applied.text,
			meta.weights_applied.context,
			meta.weights_applied.feasibility
		)?;

		for exclusion in &meta.excluded {
			writeln!(f, "- Excluded {}: {}", exclusion.solution_id, exclusion.reason)?;
		}

		Ok(())
	}
}

/// Aligned `id  name  [category]  description` lines.
pub struct FeatureList<'a>(pub &'a Corpus);
impl fmt::Display for FeatureList<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let entries = self.0.all();
		let id_width = entries.iter().map(|entry| entry.id.chars().count()).max().unwrap_or(0);
		let name_width = entries.iter().map(|entry| entry.name.chars().count()).max().unwrap_or(0);

		for entry in entries {
			writeln!(
				f,
				"{:<id_width$}  {:<name_width$}  [{}]  {}",
				entry.id,
				entry.name,
				entry.category,
				truncate(&entry.short_description, LISTING_DESCRIPTION_CHARS)
			)?;
		}

		Ok(())
	}
}

fn truncate(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_string();
	}

	let head: String = text.chars().take(max_chars).collect();

	format!("{}...", head.trim_end())
}

#[cfg(test)]
mod tests {
	use remedy_domain::{CompanySize, Industry, QueryContext};

	use super::*;

	#[test]
	fn summary_lists_supplied_context_only() {
		let query = PainPointQuery::new(" Survey response rate is low ")
			.with_context(QueryContext {
				industry: Some(Industry::ECommerce),
				company_size: Some(CompanySize::Medium),
				..QueryContext::default()
			})
			.with_affected_areas(["marketing", "customer_service"]);

		assert_eq!(
			summarize(&query),
			"Main issue: Survey response rate is low. Industry: e_commerce. Scale: medium. \
			 Affected areas: marketing, customer_service"
		);
		assert_eq!(summarize(&PainPointQuery::new("Backlog")), "Main issue: Backlog");
	}

	#[test]
	fn truncates_on_char_boundaries() {
		assert_eq!(truncate("short", 60), "short");
		assert_eq!(truncate("ééééé", 3), "ééé...");
	}
}
