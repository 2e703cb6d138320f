use std::{
	collections::{HashMap, HashSet},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
	Error, Result,
	vocab::{CompanySize, Industry, UrgencyLevel},
};

/// Top-level knowledge-base document. Sections other than `features` are ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct KnowledgeBaseDocument {
	#[serde(default)]
	pub features: Vec<SolutionRecord>,
}

/// One knowledge-base record as authored. Required fields are `Option` so that every
/// missing field can be reported at once.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SolutionRecord {
	#[serde(alias = "id")]
	pub feature_id: Option<String>,
	pub feature_name: Option<String>,
	pub category: Option<String>,
	pub subcategory: Option<String>,
	pub description: Option<DescriptionRecord>,
	#[serde(default)]
	pub capabilities: Vec<CapabilityRecord>,
	#[serde(default)]
	pub benefits: Benefits,
	#[serde(default)]
	pub pain_points_addressed: Vec<PainPointRecord>,
	pub implementation: Option<ImplementationRecord>,
	#[serde(default)]
	pub industry_fit: Vec<String>,
	#[serde(default)]
	pub company_size_fit: Vec<String>,
	#[serde(default)]
	pub related_features: Vec<String>,
	#[serde(default)]
	pub success_stories: Vec<SuccessStoryRecord>,
	pub pricing_tier: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DescriptionRecord {
	pub short: Option<String>,
	pub detailed: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CapabilityRecord {
	pub capability_name: Option<String>,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub use_cases: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PainPointRecord {
	pub pain_category: Option<String>,
	#[serde(default)]
	pub keywords: Vec<String>,
	#[serde(default)]
	pub severity_levels: Vec<String>,
	#[serde(default)]
	pub business_contexts: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ImplementationRecord {
	pub complexity: Option<String>,
	pub setup_time: Option<String>,
	pub estimated_cost: Option<String>,
	#[serde(default)]
	pub resources_needed: Vec<String>,
	#[serde(default)]
	pub prerequisites: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SuccessStoryRecord {
	pub industry: Option<String>,
	pub company_size: Option<String>,
	pub challenge: Option<String>,
	#[serde(default)]
	pub solution: String,
	pub results: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Benefits {
	#[serde(default)]
	pub quantitative: Vec<String>,
	#[serde(default)]
	pub qualitative: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolutionEntry {
	pub id: String,
	pub name: String,
	pub category: String,
	pub subcategory: Option<String>,
	pub short_description: String,
	pub detailed_description: String,
	pub capabilities: Vec<Capability>,
	pub benefits: Benefits,
	pub pain_points: Vec<PainCategory>,
	pub implementation: Implementation,
	/// Empty means the solution fits every industry.
	pub industry_fit: Vec<Industry>,
	/// Empty means the solution fits every company size.
	pub company_size_fit: Vec<CompanySize>,
	/// Adjacent solutions. Informational only; never used for scoring.
	pub related_features: Vec<String>,
	/// Customer outcomes, for presentation only.
	pub success_stories: Vec<SuccessStory>,
	pub pricing_tier: Option<String>,
}
impl SolutionEntry {
	pub fn use_cases(&self) -> impl Iterator<Item = &str> {
		self.capabilities.iter().flat_map(|cap| cap.use_cases.iter().map(String::as_str))
	}

	/// All descriptive fields joined in a fixed order; this is the similarity document.
	pub fn descriptive_text(&self) -> String {
		let mut parts = vec![
			self.name.as_str(),
			self.short_description.as_str(),
			self.detailed_description.as_str(),
		];

		for capability in &self.capabilities {
			parts.push(&capability.name);
			parts.push(&capability.description);
			parts.extend(capability.use_cases.iter().map(String::as_str));
		}

		parts.extend(self.benefits.quantitative.iter().map(String::as_str));
		parts.extend(self.benefits.qualitative.iter().map(String::as_str));

		parts
			.into_iter()
			.map(str::trim)
			.filter(|part| !part.is_empty())
			.collect::<Vec<_>>()
			.join("\n")
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Capability {
	pub name: String,
	pub description: String,
	pub use_cases: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PainCategory {
	pub category: String,
	pub keywords: Vec<String>,
	pub severity_levels: Vec<UrgencyLevel>,
	pub business_contexts: Vec<String>,
}

/// Implementation profile. Levels stay as authored and are interpreted at scoring time, so one
/// malformed entry only removes itself from a result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Implementation {
	pub complexity: String,
	pub setup_time: String,
	pub estimated_cost: Option<String>,
	pub resources_needed: Vec<String>,
	pub prerequisites: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuccessStory {
	pub industry: Option<String>,
	pub company_size: Option<CompanySize>,
	pub challenge: String,
	pub solution: String,
	pub results: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExcludedEntry {
	pub id: String,
	pub reason: String,
}

/// Read-only snapshot of the knowledge base.
#[derive(Debug, Default)]
pub struct Corpus {
	entries: Vec<SolutionEntry>,
	positions: HashMap<String, usize>,
	excluded: Vec<ExcludedEntry>,
}
impl Corpus {
	pub fn from_json_str(raw: &str) -> Result<Self> {
		let document: KnowledgeBaseDocument = serde_json::from_str(raw).map_err(|err| {
			if err.is_data() {
				Error::Schema { issues: vec![err.to_string()] }
			} else {
				Error::Json(err)
			}
		})?;

		Self::from_records(document.features)
	}

	pub fn from_records(records: Vec<SolutionRecord>) -> Result<Self> {
		let mut issues = Vec::new();
		let mut seen_ids = HashSet::new();
		let mut validated = Vec::with_capacity(records.len());

		for (idx, record) in records.into_iter().enumerate() {
			let Some(entry) = validate_record(idx, record, &mut issues) else { continue };

			if !seen_ids.insert(entry.id.clone()) {
				issues.push(format!("features[{idx}].feature_id {:?} is a duplicate", entry.id));

				continue;
			}

			validated.push(entry);
		}

		if !issues.is_empty() {
			return Err(Error::Schema { issues });
		}

		let mut entries = Vec::with_capacity(validated.len());
		let mut excluded = Vec::new();

		for entry in validated {
			if entry.descriptive_text().is_empty() {
				tracing::warn!(
					solution_id = %entry.id,
					"Excluding solution without descriptive text."
				);

				excluded.push(ExcludedEntry {
					id: entry.id,
					reason: "descriptive text is empty".to_string(),
				});

				continue;
			}

			entries.push(entry);
		}

		let positions =
			entries.iter().enumerate().map(|(idx, entry)| (entry.id.clone(), idx)).collect();
		let corpus = Self { entries, positions, excluded };

		corpus.warn_unknown_related_features();

		tracing::info!(
			entries = corpus.entries.len(),
			excluded = corpus.excluded.len(),
			"Knowledge base loaded."
		);

		Ok(corpus)
	}

	/// Entries in load order.
	pub fn all(&self) -> &[SolutionEntry] {
		&self.entries
	}

	pub fn get(&self, id: &str) -> Result<&SolutionEntry> {
		self.position(id)
			.map(|idx| &self.entries[idx])
			.ok_or_else(|| Error::NotFound { id: id.to_string() })
	}

	pub fn position(&self, id: &str) -> Option<usize> {
		self.positions.get(id).copied()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.positions.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries dropped at load because they carry no descriptive text.
	pub fn excluded(&self) -> &[ExcludedEntry] {
		&self.excluded
	}

	fn warn_unknown_related_features(&self) {
		for entry in &self.entries {
			for related in &entry.related_features {
				if !self.contains(related) {
					tracing::warn!(
						solution_id = %entry.id,
						related = %related,
						"Related feature is not in the knowledge base."
					);
				}
			}
		}
	}
}

fn validate_record(
	idx: usize,
	record: SolutionRecord,
	issues: &mut Vec<String>,
) -> Option<SolutionEntry> {
	let start = issues.len();
	let prefix = format!("features[{idx}]");
	let id = required(&prefix, "feature_id", record.feature_id, issues);

	if let Some(id) = id.as_deref()
		&& id.trim().is_empty()
	{
		issues.push(format!("{prefix}.feature_id is empty"));
	}

	let name = required(&prefix, "feature_name", record.feature_name, issues);
	let category = required(&prefix, "category", record.category, issues);
	let (short_description, detailed_description) = match record.description {
		Some(description) => (
			required(&prefix, "description.short", description.short, issues),
			required(&prefix, "description.detailed", description.detailed, issues),
		),
		None => {
			issues.push(format!("{prefix}.description is missing"));

			(None, None)
		},
	};
	let implementation = match record.implementation {
		Some(implementation) => {
			let complexity =
				required(&prefix, "implementation.complexity", implementation.complexity, issues);
			let setup_time =
				required(&prefix, "implementation.setup_time", implementation.setup_time, issues);

			complexity.zip(setup_time).map(|(complexity, setup_time)| Implementation {
				complexity,
				setup_time,
				estimated_cost: implementation
					.estimated_cost
					.filter(|cost| !cost.trim().is_empty()),
				resources_needed: implementation.resources_needed,
				prerequisites: implementation.prerequisites,
			})
		},
		None => {
			issues.push(format!("{prefix}.implementation is missing"));

			None
		},
	};
	let mut capabilities = Vec::with_capacity(record.capabilities.len());

	for (cap_idx, capability) in record.capabilities.into_iter().enumerate() {
		let label = format!("capabilities[{cap_idx}].capability_name");

		if let Some(name) = required(&prefix, &label, capability.capability_name, issues) {
			capabilities.push(Capability {
				name,
				description: capability.description,
				use_cases: capability.use_cases,
			});
		}
	}

	let mut pain_points = Vec::with_capacity(record.pain_points_addressed.len());

	for (pp_idx, pain_point) in record.pain_points_addressed.into_iter().enumerate() {
		let label = format!("pain_points_addressed[{pp_idx}]");
		let category =
			required(&prefix, &format!("{label}.pain_category"), pain_point.pain_category, issues);
		let severity_levels = parse_list::<UrgencyLevel>(
			&format!("{prefix}.{label}.severity_levels"),
			&pain_point.severity_levels,
			issues,
		);

		if let Some(category) = category {
			pain_points.push(PainCategory {
				category,
				keywords: pain_point
					.keywords
					.into_iter()
					.map(|keyword| keyword.trim().to_string())
					.filter(|keyword| !keyword.is_empty())
					.collect(),
				severity_levels,
				business_contexts: pain_point.business_contexts,
			});
		}
	}

	let mut success_stories = Vec::with_capacity(record.success_stories.len());

	for (story_idx, story) in record.success_stories.into_iter().enumerate() {
		let label = format!("success_stories[{story_idx}]");
		let challenge = required(&prefix, &format!("{label}.challenge"), story.challenge, issues);
		let results = required(&prefix, &format!("{label}.results"), story.results, issues);
		let company_size = parse_list::<CompanySize>(
			&format!("{prefix}.{label}.company_size"),
			story.company_size.as_slice(),
			issues,
		);

		if let (Some(challenge), Some(results)) = (challenge, results) {
			success_stories.push(SuccessStory {
				industry: story.industry.filter(|industry| !industry.trim().is_empty()),
				company_size: company_size.into_iter().next(),
				challenge,
				solution: story.solution,
				results,
			});
		}
	}

	let industry_fit =
		parse_list::<Industry>(&format!("{prefix}.industry_fit"), &record.industry_fit, issues);
	let company_size_fit = parse_list::<CompanySize>(
		&format!("{prefix}.company_size_fit"),
		&record.company_size_fit,
		issues,
	);

	if issues.len() > start {
		return None;
	}

	Some(SolutionEntry {
		id: id?.trim().to_string(),
		name: name?,
		category: category?,
		subcategory: record.subcategory,
		short_description: short_description?,
		detailed_description: detailed_description?,
		capabilities,
		benefits: record.benefits,
		pain_points,
		implementation: implementation?,
		industry_fit,
		company_size_fit,
		related_features: record.related_features,
		success_stories,
		pricing_tier: record.pricing_tier,
	})
}

fn required(
	prefix: &str,
	field: &str,
	value: Option<String>,
	issues: &mut Vec<String>,
) -> Option<String> {
	if value.is_none() {
		issues.push(format!("{prefix}.{field} is missing"));
	}

	value
}

fn parse_list<T>(path: &str, raw: &[String], issues: &mut Vec<String>) -> Vec<T>
where
	T: FromStr + PartialEq,
{
	let mut out = Vec::with_capacity(raw.len());

	for value in raw {
		match value.parse::<T>() {
			Ok(parsed) =>
				if !out.contains(&parsed) {
					out.push(parsed);
				},
			Err(_) => issues.push(format!("{path} contains unknown value {value:?}")),
		}
	}

	out
}
