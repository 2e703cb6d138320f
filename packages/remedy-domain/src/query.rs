use std::{collections::HashSet, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
	Error, Result,
	vocab::{
		CompanySize, ComplexityLevel, CostLevel, Industry, Timeline, UnknownValue, UrgencyLevel,
	},
};

/// Request shape as received from the caller. Enum fields stay raw until [`PainPointQuery::parse`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct QueryInput {
	pub description: String,
	#[serde(default)]
	pub affected_areas: Vec<String>,
	#[serde(default)]
	pub context: ContextInput,
	#[serde(default)]
	pub preferences: PreferencesInput,
	pub current_impact: Option<CurrentImpact>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ContextInput {
	pub industry: Option<String>,
	pub company_size: Option<String>,
	pub urgency_level: Option<String>,
	#[serde(default)]
	pub current_tools: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PreferencesInput {
	pub timeline: Option<String>,
	pub budget_range: Option<String>,
	pub technical_complexity: Option<String>,
}

/// How the problem shows today. Free text; only read when describing impact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrentImpact {
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub metrics: ImpactMetrics,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImpactMetrics {
	pub customer_satisfaction: Option<String>,
	pub response_time: Option<String>,
	pub volume: Option<String>,
	pub cost: Option<String>,
	pub efficiency: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PainPointQuery {
	pub description: String,
	pub affected_areas: Vec<String>,
	pub context: QueryContext,
	pub preferences: Preferences,
	/// Tools already in place, as named by the caller.
	pub current_tools: Vec<String>,
	pub current_impact: Option<CurrentImpact>,
}
impl PainPointQuery {
	pub fn new(description: impl Into<String>) -> Self {
		Self {
			description: description.into(),
			affected_areas: Vec::new(),
			context: QueryContext::default(),
			preferences: Preferences::default(),
			current_tools: Vec::new(),
			current_impact: None,
		}
	}

	pub fn parse(input: QueryInput) -> Result<Self> {
		let context = QueryContext {
			industry: parse_field("context.industry", input.context.industry.as_deref())?,
			company_size: parse_field(
				"context.company_size",
				input.context.company_size.as_deref(),
			)?,
			urgency_level: parse_field(
				"context.urgency_level",
				input.context.urgency_level.as_deref(),
			)?,
		};
		let preferences = Preferences {
			timeline: parse_field("preferences.timeline", input.preferences.timeline.as_deref())?,
			budget_range: parse_field(
				"preferences.budget_range",
				input.preferences.budget_range.as_deref(),
			)?,
			technical_complexity: parse_field(
				"preferences.technical_complexity",
				input.preferences.technical_complexity.as_deref(),
			)?,
		};

		Ok(Self {
			description: input.description,
			affected_areas: dedup_labels(input.affected_areas),
			context,
			preferences,
			current_tools: dedup_labels(input.context.current_tools),
			current_impact: input.current_impact,
		})
	}

	pub fn with_context(mut self, context: QueryContext) -> Self {
		self.context = context;

		self
	}

	pub fn with_preferences(mut self, preferences: Preferences) -> Self {
		self.preferences = preferences;

		self
	}

	pub fn with_affected_areas<I, S>(mut self, areas: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.affected_areas = dedup_labels(areas.into_iter().map(Into::into).collect());

		self
	}

	pub fn with_current_tools<I, S>(mut self, tools: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.current_tools = dedup_labels(tools.into_iter().map(Into::into).collect());

		self
	}

	pub fn with_current_impact(mut self, impact: CurrentImpact) -> Self {
		self.current_impact = Some(impact);

		self
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueryContext {
	pub industry: Option<Industry>,
	pub company_size: Option<CompanySize>,
	pub urgency_level: Option<UrgencyLevel>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Preferences {
	pub timeline: Option<Timeline>,
	pub budget_range: Option<CostLevel>,
	pub technical_complexity: Option<ComplexityLevel>,
}
impl Preferences {
	pub fn is_empty(&self) -> bool {
		self.timeline.is_none()
			&& self.budget_range.is_none()
			&& self.technical_complexity.is_none()
	}
}

fn parse_field<T>(field: &str, raw: Option<&str>) -> Result<Option<T>>
where
	T: FromStr<Err = UnknownValue>,
{
	let Some(raw) = raw else { return Ok(None) };

	if raw.trim().is_empty() {
		return Ok(None);
	}

	raw.parse::<T>().map(Some).map_err(|err| Error::InvalidContextValue {
		field: field.to_string(),
		value: err.value,
		allowed: err.allowed,
	})
}

fn dedup_labels(labels: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for label in labels {
		let trimmed = label.trim();

		if trimmed.is_empty() {
			continue;
		}
		if seen.insert(trimmed.to_lowercase()) {
			out.push(trimmed.to_string());
		}
	}

	out
}
