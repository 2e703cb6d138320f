//! Rule-based advice that accompanies a ranked result set. None of it feeds back into ranking.

use serde::Serialize;

use remedy_domain::{CompanySize, ComplexityLevel, PainPointQuery, SolutionEntry, UrgencyLevel};

const MAX_CHALLENGES: usize = 4;
const MAX_ALTERNATIVES: usize = 2;
const MAX_ACTIONS: usize = 4;
const MAX_DEMOS: usize = 2;
const MAX_STEPS: usize = 5;
const MAX_METRICS: usize = 5;

/// Description cues and the challenge each one signals.
const CHALLENGE_CUES: &[(&[&str], &str)] = &[
	(
		&["difficulty", "struggle", "hard", "challenging"],
		"Difficulty implementing current processes",
	),
	(
		&["no idea", "unclear", "lack of visibility", "unknown"],
		"Lack of visibility and necessary information",
	),
	(&["overload", "overwhelm", "too much", "burden"], "Work and resource overload"),
	(&["slow", "delay", "late", "sluggish"], "Slow processing and response times"),
	(&["manual", "time-consuming", "labor intensive"], "Time-consuming manual processes"),
	(&["inconsistent", "variation", "different"], "Lack of consistency in processes"),
	(&["low rate", "poor performance", "inefficient"], "Low performance and success rates"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlternativeApproach {
	pub approach_name: &'static str,
	pub description: &'static str,
	pub pros: &'static [&'static str],
	pub cons: &'static [&'static str],
}

const PROCESS_IMPROVEMENT: AlternativeApproach = AlternativeApproach {
	approach_name: "Improve Internal Processes",
	description: "Optimize current processes through training and process redesign",
	pros: &["Lower cost", "Use existing resources", "Full control over processes"],
	cons: &[
		"Takes long time to see results",
		"Depends on team discipline",
		"Difficult to scale as business grows",
	],
};
const THIRD_PARTY_TOOLS: AlternativeApproach = AlternativeApproach {
	approach_name: "Use Third-Party Tools",
	description: "Integrate specialized tools from different vendors",
	pros: &[
		"Many options available in market",
		"Can find specialized tools",
		"Flexible to change",
	],
	cons: &[
		"Difficult integration between tools",
		"Data silos and fragmentation",
		"High integration costs",
	],
};
const IN_HOUSE_BUILD: AlternativeApproach = AlternativeApproach {
	approach_name: "Develop In-House Solution",
	description: "Build custom system with internal development team",
	pros: &[
		"Complete customization",
		"Full ownership of source code",
		"Can adapt to business changes",
	],
	cons: &[
		"High development cost and time",
		"Need specialized technical team",
		"Long-term maintenance and support",
	],
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NextSteps {
	pub immediate_actions: Vec<String>,
	pub consultation_needed: bool,
	pub demo_requests: Vec<String>,
}

pub fn key_challenges(query: &PainPointQuery) -> Vec<String> {
	let description = query.description.to_lowercase();
	let mut challenges: Vec<String> = CHALLENGE_CUES
		.iter()
		.filter(|(cues, _)| cues.iter().any(|cue| description.contains(cue)))
		.map(|(_, challenge)| challenge.to_string())
		.collect();

	if has_area(query, "customer_service") {
		challenges.push("Need to improve customer service quality".to_string());
	}
	if has_area(query, "marketing") {
		challenges.push("Need to optimize marketing effectiveness".to_string());
	}
	if challenges.is_empty() {
		challenges = vec![
			"Need to improve efficiency of current processes".to_string(),
			"Lack of automation and intelligence in workflow".to_string(),
		];
	}

	challenges.truncate(MAX_CHALLENGES);

	challenges
}

/// Impact statement from urgency, reach, reported metrics and company size.
pub fn assess_impact(query: &PainPointQuery) -> String {
	let mut factors = Vec::new();

	if let Some(urgency) = query.context.urgency_level {
		factors.push(match urgency {
			UrgencyLevel::Critical => "Critical impact, needs resolution before anything else",
			UrgencyLevel::High => "Serious impact, needs immediate resolution",
			UrgencyLevel::Medium => "Significant impact, needs to be addressed soon",
			UrgencyLevel::Low => "Limited impact, can be planned for long-term",
		});
	}

	if query.affected_areas.len() > 2 {
		factors.push("Multi-area impact, needs comprehensive solution");
	} else if has_area(query, "customer_service") {
		factors.push("Directly affects customer experience");
	}

	if let Some(impact) = &query.current_impact {
		let metrics = &impact.metrics;

		if mentions(metrics.customer_satisfaction.as_deref(), &["low"]) {
			factors.push("Customer satisfaction is being negatively affected");
		}
		if mentions(metrics.response_time.as_deref(), &["slow", "high"]) {
			factors.push("Current response time does not meet requirements");
		}
	}

	if matches!(query.context.company_size, Some(CompanySize::Large | CompanySize::Enterprise)) {
		factors.push("At large scale, impact may affect many customers");
	}

	if factors.is_empty() {
		return "This issue is affecting operational efficiency and needs to be resolved"
			.to_string();
	}

	factors.join(". ")
}

pub fn alternative_approaches(
	query: &PainPointQuery,
	solution_count: usize,
) -> Vec<AlternativeApproach> {
	let description = query.description.to_lowercase();
	let mut approaches = Vec::new();

	if description.contains("manual") || description.contains("process") {
		approaches.push(PROCESS_IMPROVEMENT);
	}
	if solution_count > 0 {
		approaches.push(THIRD_PARTY_TOOLS);
	}
	if matches!(query.context.company_size, Some(CompanySize::Large | CompanySize::Enterprise)) {
		approaches.push(IN_HOUSE_BUILD);
	}

	approaches.truncate(MAX_ALTERNATIVES);

	approaches
}

/// `picks` are the returned solutions in rank order with their confidence.
pub fn next_steps(query: &PainPointQuery, picks: &[(&SolutionEntry, f32)]) -> NextSteps {
	let mut actions = vec![
		"Detailed evaluation of recommended solutions".to_string(),
		"Determine budget and timeline for project".to_string(),
		"Identify key stakeholders to participate in decision making".to_string(),
	];

	if matches!(query.context.urgency_level, Some(UrgencyLevel::High | UrgencyLevel::Critical)) {
		actions.insert(0, "Organize urgent meeting with leadership team".to_string());
	}
	if query.current_tools.is_empty() {
		actions.push("Audit current tools and systems".to_string());
	}
	if let Some((top, confidence)) = picks.first() {
		actions.push(format!("Learn more about {} (confidence {confidence:.2})", top.name));
	}

	actions.truncate(MAX_ACTIONS);

	NextSteps {
		immediate_actions: actions,
		consultation_needed: needs_consultation(picks),
		demo_requests: picks
			.iter()
			.take(MAX_DEMOS)
			.map(|(entry, _)| format!("Demo {}", entry.name))
			.collect(),
	}
}

pub fn how_it_helps(entry: &SolutionEntry, query: &PainPointQuery) -> String {
	let description = query.description.to_lowercase();
	let has = |cues: &[&str]| cues.iter().any(|cue| description.contains(cue));
	let name = &entry.name;

	if has(&["feedback", "survey"]) {
		format!(
			"{name} helps automate the feedback collection process across multiple channels, \
			 increasing response rates and improving data quality."
		)
	} else if has(&["support", "agent"]) {
		format!(
			"{name} reduces workload for human agents by automatically handling simple queries \
			 and routing complex ones to the right person."
		)
	} else if has(&["analysis", "analytics"]) {
		format!(
			"{name} automates the data analysis process, helping extract insights quickly and \
			 accurately."
		)
	} else if has(&["journey", "experience"]) {
		format!(
			"{name} provides complete visibility into customer journeys, helping identify \
			 friction points and optimize experiences."
		)
	} else {
		format!("{name}: {}", entry.short_description)
	}
}

pub fn implementation_steps(entry: &SolutionEntry) -> Vec<String> {
	let name = entry.name.to_lowercase();
	let mut steps = vec![
		"Analyze current requirements and define specific objectives".to_string(),
		format!("Set up {} with matching configuration", entry.name),
		"Integrate with existing systems (CRM, database, etc.)".to_string(),
		"Train team on how to use the new feature".to_string(),
		"Pilot test with small customer group".to_string(),
		"Monitor results and optimize configuration".to_string(),
		"Deploy full-scale and track metrics".to_string(),
	];
	let preparation = if name.contains("survey") {
		Some("Design survey templates and matching questions")
	} else if has_word(&name, "ai") {
		Some("Train AI model with company data")
	} else if name.contains("analysis") {
		Some("Prepare and clean data sources")
	} else {
		None
	};

	if let Some(preparation) = preparation {
		steps.insert(2, preparation.to_string());
	}

	steps.truncate(MAX_STEPS);

	steps
}

pub fn success_metrics(entry: &SolutionEntry) -> Vec<String> {
	let name = entry.name.to_lowercase();
	let mut metrics = vec![
		"Customer Satisfaction Score (CSAT)",
		"Implementation Timeline Adherence",
		"User Adoption Rate",
	];

	if name.contains("survey") {
		metrics.extend(["Survey Response Rate", "Data Quality Score"]);
	} else if has_word(&name, "ai") || name.contains("automation") {
		metrics.extend(["Automation Rate", "Response Time Improvement"]);
	} else if name.contains("analysis") {
		metrics.extend(["Insight Discovery Rate", "Analysis Time Reduction"]);
	} else if name.contains("engagement") {
		metrics.extend(["Engagement Rate", "Conversion Rate"]);
	}

	metrics.truncate(MAX_METRICS);

	metrics.into_iter().map(str::to_string).collect()
}

/// The first success story as `challenge -> results`.
pub fn case_studies(entry: &SolutionEntry) -> Vec<String> {
	entry
		.success_stories
		.iter()
		.take(1)
		.map(|story| format!("{} -> {}", story.challenge, story.results))
		.collect()
}

/// True when nothing was returned or the mean complexity sits above low.
fn needs_consultation(picks: &[(&SolutionEntry, f32)]) -> bool {
	if picks.is_empty() {
		return true;
	}

	let total: usize = picks
		.iter()
		.map(|(entry, _)| {
			entry
				.implementation
				.complexity
				.parse::<ComplexityLevel>()
				.unwrap_or(ComplexityLevel::Medium)
				.ordinal() + 1
		})
		.sum();

	total as f32 / picks.len() as f32 > 1.5
}

fn has_area(query: &PainPointQuery, area: &str) -> bool {
	query.affected_areas.iter().any(|candidate| {
		candidate.trim().to_lowercase().replace([' ', '-'], "_") == area
	})
}

fn has_word(text: &str, word: &str) -> bool {
	text.split(|ch: char| !ch.is_alphanumeric()).any(|part| part == word)
}

fn mentions(value: Option<&str>, cues: &[&str]) -> bool {
	value
		.map(|value| {
			let value = value.to_lowercase();

			cues.iter().any(|cue| value.contains(cue))
		})
		.unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use remedy_domain::{Corpus, CurrentImpact, ImpactMetrics, QueryContext};

	use super::*;

	fn corpus() -> Corpus {
		Corpus::from_json_str(
			r#"{ "features": [
				{
					"feature_id": "bot", "feature_name": "AI Chatbot", "category": "Service",
					"description": { "short": "Answers FAQs.", "detailed": "Bot." },
					"implementation": { "complexity": "high", "setup_time": "1-3 months" },
					"success_stories": [
						{ "challenge": "Long queues", "results": "Half the queue gone" },
						{ "challenge": "Night shifts", "results": "Covered 24/7" }
					]
				},
				{
					"feature_id": "mail", "feature_name": "Email Campaigns", "category": "Marketing",
					"description": { "short": "Sends newsletters.", "detailed": "Mail." },
					"implementation": { "complexity": "low", "setup_time": "1 week" }
				}
			] }"#,
		)
		.unwrap()
	}

	fn context(urgency: Option<UrgencyLevel>, size: Option<CompanySize>) -> QueryContext {
		QueryContext { urgency_level: urgency, company_size: size, ..QueryContext::default() }
	}

	#[test]
	fn challenges_follow_cues_then_areas_and_cap_at_four() {
		let query = PainPointQuery::new("Manual tagging is slow and inconsistent, too much work")
			.with_affected_areas(["Customer Service", "marketing"]);

		assert_eq!(
			key_challenges(&query),
			vec![
				"Work and resource overload",
				"Slow processing and response times",
				"Time-consuming manual processes",
				"Lack of consistency in processes",
			]
		);
	}

	#[test]
	fn challenges_fall_back_when_nothing_matches() {
		assert_eq!(
			key_challenges(&PainPointQuery::new("Churn is rising")),
			vec![
				"Need to improve efficiency of current processes",
				"Lack of automation and intelligence in workflow",
			]
		);
	}

	#[test]
	fn impact_combines_urgency_reach_metrics_and_scale() {
		let query = PainPointQuery::new("Replies take days")
			.with_context(context(Some(UrgencyLevel::High), Some(CompanySize::Enterprise)))
			.with_affected_areas(["customer_service"])
			.with_current_impact(CurrentImpact {
				description: "Backlog".to_string(),
				metrics: ImpactMetrics {
					customer_satisfaction: Some("Low, 3.1/5".to_string()),
					response_time: Some("48h".to_string()),
					..ImpactMetrics::default()
				},
			});

		assert_eq!(
			assess_impact(&query),
			"Serious impact, needs immediate resolution. Directly affects customer experience. \
			 Customer satisfaction is being negatively affected. At large scale, impact may \
			 affect many customers"
		);
		assert_eq!(
			assess_impact(&PainPointQuery::new("x")),
			"This issue is affecting operational efficiency and needs to be resolved"
		);
	}

	#[test]
	fn alternatives_are_capped_at_two() {
		let query = PainPointQuery::new("Manual process for refunds")
			.with_context(context(None, Some(CompanySize::Large)));
		let names: Vec<_> =
			alternative_approaches(&query, 3).iter().map(|alt| alt.approach_name).collect();

		assert_eq!(names, vec!["Improve Internal Processes", "Use Third-Party Tools"]);
		assert!(alternative_approaches(&PainPointQuery::new("Churn"), 0).is_empty());
	}

	#[test]
	fn next_steps_prioritize_urgency_and_request_demos() {
		let corpus = corpus();
		let picks = [(&corpus.all()[0], 0.82), (&corpus.all()[1], 0.4)];
		let urgent = PainPointQuery::new("Queues everywhere")
			.with_context(context(Some(UrgencyLevel::Critical), None));
		let steps = next_steps(&urgent, &picks);

		assert_eq!(steps.immediate_actions.len(), 4);
		assert_eq!(steps.immediate_actions[0], "Organize urgent meeting with leadership team");
		assert!(steps.consultation_needed);
		assert_eq!(steps.demo_requests, vec!["Demo AI Chatbot", "Demo Email Campaigns"]);

		let calm = PainPointQuery::new("Queues").with_current_tools(["Zendesk"]);
		let steps = next_steps(&calm, &picks[1..]);

		assert_eq!(
			steps.immediate_actions[3],
			"Learn more about Email Campaigns (confidence 0.40)"
		);
		assert!(!steps.consultation_needed);
		assert!(next_steps(&calm, &[]).consultation_needed);
	}

	#[test]
	fn solution_notes_depend_on_the_feature_name() {
		let corpus = corpus();
		let bot = &corpus.all()[0];
		let mail = &corpus.all()[1];

		assert_eq!(implementation_steps(bot)[2], "Train AI model with company data");
		assert_eq!(implementation_steps(bot).len(), 5);
		assert_eq!(
			implementation_steps(mail)[2],
			"Integrate with existing systems (CRM, database, etc.)"
		);
		assert!(success_metrics(bot).contains(&"Automation Rate".to_string()));
		assert_eq!(success_metrics(mail).len(), 3);
		assert_eq!(case_studies(bot), vec!["Long queues -> Half the queue gone"]);
		assert!(case_studies(mail).is_empty());
		assert_eq!(
			how_it_helps(mail, &PainPointQuery::new("Churn")),
			"Email Campaigns: Sends newsletters."
		);
		assert!(
			how_it_helps(bot, &PainPointQuery::new("Agents are swamped")).contains("human agents")
		);
	}
}
