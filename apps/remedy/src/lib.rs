use std::{
	fs,
	path::{Path, PathBuf},
	sync::Arc,
};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::WrapErr;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use remedy_config::Config;
use remedy_domain::{Corpus, PainPointQuery, QueryInput};
use remedy_engine::MatchingEngine;

use crate::report::{AnalysisReport, FeatureList, Markdown};

pub mod guidance;
pub mod report;

#[derive(Debug, Parser)]
#[command(
	version = remedy_cli::VERSION,
	rename_all = "kebab",
	styles = remedy_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'k', value_name = "FILE", visible_alias = "kb")]
	pub knowledge_base: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Rank knowledge-base solutions for a pain point read from a JSON file.
	Analyze {
		#[arg(long, short = 'i', value_name = "FILE")]
		input: PathBuf,
		#[arg(long, short = 'm', value_name = "N")]
		max_results: Option<u32>,
		#[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json)]
		format: OutputFormat,
		#[arg(long, short = 'o', value_name = "FILE")]
		output: Option<PathBuf>,
	},
	/// List every solution in the knowledge base.
	Features,
	/// Print one solution as JSON.
	Feature { id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	Json,
	Markdown,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = remedy_config::load(&args.config)?;
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(config.service.log_level.clone()));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let rendered = execute(&args, config)?;

	if let Command::Analyze { output: Some(path), .. } = &args.command {
		fs::write(path, &rendered)
			.wrap_err_with(|| format!("Failed to write report to {}.", path.display()))?;

		tracing::info!(path = %path.display(), "Report written.");

		return Ok(());
	}

	println!("{rendered}");

	Ok(())
}

/// Runs one command against an already loaded config and returns the rendered output.
pub fn execute(args: &Args, mut config: Config) -> color_eyre::Result<String> {
	let corpus = Arc::new(load_corpus(&args.knowledge_base)?);

	match &args.command {
		Command::Analyze { input, max_results, format, .. } => {
			if let Some(max_results) = max_results {
				config.ranking.max_results = *max_results;
			}

			let query = load_query(input)?;
			let engine = MatchingEngine::new(config, corpus.clone())?;
			let report = engine.analyze(&query)?;
			let analysis = AnalysisReport::new(&query, &corpus, report);

			match format {
				OutputFormat::Json => Ok(serde_json::to_string_pretty(&analysis)?),
				OutputFormat::Markdown => Ok(Markdown(&analysis).to_string()),
			}
		},
		Command::Features => Ok(FeatureList(&corpus).to_string()),
		Command::Feature { id } => {
			let engine = MatchingEngine::new(config, corpus)?;

			Ok(serde_json::to_string_pretty(&engine.solution(id)?)?)
		},
	}
}

fn load_corpus(path: &Path) -> color_eyre::Result<Corpus> {
	let raw = fs::read_to_string(path)
		.wrap_err_with(|| format!("Failed to read knowledge base at {}.", path.display()))?;

	Ok(remedy_engine::load_corpus(&raw)?)
}

fn load_query(path: &Path) -> color_eyre::Result<PainPointQuery> {
	let raw = fs::read_to_string(path)
		.wrap_err_with(|| format!("Failed to read query at {}.", path.display()))?;
	let value: Value = serde_json::from_str(&raw)
		.wrap_err_with(|| format!("Failed to parse query at {}.", path.display()))?;
	// Query files may wrap the query in a `pain_point` object.
	let value = match value {
		Value::Object(mut map) => match map.remove("pain_point") {
			Some(inner) => inner,
			None => Value::Object(map),
		},
		other => other,
	};
	let input: QueryInput = serde_json::from_value(value)
		.wrap_err_with(|| format!("Query at {} is not a valid pain point.", path.display()))?;

	Ok(remedy_engine::parse_query(input)?)
}
