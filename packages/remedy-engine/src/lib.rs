//! Pain-point matching: text normalization, TF-IDF similarity, context and feasibility fit,
//! weighted aggregation and ranking over a swappable corpus snapshot.

pub mod context;
pub mod engine;
pub mod feasibility;
pub mod ranking;
pub mod scoring;
pub mod similarity;
pub mod text;

mod error;

pub use engine::{CandidateExclusion, MatchReport, MatchingEngine, load_corpus, parse_query};
pub use error::{Error, Result};
pub use ranking::{RankedResult, ScoreBreakdown, Weights};
pub use scoring::{CandidateView, QueryView, ScoreOutcome, Scorer, Scorers};
pub use text::NormalizedText;
