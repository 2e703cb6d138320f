//! Data model for pain-point matching: closed vocabularies, the analysis query, and the
//! read-only knowledge-base snapshot.

pub mod knowledge_base;
pub mod query;
pub mod vocab;

mod error;

pub use error::{Error, Result};
pub use knowledge_base::{
	Benefits, Capability, CapabilityRecord, Corpus, DescriptionRecord, ExcludedEntry,
	Implementation, ImplementationRecord, KnowledgeBaseDocument, PainCategory, PainPointRecord,
	SolutionEntry, SolutionRecord, SuccessStory, SuccessStoryRecord,
};
pub use query::{
	ContextInput, CurrentImpact, ImpactMetrics, PainPointQuery, Preferences, PreferencesInput,
	QueryContext, QueryInput,
};
pub use vocab::{
	CompanySize, ComplexityLevel, CostLevel, Industry, Timeline, UnknownValue, UrgencyLevel,
};
