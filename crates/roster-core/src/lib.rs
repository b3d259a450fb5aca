//! # Roster Core
//!
//! In-memory staff retrieval and ranking engine. Answers free-text questions
//! about a small corpus of staff records without any external index:
//!
//! - **Layered Lexical Scoring**: exact keyword match (1.0) → partial match
//!   (0.8) → bag-of-words cosine over chunk sentences → additive
//!   conversational heuristic; a record's final score is the max across layers
//! - **Keyword Intent Classification**: four query categories decided by
//!   ordered keyword tiers with fixed priority
//! - **Corpus Analytics**: department/skill distributions, experience
//!   statistics, counting-question detection, top-performer ranking
//! - **Orchestration Facade**: one `RwLock`-guarded corpus per [`Engine`];
//!   each query yields ranked results, an aggregation answer, or an
//!   escalation request for an external text generator
//! - **Bounded Generation**: the generator boundary is a trait; calls are
//!   timeout-bounded and every failure degrades to a fixed fallback message
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster_core::{Engine, PersonRecord};
//!
//! let engine = Engine::new();
//! engine.initialize(records)?;
//!
//! let outcome = engine.search("who knows Python?")?;
//! if !outcome.should_escalate {
//!     println!("{}", roster_core::format_results(&outcome.results, outcome.aggregation.as_ref()));
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
// Only warn about missing docs for public items exported from the crate root
// Internal struct fields and enum variants don't need documentation
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod chunk;
pub mod classify;
pub mod engine;
pub mod generation;
pub mod record;
pub mod search;
pub mod stats;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Corpus types
pub use record::{PersonRecord, DEFAULT_DEPARTMENT, DEFAULT_NAME};

// Chunking
pub use chunk::{chunk_records, Chunk, ChunkKind};

// Classification
pub use classify::{
    classify, has_conversational_terms, ClassificationRule, QueryKind, ANALYTICAL_TERMS,
    CLASSIFICATION_RULES, CONVERSATIONAL_TERMS, EXACT_SEARCH_TERMS, GENERAL_TERMS,
};

// Retrieval and scoring
pub use search::{
    cosine_similarity, explanation_for, term_frequencies, text_similarity, tokenize, MatchKind,
    RetrievalScorer, ScoringConfig, SearchResult, DEFAULT_MAX_RESULTS,
    DEFAULT_MIN_CHUNK_SIMILARITY, EXACT_MATCH_SCORE, PARTIAL_MATCH_SCORE,
};

// Analytics
pub use stats::{
    analyze_departments, analyze_experience, analyze_skills, corpus_statistics,
    detect_aggregation, find_top_performers, AggregationResult, AggregationValue,
    CorpusStatistics, ExperienceStats, GroupCount,
};

// Orchestration facade
pub use engine::{
    format_results, Engine, EngineError, QueryOutcome, Result, EMPTY_QUERY_MESSAGE,
    NO_DATA_MESSAGE, NO_RESULTS_MESSAGE,
};

// Generation boundary
pub use generation::{
    build_prompt, generate_or_fallback, generate_with_timeout, summarize_corpus, GenerationError,
    TextGenerator, GENERATION_FALLBACK_MESSAGE, GENERATION_TIMEOUT_SECS,
};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        format_results, AggregationResult, AggregationValue, Chunk, Engine, EngineError,
        GenerationError, MatchKind, PersonRecord, QueryKind, QueryOutcome, Result,
        RetrievalScorer, ScoringConfig, SearchResult, TextGenerator,
    };
}
