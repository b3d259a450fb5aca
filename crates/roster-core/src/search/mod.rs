//! Search Module
//!
//! Lexical retrieval over the in-memory corpus:
//! - Bag-of-words cosine similarity over chunk sentences (no embeddings)
//! - Layered scoring: exact → partial → cosine → conversational heuristic

mod cosine;
mod scorer;

pub use cosine::{cosine_similarity, term_frequencies, text_similarity, tokenize};
pub use scorer::{
    explanation_for, MatchKind, RetrievalScorer, ScoringConfig, SearchResult,
    DEFAULT_MAX_RESULTS, DEFAULT_MIN_CHUNK_SIMILARITY, EXACT_MATCH_SCORE, PARTIAL_MATCH_SCORE,
};
