//! Layered Retrieval Scoring
//!
//! Relevance for a record is the MAXIMUM of four layers, evaluated in order:
//!
//! 1. Exact match - the query names the record's department, a skill, a
//!    qualification, or the person → 1.0
//! 2. Partial match - substring containment in either direction between the
//!    query and department/skills/qualifications → 0.8
//! 3. Cosine - best bag-of-words similarity across the record's chunks,
//!    counted only above a noise floor
//! 4. Conversational heuristic - additive seniority/versatility/certification
//!    increments, applied only when the query carries conversational terms
//!
//! The increments in layer 4 are hand-tuned values carried in
//! [`ScoringConfig`] so callers can override them per engine instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chunk::Chunk;
use crate::classify::has_conversational_terms;
use crate::record::PersonRecord;
use crate::search::cosine::{cosine_similarity, term_frequencies, tokenize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score assigned by a layer-1 exact match
pub const EXACT_MATCH_SCORE: f64 = 1.0;

/// Score assigned by a layer-2 partial match
pub const PARTIAL_MATCH_SCORE: f64 = 0.8;

/// Default noise floor below which a chunk similarity is ignored
pub const DEFAULT_MIN_CHUNK_SIMILARITY: f64 = 0.05;

/// Default maximum number of results returned by a search
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Seniority vocabulary for the conversational heuristic
const SENIOR_TERMS: &[&str] = &["senior", "veteran", "experienced", "lead"];

/// Junior-role vocabulary for the conversational heuristic
const JUNIOR_TERMS: &[&str] = &["junior", "newcomer", "new hire", "entry-level"];

/// Multi-skill vocabulary for the conversational heuristic
const MULTI_SKILL_TERMS: &[&str] = &["versatile", "multi-skilled", "generalist", "all-rounder"];

/// Certification vocabulary for the conversational heuristic
const CERTIFICATION_TERMS: &[&str] = &["certified", "certification", "qualification", "licensed"];

// ============================================================================
// TYPES
// ============================================================================

/// How a result was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// Direct containment of a key field, score 1.0
    Exact,
    /// Strong lexical similarity (score above 0.6)
    Similar,
    /// Weaker, category-level relevance
    Category,
}

/// One ranked search hit (ephemeral, per query)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The matched record
    pub record: PersonRecord,
    /// Relevance score; nominally [0, 1], the conversational heuristic may
    /// exceed 1.0 and is treated as capped for ranking purposes only
    pub score: f64,
    /// Qualitative relevance label derived from the score
    pub explanation: String,
    /// How the result was matched
    pub match_kind: MatchKind,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Tunable scoring knobs
///
/// The conversational increments are hand-tuned constants inherited from
/// operational experience, not derived quantities. They are deliberately
/// overridable rather than baked in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Seniority bonus when years of experience >= 5
    pub senior_strong_bonus: f64,
    /// Seniority bonus when years of experience >= 3
    pub senior_weak_bonus: f64,
    /// Junior-fit bonus when years of experience <= 2
    pub junior_strong_bonus: f64,
    /// Junior-fit bonus when years of experience <= 3
    pub junior_weak_bonus: f64,
    /// Bonus when the record lists 3 or more skills
    pub multi_skill_bonus: f64,
    /// Bonus when the record holds any qualification
    pub certification_bonus: f64,
    /// Bonus when the query mentions the record's department
    pub department_affinity_bonus: f64,
    /// Chunk similarities at or below this floor are ignored
    pub min_chunk_similarity: f64,
    /// Hard cap on the number of results returned
    pub max_results: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            senior_strong_bonus: 0.3,
            senior_weak_bonus: 0.2,
            junior_strong_bonus: 0.3,
            junior_weak_bonus: 0.2,
            multi_skill_bonus: 0.2,
            certification_bonus: 0.2,
            department_affinity_bonus: 0.3,
            min_chunk_similarity: DEFAULT_MIN_CHUNK_SIMILARITY,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

// ============================================================================
// SCORER
// ============================================================================

/// Computes per-record relevance and ranked result lists
#[derive(Debug, Clone, Default)]
pub struct RetrievalScorer {
    config: ScoringConfig,
}

impl RetrievalScorer {
    /// Create a scorer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom configuration
    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a single record against a query
    ///
    /// `chunks` must be the chunks derived from this record; chunks of other
    /// records are filtered out defensively by id.
    pub fn score_record(
        &self,
        query: &str,
        record: &PersonRecord,
        chunks: &[&Chunk],
    ) -> (f64, String, MatchKind) {
        let query_lower = query.to_lowercase();

        let mut score = self.exact_match_score(&query_lower, record);

        if score == 0.0 {
            score = self.partial_match_score(&query_lower, record);
        }

        let cosine = self.cosine_score(&query_lower, record, chunks);
        score = score.max(cosine);

        if has_conversational_terms(query) {
            score = score.max(self.conversational_score(&query_lower, record));
        }

        let match_kind = self.match_kind(score, &query_lower, record);
        (score, explanation_for(score).to_string(), match_kind)
    }

    /// Rank all records against a query
    ///
    /// Results are sorted longest-first by score and truncated to
    /// `config.max_results`. A blank query yields an empty list rather than
    /// an error. A record whose score comes out non-finite is logged and
    /// skipped; one bad record never aborts the whole search.
    pub fn search(
        &self,
        query: &str,
        records: &[PersonRecord],
        chunks: &[Chunk],
    ) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return vec![];
        }

        let mut by_record: HashMap<&str, Vec<&Chunk>> = HashMap::new();
        for chunk in chunks {
            by_record.entry(chunk.record_id.as_str()).or_default().push(chunk);
        }

        let mut results: Vec<SearchResult> = Vec::new();
        for record in records {
            let record_chunks = by_record.get(record.id.as_str()).map_or(&[][..], |v| v);
            let (score, explanation, match_kind) = self.score_record(query, record, record_chunks);

            if !score.is_finite() {
                warn!(record_id = %record.id, score, "skipping record with non-finite score");
                continue;
            }
            if score == 0.0 {
                continue;
            }

            results.push(SearchResult {
                record: record.clone(),
                score,
                explanation,
                match_kind,
            });
        }

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(self.config.max_results);

        results
    }

    // ========================================================================
    // Scoring layers
    // ========================================================================

    /// Layer 1: the query names a key field verbatim
    fn exact_match_score(&self, query_lower: &str, record: &PersonRecord) -> f64 {
        let mut fields = Vec::with_capacity(2 + record.skills.len() + record.qualifications.len());
        fields.push(record.department.as_str());
        fields.push(record.name.as_str());
        fields.extend(record.skills.iter().map(String::as_str));
        fields.extend(record.qualifications.iter().map(String::as_str));

        for field in fields {
            let field_lower = field.to_lowercase();
            if !field_lower.is_empty() && query_lower.contains(&field_lower) {
                return EXACT_MATCH_SCORE;
            }
        }

        0.0
    }

    /// Layer 2: substring containment in either direction
    fn partial_match_score(&self, query_lower: &str, record: &PersonRecord) -> f64 {
        let mut fields = Vec::with_capacity(1 + record.skills.len() + record.qualifications.len());
        fields.push(record.department.as_str());
        fields.extend(record.skills.iter().map(String::as_str));
        fields.extend(record.qualifications.iter().map(String::as_str));

        for field in fields {
            let field_lower = field.to_lowercase();
            if field_lower.is_empty() {
                continue;
            }
            if field_lower.contains(query_lower) || query_lower.contains(&field_lower) {
                return PARTIAL_MATCH_SCORE;
            }
        }

        0.0
    }

    /// Layer 3: best chunk cosine similarity above the noise floor
    fn cosine_score(&self, query_lower: &str, record: &PersonRecord, chunks: &[&Chunk]) -> f64 {
        let query_freqs = term_frequencies(&tokenize(query_lower));
        if query_freqs.is_empty() {
            return 0.0;
        }

        let mut best = 0.0_f64;
        for chunk in chunks {
            if chunk.record_id != record.id {
                continue;
            }
            let chunk_freqs = term_frequencies(&tokenize(&chunk.content));
            let sim = cosine_similarity(&query_freqs, &chunk_freqs);
            if sim > self.config.min_chunk_similarity {
                best = best.max(sim);
            }
        }

        best
    }

    /// Layer 4: additive conversational increments
    ///
    /// Increments are summed within this layer only; the caller takes the max
    /// against the lexical layers.
    fn conversational_score(&self, query_lower: &str, record: &PersonRecord) -> f64 {
        let mut score = 0.0;

        if contains_any(query_lower, SENIOR_TERMS) {
            if record.years_experience >= 5 {
                score += self.config.senior_strong_bonus;
            } else if record.years_experience >= 3 {
                score += self.config.senior_weak_bonus;
            }
        }

        if contains_any(query_lower, JUNIOR_TERMS) {
            if record.years_experience <= 2 {
                score += self.config.junior_strong_bonus;
            } else if record.years_experience <= 3 {
                score += self.config.junior_weak_bonus;
            }
        }

        if contains_any(query_lower, MULTI_SKILL_TERMS) && record.has_skill_count(3) {
            score += self.config.multi_skill_bonus;
        }

        if contains_any(query_lower, CERTIFICATION_TERMS) && record.is_certified() {
            score += self.config.certification_bonus;
        }

        let department_lower = record.department.to_lowercase();
        if !department_lower.is_empty() && query_lower.contains(&department_lower) {
            score += self.config.department_affinity_bonus;
        }

        score
    }

    fn match_kind(&self, score: f64, query_lower: &str, record: &PersonRecord) -> MatchKind {
        if score >= EXACT_MATCH_SCORE || self.exact_match_score(query_lower, record) > 0.0 {
            MatchKind::Exact
        } else if score > 0.6 {
            MatchKind::Similar
        } else {
            MatchKind::Category
        }
    }
}

/// Tiered qualitative label for a relevance score
pub fn explanation_for(score: f64) -> &'static str {
    if score > 0.8 {
        "very high relevance"
    } else if score > 0.6 {
        "high relevance"
    } else if score > 0.4 {
        "moderate relevance"
    } else {
        "low relevance"
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// ============================================================================
// TESTS
// ============================================================================
