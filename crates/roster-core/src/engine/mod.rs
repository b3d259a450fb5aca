//! Engine - Orchestration Facade
//!
//! One [`Engine`] value owns one corpus (records + derived chunks) behind an
//! `RwLock`. There is deliberately no process-wide singleton: construct an
//! engine, hand out references. (Re)initialization takes the write lock and
//! swaps the whole corpus in one step, so no query ever observes a partially
//! rebuilt store; queries take read locks and are safe to run concurrently.
//!
//! Per query the orchestration policy is:
//!
//! 1. Classify the query intent
//! 2. Try aggregation detection - a counting answer returns immediately
//! 3. Dispatch by intent (ranked search, analytics, or organizational lists)
//! 4. Report whether the caller should escalate to the generation collaborator

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chunk::{chunk_records, Chunk};
use crate::classify::{classify, has_conversational_terms, QueryKind};
use crate::generation::{build_prompt, generate_or_fallback, TextGenerator};
use crate::record::PersonRecord;
use crate::search::{MatchKind, RetrievalScorer, ScoringConfig, SearchResult};
use crate::stats::{
    department_list, department_report, detect_aggregation, experience_report,
    find_top_performers, skill_list, skill_report, AggregationResult,
};

// ============================================================================
// FIXED USER-FACING MESSAGES
// ============================================================================

/// Shown when the corpus has no records
pub const NO_DATA_MESSAGE: &str =
    "No staff data has been loaded yet. Please load records before asking questions.";

/// Shown when the query is blank
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a question about the staff directory.";

/// Shown when a search produced no results and no aggregation
pub const NO_RESULTS_MESSAGE: &str = "No matching people were found for that query.";

/// Generic apology for internal failures; detail goes to logs only
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Sorry, something went wrong while answering. Please try again.";

/// Query fragments that request the top-performer ranking directly
const TOP_PERFORMER_QUERY_TERMS: &[&str] = &["top performer", "best performer"];

// ============================================================================
// ERRORS
// ============================================================================

/// Engine error taxonomy
///
/// `EmptyCorpus` and `EmptyQuery` are expected conditions with fixed friendly
/// responses; they are errors at the API level so callers can distinguish
/// them from genuine answers.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No records were loaded at query time
    #[error("no records have been loaded")]
    EmptyCorpus,

    /// The query was blank or whitespace-only
    #[error("query is blank")]
    EmptyQuery,

    /// The corpus lock was poisoned by a panicking writer
    #[error("corpus lock poisoned")]
    LockPoisoned,
}

impl EngineError {
    /// The fixed user-visible string for this condition
    ///
    /// Internal detail is never surfaced verbatim; callers show this string
    /// and leave diagnostics to the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            EngineError::EmptyCorpus => NO_DATA_MESSAGE,
            EngineError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            EngineError::LockPoisoned => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Engine result alias
pub type Result<T> = std::result::Result<T, EngineError>;

// ============================================================================
// QUERY OUTCOME
// ============================================================================

/// Everything the orchestrator decided for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    /// Ranked results (empty for aggregation answers)
    pub results: Vec<SearchResult>,
    /// Aggregation answer, when one resolved the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationResult>,
    /// Classified intent of the query
    pub query_kind: QueryKind,
    /// Whether the caller should escalate to the generation collaborator
    pub should_escalate: bool,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Corpus snapshot owned by one engine instance, replaced wholesale
#[derive(Debug, Default)]
struct CorpusState {
    records: Vec<PersonRecord>,
    chunks: Vec<Chunk>,
    built_at: Option<DateTime<Utc>>,
}

/// The retrieval engine
pub struct Engine {
    corpus: RwLock<CorpusState>,
    scorer: RetrievalScorer,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with an empty corpus and default scoring
    pub fn new() -> Self {
        Self {
            corpus: RwLock::new(CorpusState::default()),
            scorer: RetrievalScorer::new(),
        }
    }

    /// Create an engine with custom scoring configuration
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            corpus: RwLock::new(CorpusState::default()),
            scorer: RetrievalScorer::with_config(config),
        }
    }

    /// Replace the record store and chunk set atomically
    ///
    /// Records are re-normalized defensively (ingestion should already have
    /// applied the defaulting invariants) and the full chunk set is rebuilt
    /// from scratch. Holding the write lock for the whole swap guarantees no
    /// query sees a partially rebuilt corpus.
    pub fn initialize(&self, records: Vec<PersonRecord>) -> Result<()> {
        let records: Vec<PersonRecord> =
            records.into_iter().map(PersonRecord::normalized).collect();
        let chunks = chunk_records(&records);

        let mut corpus = self.corpus.write().map_err(|_| EngineError::LockPoisoned)?;
        info!(
            records = records.len(),
            chunks = chunks.len(),
            reinitialized = corpus.built_at.is_some(),
            "corpus initialized"
        );
        *corpus = CorpusState {
            records,
            chunks,
            built_at: Some(Utc::now()),
        };

        Ok(())
    }

    /// Number of records currently loaded
    pub fn record_count(&self) -> usize {
        self.corpus.read().map(|c| c.records.len()).unwrap_or(0)
    }

    /// Number of derived chunks currently loaded
    pub fn chunk_count(&self) -> usize {
        self.corpus.read().map(|c| c.chunks.len()).unwrap_or(0)
    }

    /// When the corpus was last (re)built, if ever
    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.corpus.read().ok().and_then(|c| c.built_at)
    }

    /// Snapshot of the loaded records (cloned; for prompt building and stats)
    pub fn records(&self) -> Result<Vec<PersonRecord>> {
        Ok(self
            .corpus
            .read()
            .map_err(|_| EngineError::LockPoisoned)?
            .records
            .clone())
    }

    /// Answer a query with ranked results, an aggregation, or an escalation
    /// request
    ///
    /// Blank queries and an empty corpus are reported as typed errors with
    /// fixed [`EngineError::user_message`] strings rather than panics.
    pub fn search(&self, query: &str) -> Result<QueryOutcome> {
        if query.trim().is_empty() {
            return Err(EngineError::EmptyQuery);
        }

        let corpus = self.corpus.read().map_err(|_| EngineError::LockPoisoned)?;
        if corpus.records.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }

        let query_kind = classify(query);
        debug!(%query_kind, "classified query");

        // Counting patterns win over everything else and never escalate
        if let Some(aggregation) = detect_aggregation(query, &corpus.records) {
            debug!("aggregation pattern matched");
            return Ok(QueryOutcome {
                results: vec![],
                aggregation: Some(aggregation),
                query_kind,
                should_escalate: false,
            });
        }

        let outcome = match query_kind {
            QueryKind::ExactSearch | QueryKind::FuzzySearch => {
                let results = self.scorer.search(query, &corpus.records, &corpus.chunks);
                let should_escalate = results.is_empty();
                QueryOutcome { results, aggregation: None, query_kind, should_escalate }
            }
            QueryKind::Analytical => self.dispatch_analytical(query, &corpus),
            QueryKind::GeneralQuestion => self.dispatch_general(query, &corpus),
        };

        debug!(
            results = outcome.results.len(),
            aggregation = outcome.aggregation.is_some(),
            escalate = outcome.should_escalate,
            "query dispatched"
        );
        Ok(outcome)
    }

    /// Build the escalation prompt for an outcome of [`Engine::search`]
    pub fn escalation_prompt(&self, query: &str, outcome: &QueryOutcome) -> Result<String> {
        let records = self.records()?;
        Ok(build_prompt(query, outcome.query_kind, &outcome.results, &records))
    }

    /// Full pipeline: search, then either format locally or escalate
    ///
    /// Expected conditions (blank query, empty corpus) and every generation
    /// failure all degrade to fixed friendly strings; this method never
    /// returns an error to render.
    pub async fn answer_with<G: TextGenerator + Sync>(&self, query: &str, generator: &G) -> String {
        let outcome = match self.search(query) {
            Ok(outcome) => outcome,
            Err(err) => return err.user_message().to_string(),
        };

        if outcome.should_escalate {
            let prompt = match self.escalation_prompt(query, &outcome) {
                Ok(prompt) => prompt,
                Err(err) => return err.user_message().to_string(),
            };
            generate_or_fallback(generator, &prompt).await
        } else {
            format_results(&outcome.results, outcome.aggregation.as_ref())
        }
    }

    // ========================================================================
    // Intent dispatch
    // ========================================================================

    fn dispatch_analytical(&self, query: &str, corpus: &CorpusState) -> QueryOutcome {
        let query_lower = query.to_lowercase();

        if TOP_PERFORMER_QUERY_TERMS.iter().any(|t| query_lower.contains(t)) {
            // Ranked answer, no narrative synthesis needed
            let results = top_performer_results(&corpus.records);
            return QueryOutcome {
                results,
                aggregation: None,
                query_kind: QueryKind::Analytical,
                should_escalate: false,
            };
        }

        let aggregation = if query_lower.contains("department") {
            Some(department_report(&corpus.records, query))
        } else if query_lower.contains("skill") {
            Some(skill_report(&corpus.records, query))
        } else if query_lower.contains("experience")
            || query_lower.contains("tenure")
            || query_lower.contains("years")
        {
            Some(experience_report(&corpus.records))
        } else {
            None
        };

        match aggregation {
            Some(aggregation) => QueryOutcome {
                results: vec![],
                aggregation: Some(aggregation),
                query_kind: QueryKind::Analytical,
                should_escalate: false,
            },
            None => {
                // No statistic applies; the scorer output is context for the
                // generator, not an answer, so escalation is forced.
                let results = self.scorer.search(query, &corpus.records, &corpus.chunks);
                QueryOutcome {
                    results,
                    aggregation: None,
                    query_kind: QueryKind::Analytical,
                    should_escalate: true,
                }
            }
        }
    }

    fn dispatch_general(&self, query: &str, corpus: &CorpusState) -> QueryOutcome {
        let query_lower = query.to_lowercase();
        let list_style = query_lower.contains("what")
            || query_lower.contains("which")
            || query_lower.contains("list")
            || query_lower.contains("exist");

        let aggregation = if list_style && query_lower.contains("department") {
            Some(department_list(&corpus.records))
        } else if list_style && query_lower.contains("skill") {
            Some(skill_list(&corpus.records))
        } else {
            None
        };

        if let Some(aggregation) = aggregation {
            return QueryOutcome {
                results: vec![],
                aggregation: Some(aggregation),
                query_kind: QueryKind::GeneralQuestion,
                should_escalate: false,
            };
        }

        let results = self.scorer.search(query, &corpus.records, &corpus.chunks);
        // Recommendation/expertise questions need narrative synthesis even
        // when results exist
        let should_escalate = has_conversational_terms(query) || results.is_empty();
        QueryOutcome {
            results,
            aggregation: None,
            query_kind: QueryKind::GeneralQuestion,
            should_escalate,
        }
    }
}

/// Map the top-performer ranking into search results
fn top_performer_results(records: &[PersonRecord]) -> Vec<SearchResult> {
    find_top_performers(records)
        .into_iter()
        .map(|(record, score)| SearchResult {
            record,
            score,
            explanation: format!("top performer (composite {score:.2})"),
            match_kind: MatchKind::Category,
        })
        .collect()
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Render results and/or an aggregation for display
///
/// Pass-through law: whenever an aggregation is present its description is
/// returned verbatim, regardless of `results`. Otherwise each result becomes
/// an enumerated block; an empty result set becomes the fixed
/// [`NO_RESULTS_MESSAGE`].
pub fn format_results(results: &[SearchResult], aggregation: Option<&AggregationResult>) -> String {
    if let Some(aggregation) = aggregation {
        return aggregation.description.clone();
    }

    if results.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut block = format!("{}. {} ({})", i + 1, r.record.name, r.record.department);
            if !r.record.skills.is_empty() {
                block.push_str(&format!("\n   Skills: {}", r.record.skills.join(", ")));
            }
            if !r.record.qualifications.is_empty() {
                block.push_str(&format!(
                    "\n   Qualifications: {}",
                    r.record.qualifications.join(", ")
                ));
            }
            block.push_str(&format!(
                "\n   Experience: {} years{}",
                r.record.years_experience,
                if r.record.experience.trim().is_empty() {
                    String::new()
                } else {
                    format!(" - {}", r.record.experience)
                }
            ));
            block.push_str(&format!("\n   Relevance: {}", r.explanation));
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ============================================================================
// TESTS
// ============================================================================
