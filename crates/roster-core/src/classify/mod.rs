//! Query Classification
//!
//! Assigns one intent category to a raw query string using curated keyword
//! sets. Evaluation is containment-based and runs over an ordered rule list
//! with a FIXED priority:
//!
//! 1. Exact-search terms (technologies, departments, skills)
//! 2. Conversational/recommendation terms → [`QueryKind::GeneralQuestion`]
//! 3. Analytical/statistical terms → [`QueryKind::Analytical`]
//! 4. Descriptive/organizational terms → [`QueryKind::GeneralQuestion`]
//! 5. Default → [`QueryKind::FuzzySearch`]
//!
//! The sets overlap on purpose ("experience" is both an organizational and an
//! exact-ish term in practice), so the first matching tier wins. Reordering
//! the rules changes classification results; the order above is part of the
//! public contract.

use serde::{Deserialize, Serialize};

// ============================================================================
// QUERY KIND
// ============================================================================

/// Intent category assigned to a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum QueryKind {
    /// Query names a concrete technology, department, or skill
    ExactSearch,
    /// No tier matched; fall back to lexical similarity search
    #[default]
    FuzzySearch,
    /// Query asks for counts, averages, or other statistics
    Analytical,
    /// Conversational or organizational question
    GeneralQuestion,
}

impl QueryKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::ExactSearch => "exactSearch",
            QueryKind::FuzzySearch => "fuzzySearch",
            QueryKind::Analytical => "analytical",
            QueryKind::GeneralQuestion => "generalQuestion",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// KEYWORD SETS
// ============================================================================

/// Tier 1: technology, department, and skill vocabulary
pub const EXACT_SEARCH_TERMS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "rust",
    "react",
    "vue",
    "sql",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "machine learning",
    "engineering",
    "sales",
    "design",
    "marketing",
    "accounting",
];

/// Tier 2: conversational / recommendation vocabulary
///
/// These map to [`QueryKind::GeneralQuestion`] and additionally flag the
/// query for the conversational scoring heuristic and forced escalation.
pub const CONVERSATIONAL_TERMS: &[&str] = &[
    "recommend",
    "suggest",
    "who should",
    "best person",
    "suitable",
    "good fit",
    "senior",
    "veteran",
    "junior",
    "newcomer",
    "versatile",
    "certified",
    "expert",
];

/// Tier 3: quantitative / statistical vocabulary
pub const ANALYTICAL_TERMS: &[&str] = &[
    "how many",
    "count",
    "number of",
    "average",
    "mean",
    "statistics",
    "distribution",
    "total",
    "top performer",
    "most",
    "least",
];

/// Tier 4: descriptive / organizational vocabulary
pub const GENERAL_TERMS: &[&str] = &[
    "department",
    "team",
    "organization",
    "company",
    "experience",
    "background",
    "qualification",
    "role",
    "everyone",
    "list",
];

// ============================================================================
// CLASSIFIER
// ============================================================================

/// One (keyword-set, category) rule in the priority order
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Human-readable tier name, used in logs and tests
    pub name: &'static str,
    /// Keyword set checked by containment
    pub keywords: &'static [&'static str],
    /// Category assigned when this tier matches
    pub kind: QueryKind,
}

impl ClassificationRule {
    /// Whether the (lowercased) query contains any keyword of this tier
    pub fn matches(&self, query_lower: &str) -> bool {
        self.keywords.iter().any(|kw| query_lower.contains(kw))
    }
}

/// The fixed rule order. First match wins; see the module docs.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "exact",
        keywords: EXACT_SEARCH_TERMS,
        kind: QueryKind::ExactSearch,
    },
    ClassificationRule {
        name: "conversational",
        keywords: CONVERSATIONAL_TERMS,
        kind: QueryKind::GeneralQuestion,
    },
    ClassificationRule {
        name: "analytical",
        keywords: ANALYTICAL_TERMS,
        kind: QueryKind::Analytical,
    },
    ClassificationRule {
        name: "general",
        keywords: GENERAL_TERMS,
        kind: QueryKind::GeneralQuestion,
    },
];

/// Classify a raw query string
///
/// Tier order is fixed (exact → conversational → analytical → general) and
/// position of a keyword within the query string is irrelevant; only tier
/// priority decides ties between overlapping sets.
pub fn classify(query: &str) -> QueryKind {
    let query_lower = query.to_lowercase();

    for rule in CLASSIFICATION_RULES {
        if rule.matches(&query_lower) {
            return rule.kind;
        }
    }

    QueryKind::FuzzySearch
}

/// Whether the query carries conversational/recommendation vocabulary
///
/// Used by the retrieval scorer to gate the conversational heuristic and by
/// the orchestrator to force escalation for narrative-synthesis queries.
pub fn has_conversational_terms(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    CONVERSATIONAL_TERMS.iter().any(|kw| query_lower.contains(kw))
}

// ============================================================================
// TESTS
// ============================================================================
