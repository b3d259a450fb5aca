//! Corpus Statistics and Aggregation
//!
//! Resolves "aggregation queries" - questions answered by a computation over
//! the whole corpus rather than per-record ranking. Two paths:
//!
//! - [`detect_aggregation`]: fixed (metric, entity) patterns such as
//!   "how many" + a department or skill keyword, tried by the orchestrator
//!   before any ranking
//! - explicit analytics (`analyze_*` + report builders) used for analytical
//!   and organizational-list queries
//!
//! All descriptions are rendered natural-language strings; the numeric detail
//! rides along as a JSON payload for callers that want structure.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::PersonRecord;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Weight of the skill count in the top-performer composite
pub const TOP_PERFORMER_SKILL_WEIGHT: f64 = 0.3;

/// Weight of the qualification count in the top-performer composite
pub const TOP_PERFORMER_QUALIFICATION_WEIGHT: f64 = 0.2;

/// Weight of years-of-experience in the top-performer composite
pub const TOP_PERFORMER_YEARS_WEIGHT: f64 = 0.1;

/// Number of records returned by [`find_top_performers`]
pub const TOP_PERFORMER_COUNT: usize = 3;

/// Fixed skill vocabulary recognized by "how many ... ?" counting
const COUNTABLE_SKILL_TERMS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "react",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "figma",
];

/// Terms that request a "top X" highlight line in reports
const TOP_TERMS: &[&str] = &["top", "best"];

// ============================================================================
// TYPES
// ============================================================================

/// A grouped count (department or skill)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    /// Group name as first seen in the corpus
    pub name: String,
    /// Number of records in the group
    pub count: usize,
}

/// Descriptive statistics over years of experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    /// Mean years of experience
    pub average: f64,
    /// Minimum years of experience
    pub min: u32,
    /// Maximum years of experience
    pub max: u32,
    /// Number of records included
    pub count: usize,
}

/// Full corpus statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStatistics {
    /// Per-department headcounts
    pub departments: Vec<GroupCount>,
    /// Per-skill headcounts
    pub skills: Vec<GroupCount>,
    /// Experience descriptive statistics
    pub experience: ExperienceStats,
}

/// The computed value inside an aggregation answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum AggregationValue {
    /// A single count
    Count(u64),
    /// A list of names
    List(Vec<String>),
    /// Nested statistics
    Statistics(CorpusStatistics),
}

/// An aggregation answer (ephemeral, per query)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// The computed value
    pub value: AggregationValue,
    /// Rendered natural-language description, shown to users verbatim
    pub description: String,
    /// Optional structured detail payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

// ============================================================================
// ANALYTICS
// ============================================================================

/// Headcount per department, largest first (ties broken by name)
pub fn analyze_departments(records: &[PersonRecord]) -> Vec<GroupCount> {
    group_counts(records.iter().map(|r| r.department.as_str()))
}

/// Headcount per skill, largest first (ties broken by name)
pub fn analyze_skills(records: &[PersonRecord]) -> Vec<GroupCount> {
    group_counts(records.iter().flat_map(|r| r.skills.iter().map(String::as_str)))
}

/// Average/min/max years of experience across the corpus
pub fn analyze_experience(records: &[PersonRecord]) -> ExperienceStats {
    if records.is_empty() {
        return ExperienceStats { average: 0.0, min: 0, max: 0, count: 0 };
    }

    let total: u64 = records.iter().map(|r| u64::from(r.years_experience)).sum();
    let min = records.iter().map(|r| r.years_experience).min().unwrap_or(0);
    let max = records.iter().map(|r| r.years_experience).max().unwrap_or(0);

    ExperienceStats {
        average: total as f64 / records.len() as f64,
        min,
        max,
        count: records.len(),
    }
}

/// Full corpus statistics in one pass
pub fn corpus_statistics(records: &[PersonRecord]) -> CorpusStatistics {
    CorpusStatistics {
        departments: analyze_departments(records),
        skills: analyze_skills(records),
        experience: analyze_experience(records),
    }
}

fn group_counts<'a>(names: impl Iterator<Item = &'a str>) -> Vec<GroupCount> {
    let mut counts: HashMap<String, (String, usize)> = HashMap::new();
    for name in names {
        let entry = counts
            .entry(name.to_lowercase())
            .or_insert_with(|| (name.to_string(), 0));
        entry.1 += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_values()
        .map(|(name, count)| GroupCount { name, count })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    groups
}

// ============================================================================
// TOP PERFORMERS
// ============================================================================

/// Rank records by the fixed weighted composite and return the top 3
///
/// Composite = skills × 0.3 + qualifications × 0.2 + years × 0.1. The
/// weights are hand-tuned and exposed as constants above.
pub fn find_top_performers(records: &[PersonRecord]) -> Vec<(PersonRecord, f64)> {
    let mut ranked: Vec<(PersonRecord, f64)> = records
        .iter()
        .map(|r| {
            let score = r.skills.len() as f64 * TOP_PERFORMER_SKILL_WEIGHT
                + r.qualifications.len() as f64 * TOP_PERFORMER_QUALIFICATION_WEIGHT
                + f64::from(r.years_experience) * TOP_PERFORMER_YEARS_WEIGHT;
            (r.clone(), score)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(TOP_PERFORMER_COUNT);
    ranked
}

// ============================================================================
// AGGREGATION DETECTION
// ============================================================================

/// Try to resolve a query as a fixed counting pattern
///
/// Recognized patterns (checked in order):
/// - "how many" + a department named in the corpus → department headcount
/// - "how many" + a known skill keyword → skill headcount
///
/// Returns `None` when the query is not a counting question; the orchestrator
/// then falls through to ranking/analytics.
pub fn detect_aggregation(query: &str, records: &[PersonRecord]) -> Option<AggregationResult> {
    let query_lower = query.to_lowercase();

    if !query_lower.contains("how many") {
        return None;
    }

    // Department counts take precedence over skill counts
    for group in analyze_departments(records) {
        let dept_lower = group.name.to_lowercase();
        if !dept_lower.is_empty() && query_lower.contains(&dept_lower) {
            let count = records
                .iter()
                .filter(|r| r.department.to_lowercase().contains(&dept_lower))
                .count();
            return Some(count_result(
                count,
                format!("There are {} {} in {}.", count, people_word(count), group.name),
                serde_json::json!({ "metric": "headcount", "department": group.name }),
            ));
        }
    }

    for term in COUNTABLE_SKILL_TERMS {
        if query_lower.contains(term) {
            let count = records
                .iter()
                .filter(|r| r.skills.iter().any(|s| s.to_lowercase().contains(term)))
                .count();
            return Some(count_result(
                count,
                format!("There are {} {} with {} skills.", count, people_word(count), term),
                serde_json::json!({ "metric": "headcount", "skill": term }),
            ));
        }
    }

    None
}

fn count_result(count: usize, description: String, detail: serde_json::Value) -> AggregationResult {
    AggregationResult {
        value: AggregationValue::Count(count as u64),
        description,
        detail: Some(detail),
    }
}

fn people_word(count: usize) -> &'static str {
    if count == 1 { "person" } else { "people" }
}

fn wants_top_highlight(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    TOP_TERMS.iter().any(|t| query_lower.contains(t))
}

// ============================================================================
// REPORTS
// ============================================================================

/// Department statistics rendered as a natural-language report
pub fn department_report(records: &[PersonRecord], query: &str) -> AggregationResult {
    let groups = analyze_departments(records);
    let listing = groups
        .iter()
        .map(|g| format!("{} ({} {})", g.name, g.count, people_word(g.count)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut description = format!(
        "The organization has {} departments: {}.",
        groups.len(),
        listing
    );
    if wants_top_highlight(query) {
        if let Some(top) = groups.first() {
            description.push_str(&format!(
                " Top department by headcount: {} ({} {}).",
                top.name,
                top.count,
                people_word(top.count)
            ));
        }
    }

    AggregationResult {
        detail: Some(serde_json::json!({ "departments": groups })),
        value: AggregationValue::Statistics(corpus_statistics(records)),
        description,
    }
}

/// Skill statistics rendered as a natural-language report
pub fn skill_report(records: &[PersonRecord], query: &str) -> AggregationResult {
    let groups = analyze_skills(records);
    let listing = groups
        .iter()
        .map(|g| format!("{} ({})", g.name, g.count))
        .collect::<Vec<_>>()
        .join(", ");

    let mut description = if groups.is_empty() {
        "No skills are recorded yet.".to_string()
    } else {
        format!("{} distinct skills are represented: {}.", groups.len(), listing)
    };
    if wants_top_highlight(query) {
        if let Some(top) = groups.first() {
            description.push_str(&format!(
                " Top skill by headcount: {} ({} {}).",
                top.name,
                top.count,
                people_word(top.count)
            ));
        }
    }

    AggregationResult {
        detail: Some(serde_json::json!({ "skills": groups })),
        value: AggregationValue::Statistics(corpus_statistics(records)),
        description,
    }
}

/// Experience statistics rendered as a natural-language report
pub fn experience_report(records: &[PersonRecord]) -> AggregationResult {
    let stats = analyze_experience(records);
    let description = format!(
        "Across {} {}, experience averages {:.1} years (minimum {}, maximum {}).",
        stats.count,
        people_word(stats.count),
        stats.average,
        stats.min,
        stats.max
    );

    AggregationResult {
        detail: Some(serde_json::json!({ "experience": stats })),
        value: AggregationValue::Statistics(corpus_statistics(records)),
        description,
    }
}

/// "What departments exist" style list answer
pub fn department_list(records: &[PersonRecord]) -> AggregationResult {
    let names: Vec<String> = analyze_departments(records)
        .into_iter()
        .map(|g| g.name)
        .collect();
    let description = if names.is_empty() {
        "No departments are recorded yet.".to_string()
    } else {
        format!("Departments: {}.", names.join(", "))
    };

    AggregationResult {
        value: AggregationValue::List(names),
        description,
        detail: None,
    }
}

/// "What skills do we have" style list answer
pub fn skill_list(records: &[PersonRecord]) -> AggregationResult {
    let names: Vec<String> = analyze_skills(records).into_iter().map(|g| g.name).collect();
    let description = if names.is_empty() {
        "No skills are recorded yet.".to_string()
    } else {
        format!("Skills across the organization: {}.", names.join(", "))
    };

    AggregationResult {
        value: AggregationValue::List(names),
        description,
        detail: None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
