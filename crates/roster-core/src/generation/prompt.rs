//! Prompt Templates
//!
//! Escalated queries are rendered into one of four fixed templates selected
//! by the classified intent. Search-style intents embed the scored result
//! set; analytical and general intents embed a full corpus summary so the
//! generator can reason over the whole staff list. Every template carries
//! explicit instructions on length, tone, and grounding in concrete records.

use crate::classify::QueryKind;
use crate::record::PersonRecord;
use crate::search::SearchResult;
use crate::stats::{analyze_departments, analyze_skills};

/// Shared answer-style instructions appended to every template
const ANSWER_INSTRUCTIONS: &str = "Answer in 2-4 sentences, in a friendly and professional tone. \
     Reference concrete people from the data by name; do not invent anyone.";

/// Render the scored result set as prompt context
fn results_block(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "(no candidate records matched)".to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {} - department {}, skills [{}], qualifications [{}], {} years of experience \
                 (relevance {:.2})",
                i + 1,
                r.record.name,
                r.record.department,
                r.record.skills.join(", "),
                r.record.qualifications.join(", "),
                r.record.years_experience,
                r.score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render department/skill statistics plus per-record detail
pub fn summarize_corpus(records: &[PersonRecord]) -> String {
    let departments = analyze_departments(records)
        .into_iter()
        .map(|g| format!("{} ({})", g.name, g.count))
        .collect::<Vec<_>>()
        .join(", ");
    let skills = analyze_skills(records)
        .into_iter()
        .map(|g| format!("{} ({})", g.name, g.count))
        .collect::<Vec<_>>()
        .join(", ");

    let people = records
        .iter()
        .map(|r| {
            format!(
                "- {}: {}, skills [{}], qualifications [{}], {} years of experience. {}",
                r.name,
                r.department,
                r.skills.join(", "),
                r.qualifications.join(", "),
                r.years_experience,
                r.bio
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Departments: {}\nSkills: {}\nPeople:\n{}",
        departments, skills, people
    )
}

/// Build the escalation prompt for a query
///
/// Template selection is keyed by the classified intent; the content is
/// either the scored result set (search intents) or a whole-corpus summary
/// (analytical and general intents).
pub fn build_prompt(
    query: &str,
    kind: QueryKind,
    results: &[SearchResult],
    records: &[PersonRecord],
) -> String {
    match kind {
        QueryKind::ExactSearch => format!(
            "You are a staff-directory assistant. The user searched for a specific \
             technology, department, or person.\n\nQuery: {query}\n\nCandidate records:\n{}\n\n{}",
            results_block(results),
            ANSWER_INSTRUCTIONS
        ),
        QueryKind::FuzzySearch => format!(
            "You are a staff-directory assistant. The user's search had no strong \
             direct matches; suggest the closest people from the candidates.\n\n\
             Query: {query}\n\nCandidate records:\n{}\n\n{}",
            results_block(results),
            ANSWER_INSTRUCTIONS
        ),
        QueryKind::Analytical => format!(
            "You are a staff-directory assistant. The user asked an analytical \
             question about the organization. Compute your answer from the data \
             below; state numbers explicitly.\n\nQuery: {query}\n\nStaff data:\n{}\n\n{}",
            summarize_corpus(records),
            ANSWER_INSTRUCTIONS
        ),
        QueryKind::GeneralQuestion => format!(
            "You are a staff-directory assistant. The user asked an open question \
             that needs a narrative answer, such as a recommendation.\n\n\
             Query: {query}\n\nStaff data:\n{}\n\n{}",
            summarize_corpus(records),
            ANSWER_INSTRUCTIONS
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================
