//! Journey: mixed query batch against one corpus
//!
//! Loads the standard corpus once and drives the full classify → aggregate →
//! rank → format pipeline with every intent category, checking the documented
//! contract at each step.

use roster_core::{
    format_results, AggregationValue, Engine, MatchKind, QueryKind, DEFAULT_MAX_RESULTS,
    NO_RESULTS_MESSAGE,
};
use roster_e2e_tests::fixtures::TestDataFactory;

fn loaded_engine() -> Engine {
    let engine = Engine::new();
    engine
        .initialize(TestDataFactory::staff_corpus())
        .expect("initialize");
    engine
}

#[test]
fn exact_skill_query_ranks_both_python_people_first() {
    let engine = loaded_engine();
    let outcome = engine.search("who knows Python?").expect("search");

    assert_eq!(outcome.query_kind, QueryKind::ExactSearch);
    assert!(!outcome.should_escalate);

    let names: Vec<&str> = outcome.results.iter().map(|r| r.record.name.as_str()).collect();
    assert_eq!(names, vec!["Aiko Tanaka", "Ben Carter"]);
    for result in &outcome.results {
        assert_eq!(result.score, 1.0);
        assert_eq!(result.match_kind, MatchKind::Exact);
    }
}

#[test]
fn department_query_matches_by_exact_department() {
    let engine = loaded_engine();
    let outcome = engine.search("people in the design department").expect("search");

    assert_eq!(outcome.query_kind, QueryKind::ExactSearch);
    let names: Vec<&str> = outcome.results.iter().map(|r| r.record.name.as_str()).collect();
    assert!(names.contains(&"Daniel Evans"));
    assert!(names.contains(&"Emma Fischer"));
    // Design people lead the ranking
    assert_eq!(outcome.results[0].record.department, "Design");
    assert_eq!(outcome.results[1].record.department, "Design");
}

#[test]
fn counting_question_short_circuits_to_aggregation() {
    let engine = loaded_engine();
    let outcome = engine.search("How many people are in Dev?").expect("search");

    let aggregation = outcome.aggregation.expect("aggregation");
    assert_eq!(aggregation.value, AggregationValue::Count(3));
    assert!(aggregation.description.contains("Dev"));
    assert!(aggregation.description.contains('3'));
    assert!(outcome.results.is_empty());
    assert!(!outcome.should_escalate);
}

#[test]
fn skill_counting_question_counts_holders() {
    let engine = loaded_engine();
    let outcome = engine.search("how many people know python?").expect("search");

    let aggregation = outcome.aggregation.expect("aggregation");
    assert_eq!(aggregation.value, AggregationValue::Count(2));
}

#[test]
fn department_list_question_yields_list_aggregation() {
    let engine = loaded_engine();
    let outcome = engine.search("what departments exist?").expect("search");

    assert_eq!(outcome.query_kind, QueryKind::GeneralQuestion);
    assert!(!outcome.should_escalate);
    match outcome.aggregation.expect("aggregation").value {
        AggregationValue::List(departments) => {
            // Sorted by headcount: Dev 3, Design 2, Sales 1
            assert_eq!(departments, vec!["Dev", "Design", "Sales"]);
        }
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn top_performer_query_returns_composite_ranking() {
    let engine = loaded_engine();
    let outcome = engine.search("who are our top performers?").expect("search");

    assert_eq!(outcome.query_kind, QueryKind::Analytical);
    assert!(!outcome.should_escalate);
    assert_eq!(outcome.results.len(), 3);
    // Aiko: 3 skills, 1 qualification, 12 years - clear winner
    assert_eq!(outcome.results[0].record.name, "Aiko Tanaka");
    for pair in outcome.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn result_cap_holds_on_large_corpus() {
    let engine = Engine::new();
    engine
        .initialize(TestDataFactory::large_corpus(100))
        .expect("initialize");

    let outcome = engine.search("python").expect("search");
    assert_eq!(outcome.results.len(), DEFAULT_MAX_RESULTS);
    assert!(!outcome.should_escalate);
}

#[test]
fn formatting_contract_across_outcome_shapes() {
    let engine = loaded_engine();

    // Aggregation description passes through verbatim
    let counted = engine.search("How many people are in Sales?").expect("search");
    let aggregation = counted.aggregation.expect("aggregation");
    assert_eq!(
        format_results(&counted.results, Some(&aggregation)),
        aggregation.description
    );

    // Ranked results become enumerated blocks
    let ranked = engine.search("who knows Python?").expect("search");
    let text = format_results(&ranked.results, None);
    assert!(text.starts_with("1. Aiko Tanaka (Dev)"));
    assert!(text.contains("2. Ben Carter (Dev)"));
    assert!(text.contains("Skills: Python, AWS, Kubernetes"));

    // No results, no aggregation: the fixed message
    assert_eq!(format_results(&[], None), NO_RESULTS_MESSAGE);
}

#[test]
fn scores_stay_ordered_and_positive() {
    let engine = loaded_engine();
    for query in [
        "who knows Python?",
        "people in the design department",
        "recommend a senior engineer",
        "figma",
    ] {
        let outcome = engine.search(query).expect("search");
        for result in &outcome.results {
            assert!(result.score > 0.0, "query {query:?} leaked a zero score");
            assert!(result.score.is_finite());
        }
        for pair in outcome.results.windows(2) {
            assert!(pair[0].score >= pair[1].score, "query {query:?} out of order");
        }
    }
}
