//! Journey: escalation to the generation collaborator
//!
//! Covers when the orchestrator hands a query to the generator, what the
//! prompt carries, and how generator failures degrade.

use roster_core::{Engine, QueryKind, EMPTY_QUERY_MESSAGE, GENERATION_FALLBACK_MESSAGE};
use roster_e2e_tests::fixtures::{FailingGenerator, ScriptedGenerator, SlowGenerator, TestDataFactory};

fn loaded_engine() -> Engine {
    let engine = Engine::new();
    engine
        .initialize(TestDataFactory::staff_corpus())
        .expect("initialize");
    engine
}

#[tokio::test]
async fn unmatched_query_escalates_and_uses_generated_answer() {
    let engine = loaded_engine();
    let generator = ScriptedGenerator::new("Nobody here fits that, sorry.");

    let outcome = engine.search("underwater basket weaving").expect("search");
    assert_eq!(outcome.query_kind, QueryKind::FuzzySearch);
    assert!(outcome.should_escalate);

    let answer = engine.answer_with("underwater basket weaving", &generator).await;
    assert_eq!(answer, "Nobody here fits that, sorry.");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("underwater basket weaving"));
}

#[tokio::test]
async fn recommendation_query_escalates_with_corpus_context() {
    let engine = loaded_engine();
    let generator = ScriptedGenerator::new("I would suggest Aiko.");

    let outcome = engine.search("recommend a senior certified person").expect("search");
    assert!(outcome.should_escalate);
    assert!(!outcome.results.is_empty());

    let answer = engine
        .answer_with("recommend a senior certified person", &generator)
        .await;
    assert_eq!(answer, "I would suggest Aiko.");

    // General-question prompts embed the whole staff summary
    let prompts = generator.prompts();
    assert!(prompts[0].contains("Aiko Tanaka"));
    assert!(prompts[0].contains("Felix Garcia"));
    assert!(prompts[0].contains("Departments:"));
}

#[tokio::test]
async fn resolved_queries_never_touch_the_generator() {
    let engine = loaded_engine();
    let generator = ScriptedGenerator::new("should never be seen");

    for query in [
        "who knows Python?",
        "How many people are in Dev?",
        "what departments exist?",
        "who are our top performers?",
    ] {
        let answer = engine.answer_with(query, &generator).await;
        assert_ne!(answer, "should never be seen", "query {query:?} escalated");
    }
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn upstream_failure_degrades_to_fallback_message() {
    let engine = loaded_engine();
    let answer = engine
        .answer_with("underwater basket weaving", &FailingGenerator)
        .await;
    assert_eq!(answer, GENERATION_FALLBACK_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn generator_timeout_degrades_to_fallback_message() {
    let engine = loaded_engine();
    let answer = engine
        .answer_with("underwater basket weaving", &SlowGenerator)
        .await;
    assert_eq!(answer, GENERATION_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn blank_query_is_answered_without_generation() {
    let engine = loaded_engine();
    let generator = ScriptedGenerator::new("unused");

    let answer = engine.answer_with("   ", &generator).await;
    assert_eq!(answer, EMPTY_QUERY_MESSAGE);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn analytical_query_without_matching_statistic_escalates() {
    let engine = loaded_engine();
    let generator = ScriptedGenerator::new("Computed from the data.");

    // Analytical vocabulary, but no department/skill/experience statistic
    // applies, so the generator must compute the answer.
    let outcome = engine.search("what is the mean age of the staff").expect("search");
    assert_eq!(outcome.query_kind, QueryKind::Analytical);
    assert!(outcome.should_escalate);

    let answer = engine
        .answer_with("what is the mean age of the staff", &generator)
        .await;
    assert_eq!(answer, "Computed from the data.");
    assert!(generator.prompts()[0].contains("Staff data:"));
}
