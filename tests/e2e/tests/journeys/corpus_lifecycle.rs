//! Journey: corpus loading, replacement, and concurrent reads
//!
//! The engine owns its corpus behind an `RwLock`; these journeys check the
//! lifecycle contract: typed errors before loading, wholesale replacement on
//! reinitialization, defaulting on ingest, and safe concurrent readers.

use std::sync::Arc;
use std::thread;

use roster_core::{
    AggregationValue, Engine, EngineError, PersonRecord, QueryOutcome, EMPTY_QUERY_MESSAGE,
    NO_DATA_MESSAGE,
};
use roster_e2e_tests::fixtures::TestDataFactory;

#[test]
fn unloaded_engine_reports_empty_corpus() {
    let engine = Engine::new();
    let err = engine.search("who knows Python?").expect_err("must fail");
    assert!(matches!(err, EngineError::EmptyCorpus));
    assert_eq!(err.user_message(), NO_DATA_MESSAGE);
}

#[test]
fn blank_query_reports_empty_query_even_when_loaded() {
    let engine = Engine::new();
    engine
        .initialize(TestDataFactory::staff_corpus())
        .expect("initialize");

    let err = engine.search("\t  \n").expect_err("must fail");
    assert!(matches!(err, EngineError::EmptyQuery));
    assert_eq!(err.user_message(), EMPTY_QUERY_MESSAGE);
}

#[test]
fn initialization_applies_defaulting_invariants() {
    let engine = Engine::new();
    engine
        .initialize(vec![PersonRecord {
            skills: vec!["Python".to_string(), "   ".to_string()],
            ..Default::default()
        }])
        .expect("initialize");

    let records = engine.records().expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Unknown");
    assert_eq!(records[0].department, "Unassigned");
    assert!(!records[0].id.is_empty());
    assert_eq!(records[0].skills, vec!["Python".to_string()]);
}

#[test]
fn reinitialization_replaces_the_corpus_wholesale() {
    let engine = Engine::new();
    engine
        .initialize(TestDataFactory::staff_corpus())
        .expect("initialize");
    assert_eq!(engine.record_count(), 6);
    let first_built = engine.built_at().expect("built_at");

    engine
        .initialize(vec![TestDataFactory::record(
            "Grace Ho",
            "Marketing",
            &["SEO"],
            &[],
            5,
        )])
        .expect("reinitialize");

    assert_eq!(engine.record_count(), 1);
    assert!(engine.built_at().expect("built_at") >= first_built);

    // Old corpus is gone for both ranking and aggregation
    let outcome = engine.search("who knows Python?").expect("search");
    assert!(outcome.results.is_empty());
    let counted = engine.search("how many people are in marketing?").expect("search");
    assert_eq!(
        counted.aggregation.expect("aggregation").value,
        AggregationValue::Count(1)
    );
}

#[test]
fn chunks_track_records() {
    let engine = Engine::new();
    engine
        .initialize(TestDataFactory::staff_corpus())
        .expect("initialize");

    // Every record yields a basic chunk at minimum
    assert!(engine.chunk_count() >= engine.record_count());

    engine.initialize(vec![]).expect("clear");
    assert_eq!(engine.chunk_count(), 0);
}

#[test]
fn concurrent_readers_see_a_consistent_corpus() {
    let engine = Arc::new(Engine::new());
    engine
        .initialize(TestDataFactory::staff_corpus())
        .expect("initialize");

    let mut handles = vec![];
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                let outcome = engine.search("who knows Python?").expect("search");
                // Readers never observe a partially rebuilt corpus
                assert_eq!(outcome.results.len(), 2);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("reader thread panicked");
    }
}

#[test]
fn query_outcome_serializes_camel_case() {
    let engine = Engine::new();
    engine
        .initialize(TestDataFactory::staff_corpus())
        .expect("initialize");

    let outcome = engine.search("who knows Python?").expect("search");
    let json = serde_json::to_string(&outcome).expect("serialize");
    assert!(json.contains("\"queryKind\""));
    assert!(json.contains("\"shouldEscalate\""));
    assert!(json.contains("\"yearsExperience\""));

    let parsed: QueryOutcome = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed.results.len(), outcome.results.len());
    assert_eq!(parsed.should_escalate, outcome.should_escalate);
}
