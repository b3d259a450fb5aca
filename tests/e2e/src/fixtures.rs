//! Test Data Factory
//!
//! Provides utilities for generating realistic test data:
//! - A small hand-written staff corpus with known properties
//! - Batch generation for volume tests
//! - Mock generation collaborators (scripted, failing, slow)

use std::sync::Mutex;
use std::time::Duration;

use roster_core::{GenerationError, PersonRecord, TextGenerator};

/// Factory for creating test corpora
pub struct TestDataFactory;

impl TestDataFactory {
    /// One fully populated record
    pub fn record(
        name: &str,
        department: &str,
        skills: &[&str],
        qualifications: &[&str],
        years: u32,
    ) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            department: department.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            qualifications: qualifications.iter().map(|s| s.to_string()).collect(),
            bio: format!("{name} works on cross-team initiatives."),
            experience: format!("{years} years across several product lines."),
            years_experience: years,
            ..Default::default()
        }
        .normalized()
    }

    /// The standard six-person corpus used by most journeys
    ///
    /// Known properties the tests rely on:
    /// - Dev has 3 people, Design 2, Sales 1
    /// - Exactly two people know Python
    /// - Exactly one person is certified and has 3+ skills (Aiko)
    /// - Years of experience span 1 to 12
    pub fn staff_corpus() -> Vec<PersonRecord> {
        vec![
            Self::record(
                "Aiko Tanaka",
                "Dev",
                &["Python", "AWS", "Kubernetes"],
                &["AWS Solutions Architect"],
                12,
            ),
            Self::record("Ben Carter", "Dev", &["Python", "SQL"], &[], 6),
            Self::record("Chloe Davis", "Dev", &["TypeScript", "React"], &[], 2),
            Self::record("Daniel Evans", "Design", &["Figma"], &[], 4),
            Self::record("Emma Fischer", "Design", &["Figma", "Illustrator"], &[], 8),
            Self::record("Felix Garcia", "Sales", &["Salesforce"], &[], 1),
        ]
    }

    /// A corpus of `count` generated records, all in the same department
    pub fn large_corpus(count: usize) -> Vec<PersonRecord> {
        (0..count)
            .map(|i| {
                Self::record(
                    &format!("Person {i}"),
                    "Dev",
                    &["Python"],
                    &[],
                    (i % 15) as u32,
                )
            })
            .collect()
    }
}

// ============================================================================
// MOCK GENERATORS
// ============================================================================

/// Generator that returns a fixed answer and records every prompt it saw
pub struct ScriptedGenerator {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(vec![]),
        }
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("prompt log poisoned").len()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Generator whose every call fails upstream
pub struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Failed("upstream 503".to_string()))
    }
}

/// Generator that never answers within any reasonable timeout
pub struct SlowGenerator;

impl TextGenerator for SlowGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".to_string())
    }
}
