//! Generation Collaborator Boundary
//!
//! The engine never talks to a language model directly; escalation hands a
//! prompt to whatever implements [`TextGenerator`]. The call is the only
//! suspension point in the system and is always bounded by a timeout. Every
//! failure mode (not configured, timeout, upstream error) degrades to a fixed
//! fallback message rather than surfacing to the end user.

mod prompt;

pub use prompt::{build_prompt, summarize_corpus};

use std::time::Duration;

use tracing::warn;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default bound on a single generation call
pub const GENERATION_TIMEOUT_SECS: u64 = 30;

/// Fixed apology shown when generation is unavailable or fails
pub const GENERATION_FALLBACK_MESSAGE: &str =
    "Sorry, I could not produce an answer for that right now. Please try again \
     or rephrase your question.";

// ============================================================================
// ERRORS
// ============================================================================

/// Failures of the generation collaborator
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No generator has been configured for this deployment
    #[error("generation service is not configured")]
    Unavailable,

    /// The call exceeded its time bound
    #[error("generation timed out after {0} seconds")]
    Timeout(u64),

    /// The upstream service answered with an error
    #[error("generation failed: {0}")]
    Failed(String),
}

// ============================================================================
// GENERATOR TRAIT
// ============================================================================

/// External natural-language generation service
///
/// Implementations wrap an actual model API; the engine only ever sees this
/// trait. `generate` receives a fully rendered prompt and returns the model's
/// text answer.
pub trait TextGenerator {
    /// Produce an answer for the given prompt
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}

/// Run a generation call bounded by `timeout`
///
/// An elapsed timeout is mapped to [`GenerationError::Timeout`]; it is a
/// recoverable condition, not a crash.
pub async fn generate_with_timeout<G: TextGenerator + Sync>(
    generator: &G,
    prompt: &str,
    timeout: Duration,
) -> Result<String, GenerationError> {
    match tokio::time::timeout(timeout, generator.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout.as_secs())),
    }
}

/// Run a generation call and degrade every failure to the fixed fallback
///
/// The error detail is logged for diagnostics but never shown verbatim.
pub async fn generate_or_fallback<G: TextGenerator + Sync>(
    generator: &G,
    prompt: &str,
) -> String {
    match generate_with_timeout(generator, prompt, Duration::from_secs(GENERATION_TIMEOUT_SECS))
        .await
    {
        Ok(answer) => answer,
        Err(err) => {
            warn!(error = %err, "generation failed, using fallback message");
            GENERATION_FALLBACK_MESSAGE.to_string()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
