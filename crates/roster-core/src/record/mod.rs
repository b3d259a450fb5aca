//! Person Record - The fundamental unit of the corpus
//!
//! Each record describes one staff member with:
//! - Identity and organizational placement (name, department)
//! - Capabilities (skills, qualifications)
//! - Narrative fields (bio, experience description)
//! - Tenure (years of experience)
//!
//! Records arrive from the ingestion collaborator already validated, but the
//! defaulting invariants are re-applied here so a name or department is never
//! an empty string downstream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Placeholder substituted when a record arrives with no name
pub const DEFAULT_NAME: &str = "Unknown";

/// Placeholder substituted when a record arrives with no department
pub const DEFAULT_DEPARTMENT: &str = "Unassigned";

// ============================================================================
// PERSON RECORD
// ============================================================================

/// A single staff member in the corpus
///
/// All string fields are free text supplied by ingestion. The engine only
/// relies on the invariant that `name` and `department` are non-empty after
/// [`PersonRecord::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// Unique identifier (UUID v4, generated if absent)
    #[serde(default)]
    pub id: String,
    /// Display name, never empty after normalization
    pub name: String,
    /// Organizational department, never empty after normalization
    pub department: String,
    /// Ordered skill list, may be empty
    #[serde(default)]
    pub skills: Vec<String>,
    /// Ordered qualification/certification list, may be empty
    #[serde(default)]
    pub qualifications: Vec<String>,
    /// Free-text biography
    #[serde(default)]
    pub bio: String,
    /// Free-text description of work experience
    #[serde(default)]
    pub experience: String,
    /// Years of experience, non-negative
    #[serde(default)]
    pub years_experience: u32,
}

impl Default for PersonRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            department: String::new(),
            skills: vec![],
            qualifications: vec![],
            bio: String::new(),
            experience: String::new(),
            years_experience: 0,
        }
    }
}

impl PersonRecord {
    /// Create a new record with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Apply the defaulting invariants in place
    ///
    /// Guarantees after this call: `id`, `name`, and `department` are
    /// non-empty. Blank-but-whitespace fields count as missing.
    pub fn normalize(&mut self) {
        if self.id.trim().is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        if self.name.trim().is_empty() {
            self.name = DEFAULT_NAME.to_string();
        }
        if self.department.trim().is_empty() {
            self.department = DEFAULT_DEPARTMENT.to_string();
        }
        self.skills.retain(|s| !s.trim().is_empty());
        self.qualifications.retain(|q| !q.trim().is_empty());
    }

    /// Consuming variant of [`PersonRecord::normalize`]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Whether the record has at least `n` skills
    pub fn has_skill_count(&self, n: usize) -> bool {
        self.skills.len() >= n
    }

    /// Whether the record carries any qualification
    pub fn is_certified(&self) -> bool {
        !self.qualifications.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
