//! Chunking - Derived text fragments per record
//!
//! Each record is expanded into up to four immutable chunks, one per facet:
//! basic (name + department + bio), skills, experience, and qualifications.
//! Chunk sentences are deterministic templates over the record fields, so the
//! same corpus always yields the same chunk set. The full set is rebuilt
//! wholesale whenever the engine is (re)initialized; chunks have no identity
//! independent of their generating record.

use serde::{Deserialize, Serialize};

use crate::record::PersonRecord;

// ============================================================================
// CHUNK KIND
// ============================================================================

/// The semantic facet a chunk covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Name, department, and biography
    #[default]
    Basic,
    /// Skill list
    Skills,
    /// Years of experience and its description
    Experience,
    /// Qualification/certification list
    Qualifications,
}

impl ChunkKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkKind::Basic => "basic",
            ChunkKind::Skills => "skills",
            ChunkKind::Experience => "experience",
            ChunkKind::Qualifications => "qualifications",
        }
    }

    /// Parse from string name
    pub fn parse_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "skills" => ChunkKind::Skills,
            "experience" => ChunkKind::Experience,
            "qualifications" => ChunkKind::Qualifications,
            _ => ChunkKind::Basic,
        }
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CHUNK
// ============================================================================

/// A derived, immutable text fragment tied to exactly one record
///
/// Carries a copy of the record's filterable metadata so scoring never needs
/// to chase the back-reference for filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Id of the generating record
    pub record_id: String,
    /// Which facet this chunk covers
    pub kind: ChunkKind,
    /// Generated natural-language sentence
    pub content: String,
    /// Copied metadata: department
    pub department: String,
    /// Copied metadata: skills
    pub skills: Vec<String>,
    /// Copied metadata: qualifications
    pub qualifications: Vec<String>,
    /// Copied metadata: years of experience
    pub years_experience: u32,
}

impl Chunk {
    fn from_record(record: &PersonRecord, kind: ChunkKind, content: String) -> Self {
        Self {
            record_id: record.id.clone(),
            kind,
            content,
            department: record.department.clone(),
            skills: record.skills.clone(),
            qualifications: record.qualifications.clone(),
            years_experience: record.years_experience,
        }
    }
}

// ============================================================================
// CHUNKING
// ============================================================================

/// Build the chunk set for a record collection
///
/// Ordering is stable: records in input order, facets in
/// basic → skills → experience → qualifications order. The basic chunk is
/// always produced; the other three only when the source field is non-empty.
pub fn chunk_records(records: &[PersonRecord]) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(records.len() * 2);

    for record in records {
        chunks.push(Chunk::from_record(record, ChunkKind::Basic, basic_sentence(record)));

        if !record.skills.is_empty() {
            chunks.push(Chunk::from_record(record, ChunkKind::Skills, skills_sentence(record)));
        }

        if !record.experience.trim().is_empty() {
            chunks.push(Chunk::from_record(
                record,
                ChunkKind::Experience,
                experience_sentence(record),
            ));
        }

        if !record.qualifications.is_empty() {
            chunks.push(Chunk::from_record(
                record,
                ChunkKind::Qualifications,
                qualifications_sentence(record),
            ));
        }
    }

    chunks
}

fn basic_sentence(record: &PersonRecord) -> String {
    if record.bio.trim().is_empty() {
        format!("{} works in the {} department.", record.name, record.department)
    } else {
        format!(
            "{} works in the {} department. {}",
            record.name, record.department, record.bio
        )
    }
}

fn skills_sentence(record: &PersonRecord) -> String {
    format!("{} has skills in {}.", record.name, record.skills.join(", "))
}

fn experience_sentence(record: &PersonRecord) -> String {
    format!(
        "{} has {} years of experience. {}",
        record.name, record.years_experience, record.experience
    )
}

fn qualifications_sentence(record: &PersonRecord) -> String {
    format!(
        "{} holds the following qualifications: {}.",
        record.name,
        record.qualifications.join(", ")
    )
}

// ============================================================================
// TESTS
// ============================================================================
