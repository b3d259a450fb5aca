//! End-to-End Test Support
//!
//! Shared fixtures and mock collaborators for the journey tests. The journey
//! tests exercise the public `roster_core` API only, the way an embedding
//! application would.

pub mod fixtures;
