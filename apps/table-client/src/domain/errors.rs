//! Domain-level error type.
//!
//! Malformed server data never reaches this type: the normalizers recover
//! with fallbacks. These variants cover strict parsing and programmer-facing
//! preconditions only.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("parse card: {0}")]
    ParseCard(String),
    #[error("seating needs {need} players, roster has {have}")]
    RosterIncomplete { need: usize, have: usize },
}
