//! Errors surfaced by the fitness service

use std::fmt;
use thiserror::Error;

use crate::data::{CatalogError, WgerError};

/// Error classes the HTTP layer maps to status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller asked for a muscle the catalog cannot resolve
    UnknownMuscle,
    /// Upstream call failed
    Upstream,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownMuscle => "unknown_muscle",
            ErrorKind::Upstream => "upstream_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while aggregating exercises
#[derive(Debug, Error)]
pub enum FitnessError {
    #[error(transparent)]
    UnknownMuscle(#[from] CatalogError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] WgerError),
}

impl FitnessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FitnessError::UnknownMuscle(_) => ErrorKind::UnknownMuscle,
            FitnessError::Upstream(_) => ErrorKind::Upstream,
        }
    }
}
