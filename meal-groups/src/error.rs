//! Error types shared by the parser, the engine and the front ends.

use thiserror::Error;

/// Errors that can occur while preparing or running a draw.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("no people detected in the message")]
    NoPeople,

    #[error("people without any eligible slot: {}", .0.join(", "))]
    NoEligibleSlots(Vec<String>),

    #[error("no feasible assignment found after {attempts} attempts")]
    Infeasible {
        attempts: usize,
        /// People whose option set was empty when they reached the engine.
        unplaceable: Vec<String>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DrawResult<T> = Result<T, DrawError>;
