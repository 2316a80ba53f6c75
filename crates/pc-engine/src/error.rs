//! Engine error surface.
//!
//! `FailureReason` is the per-output error: cheap to clone, comparable in
//! tests, carried inside `OutputState::Error` and propagated unchanged to
//! every dependent of a failed output. `EngineError` covers engine-level
//! failures (a malformed dependency declaration).

use thiserror::Error;

use crate::inputs::InputId;

/// Why a derived output could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FailureReason {
    /// A required input has not been chosen yet. Propagates like a lookup
    /// miss but keeps its own identity for user messaging.
    #[error("input not selected: {0}")]
    Unselected(InputId),

    /// A reference-table lookup had no matching row.
    #[error("no {table} entry for {key}")]
    NotFound { table: String, key: String },

    /// A formula input fell outside its valid mathematical domain.
    #[error("out of domain: {what}")]
    Domain { what: String },

    /// The pump and system curves have no physical intersection.
    #[error("no real curve intersection")]
    NoRealIntersection,

    /// A curve collapsed and the solver could not proceed.
    #[error("degenerate curve: {what}")]
    Degenerate { what: String },

    /// A reference table failed to load; everything depending on it fails
    /// with this reason rather than crashing the session.
    #[error("reference data unavailable: {what}")]
    DataUnavailable { what: String },

    /// Dependency bookkeeping violated; unreachable when the declared
    /// dependency table is sound.
    #[error("internal: {what}")]
    Internal { what: &'static str },
}

impl From<pc_data::DataError> for FailureReason {
    fn from(err: pc_data::DataError) -> Self {
        match err {
            pc_data::DataError::NotFound { table, key } => FailureReason::NotFound {
                table: table.to_string(),
                key,
            },
            other => FailureReason::DataUnavailable {
                what: other.to_string(),
            },
        }
    }
}

impl From<pc_formulas::FormulaError> for FailureReason {
    fn from(err: pc_formulas::FormulaError) -> Self {
        match err {
            pc_formulas::FormulaError::Domain { what } => FailureReason::Domain {
                what: what.to_string(),
            },
        }
    }
}

impl From<pc_solver::SolverError> for FailureReason {
    fn from(err: pc_solver::SolverError) -> Self {
        match err {
            pc_solver::SolverError::NoRealIntersection { .. } => FailureReason::NoRealIntersection,
            pc_solver::SolverError::Degenerate { what } => FailureReason::Degenerate {
                what: what.to_string(),
            },
            pc_solver::SolverError::NonFinite { what } => FailureReason::Domain {
                what: what.to_string(),
            },
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("dependency graph error: {what}")]
    Graph { what: String },
}
