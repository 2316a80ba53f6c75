use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The pump and system curves do not intersect in the physical regime:
    /// either the discriminant is negative or every root is negative flow.
    #[error("No real intersection (discriminant {discriminant})")]
    NoRealIntersection { discriminant: f64 },

    #[error("Degenerate curve: {what}")]
    Degenerate { what: &'static str },

    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },
}
