use thiserror::Error;

pub type FormulaResult<T> = Result<T, FormulaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Input falls outside the formula's valid mathematical domain
    /// (zero/negative divisor, temperature at or above a physical ceiling).
    #[error("Out of domain: {what}")]
    Domain { what: &'static str },
}

pub(crate) fn domain(what: &'static str) -> FormulaError {
    FormulaError::Domain { what }
}
