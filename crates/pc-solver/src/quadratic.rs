//! Quadratic curve arithmetic and root finding.

use pc_data::SystemCurve;

use crate::error::{SolverError, SolverResult};

/// Leading coefficients below this are treated as degenerate: the quadratic
/// formula would divide by a value that has collapsed to zero.
const MIN_LEAD_COEFFICIENT: f64 = 1e-12;

/// `a·x² + b·x + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Both real roots of a quadratic, with the discriminant that produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticRoots {
    pub low: f64,
    pub high: f64,
    pub discriminant: f64,
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// Coefficient-wise difference, used to turn "where do two curves meet"
    /// into "where is this curve zero".
    pub fn difference(&self, other: &Quadratic) -> Quadratic {
        Quadratic {
            a: self.a - other.a,
            b: self.b - other.b,
            c: self.c - other.c,
        }
    }

    /// Real roots via the discriminant formula.
    ///
    /// A negative discriminant is `NoRealIntersection`; a vanishing leading
    /// coefficient is `Degenerate` (the formula divides by `2a`).
    pub fn roots(&self) -> SolverResult<QuadraticRoots> {
        if self.a.abs() < MIN_LEAD_COEFFICIENT {
            return Err(SolverError::Degenerate {
                what: "leading coefficient collapsed to zero",
            });
        }
        let discriminant = self.b * self.b - 4.0 * self.a * self.c;
        if discriminant < 0.0 {
            return Err(SolverError::NoRealIntersection { discriminant });
        }
        let sqrt_d = discriminant.sqrt();
        let r1 = (-self.b + sqrt_d) / (2.0 * self.a);
        let r2 = (-self.b - sqrt_d) / (2.0 * self.a);
        Ok(QuadraticRoots {
            low: r1.min(r2),
            high: r1.max(r2),
            discriminant,
        })
    }
}

impl From<SystemCurve> for Quadratic {
    fn from(curve: SystemCurve) -> Self {
        Quadratic::new(curve.a, curve.b, curve.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_of_simple_quadratic() {
        // x² − 5x + 6: roots 2 and 3.
        let roots = Quadratic::new(1.0, -5.0, 6.0).roots().unwrap();
        assert!((roots.low - 2.0).abs() < 1e-12);
        assert!((roots.high - 3.0).abs() < 1e-12);
        assert!(roots.discriminant > 0.0);
    }

    #[test]
    fn negative_discriminant_is_no_intersection() {
        let err = Quadratic::new(1.0, 0.0, 1.0).roots().unwrap_err();
        assert!(matches!(err, SolverError::NoRealIntersection { .. }));
    }

    #[test]
    fn vanishing_lead_coefficient_is_degenerate() {
        let err = Quadratic::new(0.0, 2.0, -4.0).roots().unwrap_err();
        assert!(matches!(err, SolverError::Degenerate { .. }));
    }

    #[test]
    fn difference_is_coefficient_wise() {
        let d = Quadratic::new(3.0, 2.0, 1.0).difference(&Quadratic::new(1.0, 1.0, 1.0));
        assert_eq!(d, Quadratic::new(2.0, 1.0, 0.0));
    }
}
