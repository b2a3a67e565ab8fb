use serde::{
    Deserialize,
    Serialize
};

use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

pub const DEFAULT_STEP: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteppingScheme {
    /// (f(x) - f(x - h)) / h
    Left,
    /// (f(x + h) - f(x)) / h
    Right,
    /// (f(x + h) - f(x - h)) / 2h
    Middle
}

/// 以固定步長 h 對連續函數做差分，結果仍是連續函數，於呼叫時才求值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppingDifferentialOperator {
    step: f64,
    scheme: SteppingScheme
}

impl SteppingDifferentialOperator {
    pub fn new(step: f64, scheme: SteppingScheme) -> Result<SteppingDifferentialOperator, TabulatedFunctionError> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(TabulatedFunctionError::InvalidStep { step });
        }
        Ok(SteppingDifferentialOperator { step, scheme })
    }

    pub fn left(step: f64) -> Result<SteppingDifferentialOperator, TabulatedFunctionError> {
        Self::new(step, SteppingScheme::Left)
    }

    pub fn right(step: f64) -> Result<SteppingDifferentialOperator, TabulatedFunctionError> {
        Self::new(step, SteppingScheme::Right)
    }

    pub fn middle(step: f64) -> Result<SteppingDifferentialOperator, TabulatedFunctionError> {
        Self::new(step, SteppingScheme::Middle)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn scheme(&self) -> SteppingScheme {
        self.scheme
    }

    pub fn derivative_at<F>(&self, function: &F, x: f64) -> Result<f64, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        let h = self.step;
        Ok(match self.scheme {
            SteppingScheme::Left => (function.value(x)? - function.value(x - h)?) / h,
            SteppingScheme::Right => (function.value(x + h)? - function.value(x)?) / h,
            SteppingScheme::Middle => (function.value(x + h)? - function.value(x - h)?) / (2.0 * h)
        })
    }

    pub fn derive<F>(&self, function: F) -> SteppingDerivative<F>
        where F: MathFunction {
        SteppingDerivative { operator: *self, function }
    }
}

impl Default for SteppingDifferentialOperator {
    fn default() -> Self {
        SteppingDifferentialOperator { step: DEFAULT_STEP, scheme: SteppingScheme::Middle }
    }
}

pub struct SteppingDerivative<F> {
    operator: SteppingDifferentialOperator,
    function: F
}

impl<F> MathFunction for SteppingDerivative<F> where
    F: MathFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.operator.derivative_at(&self.function, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_must_be_positive() {
        assert_eq!(SteppingDifferentialOperator::left(0.0),
                   Err(TabulatedFunctionError::InvalidStep { step: 0.0 }));
        assert!(SteppingDifferentialOperator::right(-1e-3).is_err());
        assert!(SteppingDifferentialOperator::middle(f64::NAN).is_err());
        assert!(SteppingDifferentialOperator::middle(f64::INFINITY).is_err());
    }

    #[test]
    fn schemes_approximate_derivative() {
        let cube = |x: f64| x * x * x;
        for operator in [
            SteppingDifferentialOperator::left(1e-6).unwrap(),
            SteppingDifferentialOperator::right(1e-6).unwrap(),
            SteppingDifferentialOperator::middle(1e-6).unwrap(),
        ] {
            let derivative = operator.derive(cube);
            assert!((derivative.value(2.0).unwrap() - 12.0).abs() < 1e-4);
        }
    }

    #[test]
    fn one_sided_differences_on_a_line_are_exact() {
        let line = |x: f64| 3.0 * x + 1.0;
        let left = SteppingDifferentialOperator::left(0.5).unwrap();
        let right = SteppingDifferentialOperator::right(0.5).unwrap();
        assert!((left.derivative_at(&line, 1.0).unwrap() - 3.0).abs() < 1e-12);
        assert!((right.derivative_at(&line, 1.0).unwrap() - 3.0).abs() < 1e-12);
    }
}
