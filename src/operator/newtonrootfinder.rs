use tracing::trace;

use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;
use crate::operator::steppingdifferentialoperator::SteppingDifferentialOperator;

/// 導數絕對值低於此值時視為水平切線，無法繼續迭代。
const DERIVATIVE_FLOOR: f64 = 1e-12;

/// Newton 法求根，導數以中央差分估計。
///
///   x_{k+1} = x_k - f(x_k) / f'(x_k)
#[derive(Debug, Clone, Copy)]
pub struct NewtonRootFinder {
    tolerance: f64,
    max_iterations: usize,
    derivative: SteppingDifferentialOperator
}

impl NewtonRootFinder {
    pub fn new(tolerance: f64,
               max_iterations: usize,
               step: f64) -> Result<NewtonRootFinder, TabulatedFunctionError> {
        Ok(NewtonRootFinder {
            tolerance,
            max_iterations,
            derivative: SteppingDifferentialOperator::middle(step)?
        })
    }

    pub fn find_root<F>(&self, function: &F, initial_guess: f64) -> Result<f64, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        let mut x = initial_guess;
        for iteration in 0..self.max_iterations {
            let fx = function.value(x)?;
            if fx.abs() < self.tolerance {
                return Ok(x);
            }
            let dfx = self.derivative.derivative_at(function, x)?;
            if !dfx.is_finite() || dfx.abs() < DERIVATIVE_FLOOR {
                return Err(TabulatedFunctionError::DivergentOrUndefinedDerivative { x });
            }
            let next = x - fx / dfx;
            if !next.is_finite() {
                return Err(TabulatedFunctionError::DivergentOrUndefinedDerivative { x });
            }
            trace!(iteration, x, next, "newton step");
            if (next - x).abs() < self.tolerance {
                return Ok(next);
            }
            x = next;
        }
        Err(TabulatedFunctionError::NoConvergence { iterations: self.max_iterations })
    }
}

impl Default for NewtonRootFinder {
    fn default() -> Self {
        NewtonRootFinder {
            tolerance: 1e-10,
            max_iterations: 100,
            derivative: SteppingDifferentialOperator::default()
        }
    }
}
