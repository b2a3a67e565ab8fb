use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    approx_eq,
    TabulatedFunction,
    PRECISION
};
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 兩個表列函數在相同 x 網格上的逐點四則運算。
pub struct TabulatedFunctionOperationService<F> {
    factory: F
}

impl<F> TabulatedFunctionOperationService<F> where
    F: TabulatedFunctionFactory {
    pub fn new(factory: F) -> TabulatedFunctionOperationService<F> {
        TabulatedFunctionOperationService { factory }
    }

    pub fn as_points<T>(function: &T) -> Vec<Point>
        where T: TabulatedFunction + ?Sized {
        function.iter().collect()
    }

    pub fn add<A, B>(&self, lhs: &A, rhs: &B) -> Result<F::Output, TabulatedFunctionError>
        where A: TabulatedFunction + ?Sized,
              B: TabulatedFunction + ?Sized {
        self.combine(lhs, rhs, |_, _, l, r| Ok(l + r))
    }

    pub fn subtract<A, B>(&self, lhs: &A, rhs: &B) -> Result<F::Output, TabulatedFunctionError>
        where A: TabulatedFunction + ?Sized,
              B: TabulatedFunction + ?Sized {
        self.combine(lhs, rhs, |_, _, l, r| Ok(l - r))
    }

    pub fn multiply<A, B>(&self, lhs: &A, rhs: &B) -> Result<F::Output, TabulatedFunctionError>
        where A: TabulatedFunction + ?Sized,
              B: TabulatedFunction + ?Sized {
        self.combine(lhs, rhs, |_, _, l, r| Ok(l * r))
    }

    /// 任何一點的除數絕對值小於 `PRECISION` 都回傳 `ArithmeticDomainError`。
    pub fn divide<A, B>(&self, lhs: &A, rhs: &B) -> Result<F::Output, TabulatedFunctionError>
        where A: TabulatedFunction + ?Sized,
              B: TabulatedFunction + ?Sized {
        self.combine(lhs, rhs, |index, x, l, r| {
            if r.abs() < PRECISION {
                Err(TabulatedFunctionError::ArithmeticDomainError { index, x })
            } else {
                Ok(l / r)
            }
        })
    }

    fn combine<A, B, Op>(&self, lhs: &A, rhs: &B, op: Op) -> Result<F::Output, TabulatedFunctionError>
        where A: TabulatedFunction + ?Sized,
              B: TabulatedFunction + ?Sized,
              Op: Fn(usize, f64, f64, f64) -> Result<f64, TabulatedFunctionError> {
        let lhs_points = Self::as_points(lhs);
        let rhs_points = Self::as_points(rhs);
        if lhs_points.len() != rhs_points.len() {
            return Err(TabulatedFunctionError::InconsistentTables {
                reason: format!("point counts differ ({} vs {})", lhs_points.len(), rhs_points.len())
            });
        }

        let mut x_values = Vec::with_capacity(lhs_points.len());
        let mut y_values = Vec::with_capacity(lhs_points.len());
        for (index, (l, r)) in lhs_points.iter().zip(rhs_points.iter()).enumerate() {
            if !approx_eq(l.x(), r.x()) {
                return Err(TabulatedFunctionError::InconsistentTables {
                    reason: format!("x values differ at index {} ({} vs {})", index, l.x(), r.x())
                });
            }
            x_values.push(l.x());
            y_values.push(op(index, l.x(), l.y(), r.y())?);
        }
        self.factory.create(&x_values, &y_values)
    }
}
