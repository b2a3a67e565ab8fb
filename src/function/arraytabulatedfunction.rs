use tracing::trace;

use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    approx_eq,
    sample_function,
    validate_samples,
    Insertable,
    Removable,
    TabulatedFunction,
    PRECISION
};
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 以兩條平行的連續陣列儲存的表列函數。
///
/// 索引存取 O(1)；插入、移除需搬移尾段，O(count)。
/// 容量不足時由 `Vec` 以倍增方式成長。
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTabulatedFunction {
    x_values: Vec<f64>,
    y_values: Vec<f64>
}

impl ArrayTabulatedFunction {
    pub fn new(x_values: Vec<f64>, y_values: Vec<f64>) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> {
        validate_samples(&x_values, &y_values)?;
        Ok(ArrayTabulatedFunction { x_values, y_values })
    }

    pub fn from_slices(x_values: &[f64], y_values: &[f64]) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> {
        Self::new(x_values.to_vec(), y_values.to_vec())
    }

    pub fn from_function<F>(source: &F,
                            x_from: f64,
                            x_to: f64,
                            count: usize) -> Result<ArrayTabulatedFunction, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        let (x_values, y_values) = sample_function(source, x_from, x_to, count)?;
        Ok(ArrayTabulatedFunction { x_values, y_values })
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    fn check_index(&self, index: usize) -> Result<(), TabulatedFunctionError> {
        if index >= self.x_values.len() {
            Err(TabulatedFunctionError::IndexOutOfRange { index, count: self.x_values.len() })
        } else {
            Ok(())
        }
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn count(&self) -> usize {
        self.x_values.len()
    }

    fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.check_index(index)?;
        Ok(self.x_values[index])
    }

    fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.check_index(index)?;
        Ok(self.y_values[index])
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        self.check_index(index)?;
        self.y_values[index] = value;
        Ok(())
    }

    /// 二分搜尋第一個 > x - PRECISION 的點，再確認是否落在容許誤差內。
    fn index_of_x(&self, x: f64) -> Option<usize> {
        let start = self.x_values.partition_point(|&v| v <= x - PRECISION);
        (start < self.x_values.len() && approx_eq(self.x_values[start], x)).then_some(start)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.y_values.iter().position(|&v| approx_eq(v, y))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(
            self.x_values
                .iter()
                .zip(self.y_values.iter())
                .map(|(&x, &y)| Point::new(x, y))
        )
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        if self.x_values.is_empty() {
            return Err(TabulatedFunctionError::EmptyTable);
        }
        let not_greater = self.x_values.partition_point(|&v| v <= x);
        Ok(not_greater.saturating_sub(1))
    }
}

impl Insertable for ArrayTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), TabulatedFunctionError> {
        if x.is_nan() {
            return Err(TabulatedFunctionError::UnsortedInput { index: self.x_values.len() });
        }
        if let Some(index) = self.index_of_x(x) {
            self.y_values[index] = y;
            return Ok(());
        }

        let slot = self.x_values
            .iter()
            .position(|&v| v > x)
            .unwrap_or(self.x_values.len());
        self.x_values.insert(slot, x);
        self.y_values.insert(slot, y);
        trace!(x, y, slot, count = self.x_values.len(), "inserted point into array table");
        Ok(())
    }
}

impl Removable for ArrayTabulatedFunction {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        self.check_index(index)?;
        if self.x_values.len() == 1 {
            return Err(TabulatedFunctionError::EmptyTable);
        }
        self.x_values.remove(index);
        self.y_values.remove(index);
        trace!(index, count = self.x_values.len(), "removed point from array table");
        Ok(())
    }
}

impl MathFunction for ArrayTabulatedFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.apply(x)
    }
}
