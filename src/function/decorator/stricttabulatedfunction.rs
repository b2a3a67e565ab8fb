use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    Insertable,
    Removable,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 禁止內插與外推的表列函數：只有 x 精確命中取樣點時 `apply` 才會成功。
///
/// 其餘操作（包含 `set_y`、插入、移除）原樣轉發給內層。
pub struct StrictTabulatedFunction<T> {
    inner: T
}

impl<T> StrictTabulatedFunction<T> where
    T: TabulatedFunction {
    pub fn new(inner: T) -> StrictTabulatedFunction<T> {
        StrictTabulatedFunction { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> TabulatedFunction for StrictTabulatedFunction<T> where
    T: TabulatedFunction {

    // ── delegate 方法 ────────────────────────────────────────────────────────

    fn count(&self) -> usize                                        { self.inner.count() }
    fn x(&self, i: usize) -> Result<f64, TabulatedFunctionError>    { self.inner.x(i) }
    fn y(&self, i: usize) -> Result<f64, TabulatedFunctionError>    { self.inner.y(i) }
    fn index_of_x(&self, x: f64) -> Option<usize>                   { self.inner.index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>                   { self.inner.index_of_y(y) }
    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_>          { self.inner.iter() }
    fn left_bound(&self) -> Result<f64, TabulatedFunctionError>     { self.inner.left_bound() }
    fn right_bound(&self) -> Result<f64, TabulatedFunctionError>    { self.inner.right_bound() }

    fn set_y(&mut self, i: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        self.inner.set_y(i, value)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        self.inner.floor_index_of_x(x)
    }

    // ── 限制 ─────────────────────────────────────────────────────────────────

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        Err(TabulatedFunctionError::InterpolationForbidden { x })
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        Err(TabulatedFunctionError::InterpolationForbidden { x })
    }

    fn interpolate_at(&self, x: f64, _floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        Err(TabulatedFunctionError::InterpolationForbidden { x })
    }

    fn apply(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        match self.inner.index_of_x(x) {
            Some(index) => self.inner.apply(self.inner.x(index)?),
            None => Err(TabulatedFunctionError::InterpolationForbidden { x })
        }
    }
}

impl<T> Insertable for StrictTabulatedFunction<T> where
    T: TabulatedFunction + Insertable {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), TabulatedFunctionError> {
        self.inner.insert(x, y)
    }
}

impl<T> Removable for StrictTabulatedFunction<T> where
    T: TabulatedFunction + Removable {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        self.inner.remove(index)
    }
}

impl<T> MathFunction for StrictTabulatedFunction<T> where
    T: TabulatedFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.apply(x)
    }
}
