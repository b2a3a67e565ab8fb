use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    Insertable,
    Removable,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 唯讀的表列函數：`set_y`、插入、移除一律回傳 `ModificationForbidden`。
///
/// 迭代產生的是點的副本，無法透過迭代器修改表格。
pub struct UnmodifiableTabulatedFunction<T> {
    inner: T
}

impl<T> UnmodifiableTabulatedFunction<T> where
    T: TabulatedFunction {
    pub fn new(inner: T) -> UnmodifiableTabulatedFunction<T> {
        UnmodifiableTabulatedFunction { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> TabulatedFunction for UnmodifiableTabulatedFunction<T> where
    T: TabulatedFunction {
    fn count(&self) -> usize                                        { self.inner.count() }
    fn x(&self, i: usize) -> Result<f64, TabulatedFunctionError>    { self.inner.x(i) }
    fn y(&self, i: usize) -> Result<f64, TabulatedFunctionError>    { self.inner.y(i) }
    fn index_of_x(&self, x: f64) -> Option<usize>                   { self.inner.index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>                   { self.inner.index_of_y(y) }
    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_>          { self.inner.iter() }
    fn left_bound(&self) -> Result<f64, TabulatedFunctionError>     { self.inner.left_bound() }
    fn right_bound(&self) -> Result<f64, TabulatedFunctionError>    { self.inner.right_bound() }
    fn apply(&self, x: f64) -> Result<f64, TabulatedFunctionError>  { self.inner.apply(x) }

    fn set_y(&mut self, _i: usize, _value: f64) -> Result<(), TabulatedFunctionError> {
        Err(TabulatedFunctionError::ModificationForbidden)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        self.inner.floor_index_of_x(x)
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.inner.extrapolate_left(x)
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.inner.extrapolate_right(x)
    }

    fn interpolate_at(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        self.inner.interpolate_at(x, floor_index)
    }
}

impl<T> Insertable for UnmodifiableTabulatedFunction<T> where
    T: TabulatedFunction {
    fn insert(&mut self, _x: f64, _y: f64) -> Result<(), TabulatedFunctionError> {
        Err(TabulatedFunctionError::ModificationForbidden)
    }
}

impl<T> Removable for UnmodifiableTabulatedFunction<T> where
    T: TabulatedFunction {
    fn remove(&mut self, _index: usize) -> Result<(), TabulatedFunctionError> {
        Err(TabulatedFunctionError::ModificationForbidden)
    }
}

impl<T> MathFunction for UnmodifiableTabulatedFunction<T> where
    T: TabulatedFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.apply(x)
    }
}
