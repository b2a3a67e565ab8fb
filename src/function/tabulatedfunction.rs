use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 比對 x、y 是否「相等」時使用的絕對容許誤差。
pub const PRECISION: f64 = 1e-10;

pub fn approx_eq(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < PRECISION
}

/// 通過 (left_x, left_y)、(right_x, right_y) 的直線在 x 的值。
///
/// 內插與兩端外推共用同一條公式。
pub fn interpolate(x: f64, left_x: f64, right_x: f64, left_y: f64, right_y: f64) -> f64 {
    left_y + (right_y - left_y) * (x - left_x) / (right_x - left_x)
}

/// 建構前的共同檢查：長度一致、非空、x 嚴格遞增。
pub fn validate_samples(x_values: &[f64], y_values: &[f64]) -> Result<(), TabulatedFunctionError> {
    if x_values.len() != y_values.len() {
        return Err(TabulatedFunctionError::LengthMismatch {
            x_len: x_values.len(),
            y_len: y_values.len()
        });
    }
    if x_values.is_empty() {
        return Err(TabulatedFunctionError::EmptyTable);
    }
    for i in 1..x_values.len() {
        // `!(a > b)` 也會擋下 NaN
        if !(x_values[i] > x_values[i - 1]) {
            return Err(TabulatedFunctionError::UnsortedInput { index: i });
        }
    }
    Ok(())
}

/// 在 [x_from, x_to] 上等距取 `count` 個點並對 `source` 求值。
///
/// - `x_from > x_to` 時兩端對調。
/// - `x_from == x_to` 時所有取樣點重合，收斂為單一點。
/// - 區間過窄、相鄰取樣點捨入後重合時，回傳 `UnsortedInput`。
pub fn sample_function<F>(source: &F,
                          x_from: f64,
                          x_to: f64,
                          count: usize) -> Result<(Vec<f64>, Vec<f64>), TabulatedFunctionError>
    where F: MathFunction + ?Sized {
    if count < 2 {
        return Err(TabulatedFunctionError::TooFewPoints { required: 2, actual: count });
    }
    if !x_from.is_finite() || !x_to.is_finite() {
        return Err(TabulatedFunctionError::NonFiniteBound { from: x_from, to: x_to });
    }
    let (from, to) = if x_from > x_to { (x_to, x_from) } else { (x_from, x_to) };
    if from == to {
        return Ok((vec![from], vec![source.value(from)?]));
    }

    let step = (to - from) / (count - 1) as f64;
    let x_values: Vec<f64> = (0..count)
        .map(|i| if i == count - 1 { to } else { from + step * i as f64 })
        .collect();
    let y_values = x_values
        .iter()
        .map(|&x| source.value(x))
        .collect::<Result<Vec<f64>, TabulatedFunctionError>>()?;
    validate_samples(&x_values, &y_values)?;
    Ok((x_values, y_values))
}

/// 表列函數的共同契約。
///
/// `apply` 的判斷順序固定為：左外推 → 右外推 → 精確命中 → floor 內插。
/// `x == right_bound()` 視為精確命中，不會走外推。
pub trait TabulatedFunction {
    fn count(&self) -> usize;

    fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError>;

    fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError>;

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedFunctionError>;

    fn index_of_x(&self, x: f64) -> Option<usize>;

    fn index_of_y(&self, y: f64) -> Option<usize>;

    /// 依 x 遞增順序產生點的副本；每次呼叫都從第 0 個點重新開始。
    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_>;

    fn left_bound(&self) -> Result<f64, TabulatedFunctionError> {
        if self.count() == 0 {
            return Err(TabulatedFunctionError::EmptyTable);
        }
        self.x(0)
    }

    fn right_bound(&self) -> Result<f64, TabulatedFunctionError> {
        let count = self.count();
        if count == 0 {
            return Err(TabulatedFunctionError::EmptyTable);
        }
        self.x(count - 1)
    }

    /// 最大的 i 使得 x(i) <= x。
    ///
    /// x 小於左邊界時回傳 0，x 大於等於右邊界時回傳 count - 1。
    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        let count = self.count();
        if count == 0 {
            return Err(TabulatedFunctionError::EmptyTable);
        }
        for i in 1..count {
            if self.x(i)? > x {
                return Ok(i - 1);
            }
        }
        Ok(count - 1)
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        if self.count() == 1 {
            return self.y(0);
        }
        Ok(interpolate(x, self.x(0)?, self.x(1)?, self.y(0)?, self.y(1)?))
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        let count = self.count();
        if count == 1 {
            return self.y(0);
        }
        Ok(interpolate(x,
                       self.x(count - 2)?,
                       self.x(count - 1)?,
                       self.y(count - 2)?,
                       self.y(count - 1)?))
    }

    fn interpolate_at(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        let count = self.count();
        if count == 1 {
            return self.y(0);
        }
        let i = floor_index.min(count - 2);
        Ok(interpolate(x, self.x(i)?, self.x(i + 1)?, self.y(i)?, self.y(i + 1)?))
    }

    fn apply(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        if x < self.left_bound()? {
            self.extrapolate_left(x)
        } else if x > self.right_bound()? {
            self.extrapolate_right(x)
        } else if let Some(index) = self.index_of_x(x) {
            self.y(index)
        } else {
            let floor_index = self.floor_index_of_x(x)?;
            self.interpolate_at(x, floor_index)
        }
    }

    fn points(&self) -> Vec<Point> {
        self.iter().collect()
    }
}

/// 可插入新取樣點的表格。
pub trait Insertable {
    /// 已有 x 相同（容許誤差內）的點時只覆寫 y，否則依排序位置插入。
    fn insert(&mut self, x: f64, y: f64) -> Result<(), TabulatedFunctionError>;
}

/// 可移除取樣點的表格。
pub trait Removable {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedFunctionError>;
}

pub trait MutableTabulatedFunction: TabulatedFunction + Insertable + Removable {}

impl<T> MutableTabulatedFunction for T where
    T: TabulatedFunction + Insertable + Removable + ?Sized {}

// ─────────────────────────────────────────────
// Box / &mut 轉發
// ─────────────────────────────────────────────

impl<T> TabulatedFunction for Box<T> where
    T: TabulatedFunction + ?Sized {
    fn count(&self) -> usize                                  { (**self).count() }
    fn x(&self, i: usize) -> Result<f64, TabulatedFunctionError> { (**self).x(i) }
    fn y(&self, i: usize) -> Result<f64, TabulatedFunctionError> { (**self).y(i) }
    fn index_of_x(&self, x: f64) -> Option<usize>             { (**self).index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>             { (**self).index_of_y(y) }
    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_>    { (**self).iter() }
    fn left_bound(&self) -> Result<f64, TabulatedFunctionError>  { (**self).left_bound() }
    fn right_bound(&self) -> Result<f64, TabulatedFunctionError> { (**self).right_bound() }
    fn apply(&self, x: f64) -> Result<f64, TabulatedFunctionError> { (**self).apply(x) }

    fn set_y(&mut self, i: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        (**self).set_y(i, value)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        (**self).floor_index_of_x(x)
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        (**self).extrapolate_left(x)
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        (**self).extrapolate_right(x)
    }

    fn interpolate_at(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        (**self).interpolate_at(x, floor_index)
    }
}

impl<T> Insertable for Box<T> where
    T: Insertable + ?Sized {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), TabulatedFunctionError> {
        (**self).insert(x, y)
    }
}

impl<T> Removable for Box<T> where
    T: Removable + ?Sized {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        (**self).remove(index)
    }
}

impl<T> TabulatedFunction for &mut T where
    T: TabulatedFunction + ?Sized {
    fn count(&self) -> usize                                  { (**self).count() }
    fn x(&self, i: usize) -> Result<f64, TabulatedFunctionError> { (**self).x(i) }
    fn y(&self, i: usize) -> Result<f64, TabulatedFunctionError> { (**self).y(i) }
    fn index_of_x(&self, x: f64) -> Option<usize>             { (**self).index_of_x(x) }
    fn index_of_y(&self, y: f64) -> Option<usize>             { (**self).index_of_y(y) }
    fn iter(&self) -> Box<dyn Iterator<Item = Point> + '_>    { (**self).iter() }
    fn left_bound(&self) -> Result<f64, TabulatedFunctionError>  { (**self).left_bound() }
    fn right_bound(&self) -> Result<f64, TabulatedFunctionError> { (**self).right_bound() }
    fn apply(&self, x: f64) -> Result<f64, TabulatedFunctionError> { (**self).apply(x) }

    fn set_y(&mut self, i: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        (**self).set_y(i, value)
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedFunctionError> {
        (**self).floor_index_of_x(x)
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        (**self).extrapolate_left(x)
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        (**self).extrapolate_right(x)
    }

    fn interpolate_at(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        (**self).interpolate_at(x, floor_index)
    }
}

impl<T> Insertable for &mut T where
    T: Insertable + ?Sized {
    fn insert(&mut self, x: f64, y: f64) -> Result<(), TabulatedFunctionError> {
        (**self).insert(x, y)
    }
}

impl<T> Removable for &mut T where
    T: Removable + ?Sized {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        (**self).remove(index)
    }
}
