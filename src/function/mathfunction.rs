use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 連續函數 f: f64 → f64。
///
/// 求值可能失敗（例如表格被限制為 strict），失敗會原封不動地傳回呼叫端。
pub trait MathFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError>;

    /// 合成函數：先套用 `self` 再套用 `after`，即 after(self(x))。
    fn and_then<G>(self, after: G) -> CompositeFunction<Self, G>
        where Self: Sized,
              G: MathFunction {
        CompositeFunction::new(self, after)
    }
}

impl<F> MathFunction for F where
    F: Fn(f64) -> f64 {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        Ok(self(x))
    }
}

/// 包裝一個可能失敗的 closure。
pub struct FallibleFunction<F> {
    inner: F
}

impl<F> FallibleFunction<F> where
    F: Fn(f64) -> Result<f64, TabulatedFunctionError> {
    pub fn new(inner: F) -> FallibleFunction<F> {
        FallibleFunction { inner }
    }
}

impl<F> MathFunction for FallibleFunction<F> where
    F: Fn(f64) -> Result<f64, TabulatedFunctionError> {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        (self.inner)(x)
    }
}

pub struct CompositeFunction<F, G> {
    first: F,
    second: G
}

impl<F, G> CompositeFunction<F, G> where
    F: MathFunction,
    G: MathFunction {
    pub fn new(first: F, second: G) -> CompositeFunction<F, G> {
        CompositeFunction { first, second }
    }
}

impl<F, G> MathFunction for CompositeFunction<F, G> where
    F: MathFunction,
    G: MathFunction {
    fn value(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.second.value(self.first.value(x)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_math_function() {
        let sqr = |x: f64| x * x;
        assert_eq!(sqr.value(3.0), Ok(9.0));
    }

    #[test]
    fn composite_applies_in_order() {
        let f = (|x: f64| x + 1.0).and_then(|x: f64| x * 10.0);
        assert_eq!(f.value(2.0), Ok(30.0));
    }

    #[test]
    fn fallible_function_propagates_error() {
        let f = FallibleFunction::new(|x: f64| {
            if x < 0.0 {
                Err(TabulatedFunctionError::InvalidRange { from: x, to: 0.0 })
            } else {
                Ok(x.sqrt())
            }
        });
        assert_eq!(f.value(4.0), Ok(2.0));
        assert!(f.value(-1.0).is_err());
        let g = f.and_then(|x: f64| x + 1.0);
        assert!(g.value(-1.0).is_err());
    }
}
