use tracing::debug;

use crate::function::decorator::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 在既有的 x 網格上對表列函數做數值微分。
///
/// 取樣間距 h 取自第一個區間（假設等距）：
///
///   count == 2：兩端都是同一個斜率
///   左端：  (-3·y[0] + 4·y[1] - y[2]) / (2h)
///   右端：  ( 3·y[n] - 4·y[n-1] + y[n-2]) / (2h)
///   內部：  (y[i+1] - y[i-1]) / (2h)
///
/// 結果由 factory 建立，呼叫端可自行選擇輸出的儲存方式。
pub struct TabulatedDifferentialOperator<F> {
    factory: F
}

impl<F> TabulatedDifferentialOperator<F> where
    F: TabulatedFunctionFactory {
    pub fn new(factory: F) -> TabulatedDifferentialOperator<F> {
        TabulatedDifferentialOperator { factory }
    }

    pub fn derive<T>(&self, function: &T) -> Result<F::Output, TabulatedFunctionError>
        where T: TabulatedFunction + ?Sized {
        let (x_values, y_values): (Vec<f64>, Vec<f64>) = function
            .iter()
            .map(|pt| (pt.x(), pt.y()))
            .unzip();
        let n = x_values.len();
        if n < 2 {
            return Err(TabulatedFunctionError::TooFewPoints { required: 2, actual: n });
        }

        let h = x_values[1] - x_values[0];
        let derivatives: Vec<f64> = if n == 2 {
            let slope = (y_values[1] - y_values[0]) / h;
            vec![slope, slope]
        } else {
            (0..n)
                .map(|i| match i {
                    0 => (-3.0 * y_values[0] + 4.0 * y_values[1] - y_values[2]) / (2.0 * h),
                    i if i == n - 1 => (3.0 * y_values[n - 1] - 4.0 * y_values[n - 2] + y_values[n - 3]) / (2.0 * h),
                    i => (y_values[i + 1] - y_values[i - 1]) / (2.0 * h)
                })
                .collect()
        };
        debug!(count = n, step = h, "derived tabulated function");
        self.factory.create(&x_values, &derivatives)
    }

    /// 在 `function` 的 lock 內完成整個微分，期間其他執行緒無法修改它。
    pub fn derive_synchronously<T>(&self,
                                   function: &SynchronizedTabulatedFunction<T>) -> Result<F::Output, TabulatedFunctionError>
        where T: TabulatedFunction {
        function.run_exclusive(|inner| self.derive(&*inner))
    }
}
