use std::sync::Arc;

use tracing::debug;

use crate::function::decorator::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 把共享表格的每個 y 乘上 `factor`。
///
/// 每一點的「讀取 → 相乘 → 寫回」都在 `run_exclusive` 內完成，
/// 多個任務同時執行時結果等同於依序套用所有係數。
pub struct MultiplyingTask<T> {
    table: Arc<SynchronizedTabulatedFunction<T>>,
    factor: f64
}

impl<T> MultiplyingTask<T> where
    T: TabulatedFunction {
    pub fn new(table: Arc<SynchronizedTabulatedFunction<T>>, factor: f64) -> MultiplyingTask<T> {
        MultiplyingTask { table, factor }
    }

    pub fn run(&self) -> Result<(), TabulatedFunctionError> {
        let count = self.table.count();
        for index in 0..count {
            self.table.run_exclusive(|inner| {
                let y = inner.y(index)?;
                inner.set_y(index, y * self.factor)
            })?;
        }
        debug!(count, factor = self.factor, "multiplying task finished");
        Ok(())
    }
}
