use serde::{
    Deserialize,
    Serialize
};

use crate::function::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::function::decorator::stricttabulatedfunction::StrictTabulatedFunction;
use crate::function::decorator::unmodifiabletabulatedfunction::UnmodifiableTabulatedFunction;
use crate::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunction::MutableTabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

/// 由原始取樣資料建出具體的表列函數。
///
/// 微分運算、逐點運算與反序列化都透過 factory 產出結果，
/// 呼叫端因此可以自行決定輸出使用哪一種儲存方式。
/// `create` 的驗證與直接建構完全相同。
pub trait TabulatedFunctionFactory {
    type Output: MutableTabulatedFunction;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<Self::Output, TabulatedFunctionError>;

    fn create_from_function<F>(&self,
                               source: &F,
                               x_from: f64,
                               x_to: f64,
                               count: usize) -> Result<Self::Output, TabulatedFunctionError>
        where F: MathFunction + ?Sized;

    fn create_strict(&self,
                     x_values: &[f64],
                     y_values: &[f64]) -> Result<StrictTabulatedFunction<Self::Output>, TabulatedFunctionError> {
        Ok(StrictTabulatedFunction::new(self.create(x_values, y_values)?))
    }

    fn create_unmodifiable(&self,
                           x_values: &[f64],
                           y_values: &[f64]) -> Result<UnmodifiableTabulatedFunction<Self::Output>, TabulatedFunctionError> {
        Ok(UnmodifiableTabulatedFunction::new(self.create(x_values, y_values)?))
    }

    fn create_strict_unmodifiable(&self,
                                  x_values: &[f64],
                                  y_values: &[f64]) -> Result<StrictTabulatedFunction<UnmodifiableTabulatedFunction<Self::Output>>, TabulatedFunctionError> {
        Ok(StrictTabulatedFunction::new(self.create_unmodifiable(x_values, y_values)?))
    }
}

/// 執行期（例如由設定檔）決定的儲存方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Array,
    LinkedList
}

impl BackendKind {
    pub fn create(&self,
                  x_values: &[f64],
                  y_values: &[f64]) -> Result<Box<dyn MutableTabulatedFunction + Send>, TabulatedFunctionError> {
        let table: Box<dyn MutableTabulatedFunction + Send> = match self {
            BackendKind::Array => Box::new(ArrayTabulatedFunction::from_slices(x_values, y_values)?),
            BackendKind::LinkedList => Box::new(LinkedListTabulatedFunction::from_slices(x_values, y_values)?)
        };
        Ok(table)
    }

    pub fn create_from_function<F>(&self,
                                   source: &F,
                                   x_from: f64,
                                   x_to: f64,
                                   count: usize) -> Result<Box<dyn MutableTabulatedFunction + Send>, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        let table: Box<dyn MutableTabulatedFunction + Send> = match self {
            BackendKind::Array => Box::new(ArrayTabulatedFunction::from_function(source, x_from, x_to, count)?),
            BackendKind::LinkedList => Box::new(LinkedListTabulatedFunction::from_function(source, x_from, x_to, count)?)
        };
        Ok(table)
    }
}

impl TabulatedFunctionFactory for BackendKind {
    type Output = Box<dyn MutableTabulatedFunction + Send>;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<Self::Output, TabulatedFunctionError> {
        BackendKind::create(self, x_values, y_values)
    }

    fn create_from_function<F>(&self,
                               source: &F,
                               x_from: f64,
                               x_to: f64,
                               count: usize) -> Result<Self::Output, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        BackendKind::create_from_function(self, source, x_from, x_to, count)
    }
}
