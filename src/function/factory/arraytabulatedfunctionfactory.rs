use crate::function::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayTabulatedFunctionFactory;

impl TabulatedFunctionFactory for ArrayTabulatedFunctionFactory {
    type Output = ArrayTabulatedFunction;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> {
        ArrayTabulatedFunction::from_slices(x_values, y_values)
    }

    fn create_from_function<F>(&self,
                               source: &F,
                               x_from: f64,
                               x_to: f64,
                               count: usize) -> Result<ArrayTabulatedFunction, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        ArrayTabulatedFunction::from_function(source, x_from, x_to, count)
    }
}
