use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::function::mathfunction::MathFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedListTabulatedFunctionFactory;

impl TabulatedFunctionFactory for LinkedListTabulatedFunctionFactory {
    type Output = LinkedListTabulatedFunction;

    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError> {
        LinkedListTabulatedFunction::from_slices(x_values, y_values)
    }

    fn create_from_function<F>(&self,
                               source: &F,
                               x_from: f64,
                               x_to: f64,
                               count: usize) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError>
        where F: MathFunction + ?Sized {
        LinkedListTabulatedFunction::from_function(source, x_from, x_to, count)
    }
}
