use std::io::{
    Read,
    Write
};

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error(transparent)]
    Function(#[from] TabulatedFunctionError)
}

/// 表格的可攜表示：x、y 兩個等長陣列。
///
/// 還原時一律經過 factory，與直接建構做同樣的驗證。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSequence {
    x_values: Vec<f64>,
    y_values: Vec<f64>
}

impl PointSequence {
    pub fn from_function<T>(function: &T) -> PointSequence
        where T: TabulatedFunction + ?Sized {
        let (x_values, y_values) = function
            .iter()
            .map(|pt| (pt.x(), pt.y()))
            .unzip();
        PointSequence { x_values, y_values }
    }

    pub fn count(&self) -> usize {
        self.x_values.len()
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    pub fn into_function<F>(&self, factory: &F) -> Result<F::Output, TabulatedFunctionError>
        where F: TabulatedFunctionFactory {
        factory.create(&self.x_values, &self.y_values)
    }
}

pub fn write_json<T, W>(function: &T, writer: W) -> Result<(), SerializationError>
    where T: TabulatedFunction + ?Sized,
          W: Write {
    serde_json::to_writer(writer, &PointSequence::from_function(function))?;
    Ok(())
}

pub fn read_json<F, R>(reader: R, factory: &F) -> Result<F::Output, SerializationError>
    where F: TabulatedFunctionFactory,
          R: Read {
    let sequence: PointSequence = serde_json::from_reader(reader)?;
    Ok(sequence.into_function(factory)?)
}
