use thiserror::Error;

/// 表列函數（tabulated function）相關運算的錯誤。
///
/// 所有驗證都在違規當下立即回報給呼叫端，不做任何重試。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabulatedFunctionError {
    #[error("x and y arrays differ in length ({x_len} vs {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("x values must be strictly increasing (violated at index {index})")]
    UnsortedInput { index: usize },

    #[error("operation requires a non-empty table")]
    EmptyTable,

    #[error("at least {required} points are required, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("index {index} is out of range for a table of {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("interpolation at x = {x} is forbidden on a strict table")]
    InterpolationForbidden { x: f64 },

    #[error("table is unmodifiable")]
    ModificationForbidden,

    #[error("differentiation step must be positive and finite, got {step}")]
    InvalidStep { step: f64 },

    #[error("sampling bounds must be finite, got [{from}, {to}]")]
    NonFiniteBound { from: f64, to: f64 },

    #[error("invalid integration range [{from}, {to}]")]
    InvalidRange { from: f64, to: f64 },

    #[error("number of subdivisions must be positive, got {subdivisions}")]
    InvalidSubdivisions { subdivisions: i64 },

    #[error("derivative vanishes or is undefined at x = {x}")]
    DivergentOrUndefinedDerivative { x: f64 },

    #[error("no convergence after {iterations} iterations")]
    NoConvergence { iterations: usize },

    #[error("division by zero at index {index} (x = {x})")]
    ArithmeticDomainError { index: usize, x: f64 },

    #[error("tables are inconsistent: {reason}")]
    InconsistentTables { reason: String },

    #[error("worker pool error: {0}")]
    WorkerPool(String),
}
