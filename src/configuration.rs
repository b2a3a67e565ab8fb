use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::concurrent::parallelintegrator::{
    ParallelIntegrator,
    DEFAULT_SEQUENTIAL_THRESHOLD
};
use crate::function::factory::tabulatedfunctionfactory::BackendKind;
use crate::function::tabulatedfunctionerror::TabulatedFunctionError;
use crate::operator::steppingdifferentialoperator::{
    SteppingDifferentialOperator,
    SteppingScheme,
    DEFAULT_STEP
};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error(transparent)]
    Function(#[from] TabulatedFunctionError)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntegrationConfiguration {
    sequential_threshold: usize,
    worker_threads: Option<usize>
}

impl Default for IntegrationConfiguration {
    fn default() -> Self {
        IntegrationConfiguration {
            sequential_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
            worker_threads: None
        }
    }
}

impl IntegrationConfiguration {
    pub fn sequential_threshold(&self) -> usize {
        self.sequential_threshold
    }

    pub fn worker_threads(&self) -> Option<usize> {
        self.worker_threads
    }
}

/// JSON 設定檔，缺少的欄位使用預設值：
///
/// ```json
/// {
///     "backend": "linked_list",
///     "integration": { "sequential_threshold": 1000, "worker_threads": 4 },
///     "differential_step": 1e-6,
///     "differential_scheme": "middle"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    backend: BackendKind,
    integration: IntegrationConfiguration,
    differential_step: f64,
    differential_scheme: SteppingScheme
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            backend: BackendKind::default(),
            integration: IntegrationConfiguration::default(),
            differential_step: DEFAULT_STEP,
            differential_scheme: SteppingScheme::Middle
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader<P>(file_path: P) -> Result<Configuration, ConfigurationError>
        where P: AsRef<Path> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn integration(&self) -> &IntegrationConfiguration {
        &self.integration
    }

    pub fn integrator(&self) -> Result<ParallelIntegrator, ConfigurationError> {
        let threshold = self.integration.sequential_threshold;
        Ok(match self.integration.worker_threads {
            Some(threads) => ParallelIntegrator::with_worker_threads(threshold, threads)?,
            None => ParallelIntegrator::new(threshold)
        })
    }

    pub fn stepping_operator(&self) -> Result<SteppingDifferentialOperator, ConfigurationError> {
        Ok(SteppingDifferentialOperator::new(self.differential_step, self.differential_scheme)?)
    }
}
