//! Naming configuration for the compression-model builder.
//!
//! Values are resolved in this order, highest first:
//! 1. Environment variables (`QCOMPRESS_` prefix)
//! 2. Configuration file (YAML)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use qcompress_ir::{is_identifier, is_reserved_name};

use crate::error::{ModelError, ModelResult};

/// Environment variable overriding [`ModelConfig::model_suffix`].
pub const ENV_MODEL_SUFFIX: &str = "QCOMPRESS_MODEL_SUFFIX";
/// Environment variable overriding [`ModelConfig::ancilla_register`].
pub const ENV_ANCILLA_REGISTER: &str = "QCOMPRESS_ANCILLA_REGISTER";
/// Environment variable overriding [`ModelConfig::result_register`].
pub const ENV_RESULT_REGISTER: &str = "QCOMPRESS_RESULT_REGISTER";
/// Environment variable overriding [`ModelConfig::circuit_suffix`].
pub const ENV_CIRCUIT_SUFFIX: &str = "QCOMPRESS_CIRCUIT_SUFFIX";

/// Register and circuit names used when building a compression model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Appended to each original register name to name its model register.
    #[serde(default = "default_model_suffix")]
    pub model_suffix: String,

    /// Single-qubit register controlling the swap test.
    #[serde(default = "default_ancilla_register")]
    pub ancilla_register: String,

    /// Single-bit register receiving the swap-test measurement.
    #[serde(default = "default_result_register")]
    pub result_register: String,

    /// Appended to the input circuit name to name the result.
    #[serde(default = "default_circuit_suffix")]
    pub circuit_suffix: String,
}

fn default_model_suffix() -> String {
    "_model".into()
}

fn default_ancilla_register() -> String {
    "swap_tester".into()
}

fn default_result_register() -> String {
    "swap_test_result".into()
}

fn default_circuit_suffix() -> String {
    "_compression".into()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_suffix: default_model_suffix(),
            ancilla_register: default_ancilla_register(),
            result_register: default_result_register(),
            circuit_suffix: default_circuit_suffix(),
        }
    }
}

impl ModelConfig {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ModelResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ModelConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by any `QCOMPRESS_*` variables that are set,
    /// validated.
    pub fn from_env() -> ModelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ModelResult<Self> {
        let config = Self::default().merge_with(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Optional file, then environment overrides, then validation.
    pub fn load(config_file: Option<&Path>) -> ModelResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Override fields whose environment variable is set.
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_with(|key| std::env::var(key).ok())
    }

    fn merge_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_MODEL_SUFFIX) {
            self.model_suffix = v;
        }
        if let Some(v) = lookup(ENV_ANCILLA_REGISTER) {
            self.ancilla_register = v;
        }
        if let Some(v) = lookup(ENV_RESULT_REGISTER) {
            self.result_register = v;
        }
        if let Some(v) = lookup(ENV_CIRCUIT_SUFFIX) {
            self.circuit_suffix = v;
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ModelResult<()> {
        if self.model_suffix.is_empty() {
            return Err(ModelError::InvalidConfig(
                "model_suffix must not be empty".into(),
            ));
        }
        // The suffix is glued onto an identifier, so it only needs identifier
        // continuation characters.
        if !is_identifier(&format!("r{}", self.model_suffix)) {
            return Err(ModelError::InvalidConfig(format!(
                "model_suffix '{}' contains characters not allowed in a register name",
                self.model_suffix
            )));
        }

        for (key, name) in [
            ("ancilla_register", &self.ancilla_register),
            ("result_register", &self.result_register),
        ] {
            if !is_identifier(name) {
                return Err(ModelError::InvalidConfig(format!(
                    "{key} '{name}' is not a valid register name"
                )));
            }
            if is_reserved_name(name) {
                return Err(ModelError::InvalidConfig(format!(
                    "{key} '{name}' is a reserved name"
                )));
            }
        }

        // QASM shares one namespace between qubit and bit declarations.
        if self.ancilla_register == self.result_register {
            return Err(ModelError::InvalidConfig(format!(
                "ancilla_register and result_register are both '{}'",
                self.ancilla_register
            )));
        }

        Ok(())
    }
}
