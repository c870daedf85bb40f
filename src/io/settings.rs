use crate::defaults::*;
use crate::error::NetworkError;
use crate::network::Weighting;
use crate::transport::PseudoInverseOptions;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_threshold() -> f64 {
    THRESHOLD
}
fn default_weighting() -> Weighting {
    Weighting::from(WEIGHTED)
}
fn default_parallel() -> bool {
    PARALLEL
}
fn default_pinv_config() -> PseudoInverseOptions {
    PseudoInverseOptions::default()
}

/// Settings of the network analysis. Every field can be omitted in the TOML file, in this
/// case the value from [defaults](crate::defaults) is used.
///
/// ```toml
/// threshold = 0.005
/// weighting = "unweighted"
/// parallel = false
///
/// [pinv]
/// rtol_factor = 10.0
/// strict = true
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Configuration {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_weighting")]
    pub weighting: Weighting,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_pinv_config")]
    pub pinv: PseudoInverseOptions,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            threshold: default_threshold(),
            weighting: default_weighting(),
            parallel: default_parallel(),
            pinv: default_pinv_config(),
        }
    }
}

impl Configuration {
    /// Reads the configuration file from the working directory. If it does not exist the
    /// default settings are used.
    pub fn new() -> Result<Self> {
        let config_file_path: &Path = Path::new(CONFIG_FILE_NAME);
        if config_file_path.exists() {
            Self::from_file(config_file_path)
        } else {
            debug!("{} not found, using default settings", CONFIG_FILE_NAME);
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_string: String = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        Self::from_toml(&config_string)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(config_string: &str) -> Result<Self> {
        let config: Self = toml::from_str(config_string).context("unable to parse settings")?;
        config.check()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("unable to serialize settings")
    }

    /// Checks the values that cannot be expressed by the types alone.
    pub fn check(&self) -> Result<(), NetworkError> {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(NetworkError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
