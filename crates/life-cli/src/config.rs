//! Configuration loading and typed config structures for the `life` binary.
//!
//! Settings live in an optional `life-config.yaml`. Every field has a
//! default, so a missing file or a partial file is fine. Command-line
//! arguments override whatever the file says.

use std::path::{Path, PathBuf};

use life_engine::BoundaryPolicy;
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "life-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `life-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LifeConfig {
    /// Generation count and neighbor rules.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Input and output grid files.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Random initial grid parameters.
    #[serde(default)]
    pub random: RandomConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LifeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_PATH`] if it exists,
    /// else defaults.
    ///
    /// An explicitly named file must exist.
    ///
    /// # Errors
    ///
    /// Any error from [`LifeConfig::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Generations to compute.
    #[serde(default = "default_iterations")]
    pub iterations: u64,

    /// Edge handling for neighbor counts.
    #[serde(default)]
    pub boundary: BoundaryPolicy,

    /// Print the initial and final grids to stdout.
    #[serde(default)]
    pub dump: bool,

    /// Write the final grid to the output path.
    #[serde(default = "default_true")]
    pub save: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            boundary: BoundaryPolicy::default(),
            dump: false,
            save: true,
        }
    }
}

/// Grid file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    /// Grid to load.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Where the final grid is written.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

/// Parameters for generated initial grids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RandomConfig {
    /// Probability that a generated cell starts alive.
    #[serde(default = "default_density")]
    pub density: f64,

    /// Seed for generated grids; drawn at random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            seed: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_iterations() -> u64 {
    3
}

fn default_input() -> PathBuf {
    PathBuf::from("examples/input.npy")
}

fn default_output() -> PathBuf {
    PathBuf::from("output/out.npy")
}

const fn default_density() -> f64 {
    0.3
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
