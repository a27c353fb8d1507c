//! Configuration types for `gdx-lower.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::naming::NamingPolicy;

/// Root configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    /// Which identifier contexts get reserved-word substitution.
    #[serde(default)]
    pub naming: NamingPolicy,
    #[serde(default)]
    pub native_structure: Vec<NativeStructureConfig>,
    #[serde(default)]
    pub class_enum: Vec<ClassEnumConfig>,
}

/// Output file settings.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output file path (e.g. `native_structures.go`).
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
    /// Go package name written at the top of the file.
    #[serde(default = "default_package")]
    pub package: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            package: default_package(),
        }
    }
}

fn default_output_file() -> PathBuf {
    PathBuf::from("generated.go")
}

fn default_package() -> String {
    "gdextension".to_string()
}

/// A native structure — name plus its raw layout string.
///
/// ```toml
/// [[native_structure]]
/// name = "AudioFrame"
/// format = "float left;float right"
/// ```
#[derive(Debug, Deserialize)]
pub struct NativeStructureConfig {
    pub name: String,
    pub format: String,
}

/// An enum scoped to a class, emitted as typed screaming-snake constants.
#[derive(Debug, Deserialize)]
pub struct ClassEnumConfig {
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValueConfig>,
}

#[derive(Debug, Deserialize)]
pub struct EnumValueConfig {
    pub name: String,
    pub value: i64,
}

/// Load and parse a `gdx-lower.toml` configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    parse_config(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
