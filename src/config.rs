use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

pub const DEFAULT_CONFIG_FILE: &str = "hufftext.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: String,
    pub root_directory: PathBuf,
    pub compressed_extension: String,
    pub decoded_extension: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "hufftext=info".to_string(),
            root_directory: PathBuf::from("."),
            compressed_extension: "huff".to_string(),
            decoded_extension: "txt".to_string(),
        }
    }
}

impl CliConfig {
    /// Reads the config file if present, defaults otherwise.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)
                .with_context(|| format!("reading config {}", config_file))?;
            let config: CliConfig = toml::from_str(&content)
                .with_context(|| format!("parsing config {}", config_file))?;
            Ok(config)
        } else if config_path.is_some() {
            anyhow::bail!("config file {} not found", config_file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("writing config {}", config_path))?;
        Ok(())
    }

    /// `input.txt` -> `input.txt.huff`
    pub fn compressed_name(&self, input: &str) -> String {
        format!("{}.{}", input, self.compressed_extension)
    }

    /// `input.txt.huff` -> `input.txt`, anything else gets the decoded extension appended.
    pub fn decoded_name(&self, input: &str) -> String {
        let suffix = format!(".{}", self.compressed_extension);
        match input.strip_suffix(&suffix) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{}.{}", input, self.decoded_extension),
        }
    }
}
