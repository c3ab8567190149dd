use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "hmi.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub color: bool,
    pub fail_on: FailOn,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
            fail_on: FailOn::None,
        }
    }
}

/// When a successful calculation should still exit non-zero.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    #[default]
    None,
    Sla,
    Critical,
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Sla => write!(f, "sla"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
            source: Some(local_path),
        });
    }

    debug!("no {CONFIG_FILE_NAME} found, using defaults");
    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
    })
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    debug!(path = %path.display(), fail_on = %config.general.fail_on, "loaded config");
    Ok(config)
}
