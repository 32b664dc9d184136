use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `~/.qsim/config.toml` (or `--config FILE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QsimConfig {
    /// Number of registers in a fresh computer.
    pub registers: usize,
    /// Register side length; each register is `side`x`side`.
    pub side: usize,
    /// Register the tracing handler next to the semantic ones.
    pub trace: bool,
    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub prompt: String,
}

impl Default for QsimConfig {
    fn default() -> Self {
        Self {
            registers: 16,
            side: 3,
            trace: false,
            log_level: "warn".to_string(),
            prompt: "qsim".to_string(),
        }
    }
}

impl QsimConfig {
    /// Loads the file at `path`; a missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let cfg: QsimConfig = toml::from_str(&text)
            .with_context(|| format!("Parse config {}", path.display()))?;
        anyhow::ensure!(cfg.side >= 1, "config {}: side must be at least 1", path.display());
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let text = toml::to_string_pretty(self).context("Serialize config")?;
        std::fs::write(path, text).with_context(|| format!("Write config {}", path.display()))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.qsim/config.toml
    dirs_next::home_dir().map(|h| h.join(".qsim").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Create config parent dir {}", parent.display()))?;
    }
    Ok(())
}
