use crate::domain::config::Config;
use crate::domain::constants::DEFAULT_CONFIG_FILE;
use crate::error::UpkeepError;
use std::path::{Path, PathBuf};

/// Project root plus the loaded configuration.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

#[derive(Debug, Clone, Copy)]
pub enum Tool {
    Git,
    Docker,
    Python,
}

impl Workspace {
    pub fn load(root: Option<&Path>, config: Option<&Path>) -> anyhow::Result<Self> {
        let root = match root {
            Some(r) => r.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let config = match config {
            Some(path) => load_config(path)?,
            None => {
                let default = root.join(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    load_config(&default)?
                } else {
                    tracing::debug!("no config file, using stock tables");
                    Config::default()
                }
            }
        };
        Ok(Self { root, config })
    }

    /// Resolve a configured path against the root. Absolute paths pass through.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.path(&self.config.notes_dir)
    }

    /// Binary for an external tool; `UPKEEP_<TOOL>` overrides the config.
    pub fn tool(&self, tool: Tool) -> String {
        let (var, configured) = match tool {
            Tool::Git => ("UPKEEP_GIT", &self.config.tools.git),
            Tool::Docker => ("UPKEEP_DOCKER", &self.config.tools.docker),
            Tool::Python => ("UPKEEP_PYTHON", &self.config.tools.python),
        };
        std::env::var(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| configured.clone())
    }

    /// Path relative to the root for display, falling back to the full path.
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| UpkeepError::Config(path.to_path_buf(), e.to_string()))?;
    let config: Config =
        toml::from_str(&raw).map_err(|e| UpkeepError::Config(path.to_path_buf(), e.to_string()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_sections_fall_back_to_stock_tables() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("upkeep.toml"),
            "notes_dir = \"vault\"\n[containers]\nimportant = [\"keepme\"]\n",
        )
        .unwrap();
        let ws = Workspace::load(Some(tmp.path()), None).unwrap();
        assert_eq!(ws.notes_dir(), tmp.path().join("vault"));
        assert_eq!(ws.config.containers.important, vec!["keepme".to_string()]);
        assert_eq!(ws.config.containers.min_token_len, 3);
        assert!(!ws.config.imports.rules.is_empty());
    }

    #[test]
    fn unknown_top_level_key_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "bogus = 1\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert_eq!(crate::error::error_code(&err), "CONFIG_INVALID");
    }

    #[test]
    fn stock_config_has_no_literal_secrets() {
        let config = Config::default();
        assert!(config
            .env
            .assign
            .iter()
            .all(|a| a.value.is_none() && a.from_env.is_some()));
    }
}
