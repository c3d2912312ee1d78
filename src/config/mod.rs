use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};

const APP_DOMAIN: &str = "io";
const APP_ORG: &str = "Gotion";
const APP_NAME: &str = "gotion";
const VAULT_DIR_NAME: &str = ".gotion";
const DEFAULT_FILENAME_CHAR_LIMIT: usize = 156;

/// Explicit locations supplied on the command line. They win over both the
/// config file and the platform defaults.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub config_file: Option<PathBuf>,
    pub vault_dir: Option<PathBuf>,
}

pub struct ConfigLoader {
    paths: ConfigPaths,
    overrides: PathOverrides,
}

impl ConfigLoader {
    pub fn discover(overrides: PathOverrides) -> Result<Self> {
        let paths = ConfigPaths::discover(&overrides)?;
        Ok(Self { paths, overrides })
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Reads the config file when present; a missing file means defaults.
    pub fn load(&self) -> Result<AppConfig> {
        let mut cfg = if self.paths.config_file.exists() {
            let raw = fs::read_to_string(&self.paths.config_file)
                .with_context(|| format!("reading config {}", self.paths.config_file.display()))?;
            toml::from_str::<AppConfig>(&raw).context("parsing config toml")?
        } else {
            tracing::debug!(path = %self.paths.config_file.display(), "no config file, using defaults");
            AppConfig::default()
        };
        cfg.post_load(&self.paths, &self.overrides);
        Ok(cfg)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub default_vault_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl ConfigPaths {
    pub fn discover(overrides: &PathOverrides) -> Result<Self> {
        let base_dirs = BaseDirs::new().context("resolving home directory")?;
        let project_dirs = ProjectDirs::from(APP_DOMAIN, APP_ORG, APP_NAME)
            .context("resolving platform project directories")?;

        let config_file = overrides
            .config_file
            .clone()
            .unwrap_or_else(|| project_dirs.config_dir().join("config.toml"));
        let config_dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_dirs.config_dir().to_path_buf());

        let state_dir = project_dirs
            .state_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_dirs.data_local_dir().join("state"));

        Ok(Self {
            config_dir,
            config_file,
            default_vault_dir: base_dirs.home_dir().join(VAULT_DIR_NAME),
            log_dir: state_dir.join("logs"),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the note files. Empty means `<home>/.gotion`.
    pub vault_dir: PathBuf,
    pub filename_char_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vault_dir: PathBuf::new(),
            filename_char_limit: DEFAULT_FILENAME_CHAR_LIMIT,
        }
    }
}

impl AppConfig {
    fn post_load(&mut self, paths: &ConfigPaths, overrides: &PathOverrides) {
        if let Some(dir) = &overrides.vault_dir {
            self.vault_dir = dir.clone();
        } else if self.vault_dir.as_os_str().is_empty() {
            self.vault_dir = paths.default_vault_dir.clone();
        }
        if self.filename_char_limit == 0 {
            tracing::warn!("filename_char_limit of 0 in config, falling back to default");
            self.filename_char_limit = DEFAULT_FILENAME_CHAR_LIMIT;
        }
    }
}
