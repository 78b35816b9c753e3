//! Configuration for mediashelf paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (MEDIASHELF_HOME, MEDIASHELF_CATALOG)
//! 2. Config file (.mediashelf/config.yaml)
//! 3. Defaults (~/.mediashelf)
//!
//! Config file discovery:
//! - Searches current directory and parents for .mediashelf/config.yaml
//! - Paths in config file are relative to the project root (parent of .mediashelf/)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_DIR: &str = ".mediashelf";
const CONFIG_FILE: &str = "config.yaml";
const CATALOG_FILE: &str = "catalog.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub shell: Option<ShellConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to project root)
    pub home: Option<String>,
    /// Catalog file (relative to project root)
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    pub autosave: Option<bool>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Catalog file used by commands and the shell
    pub catalog: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Shell settings
    pub shell: ShellSettings,
}

#[derive(Debug, Clone)]
pub struct ShellSettings {
    /// Save the catalog file when the shell exits
    pub autosave: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self { autosave: true }
    }
}

/// Overrides from the command line (which also reads MEDIASHELF_HOME and
/// MEDIASHELF_CATALOG)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub home: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Combine the config file (if any), overrides and the default home
fn resolve(
    config: Option<(PathBuf, ConfigFile)>,
    overrides: Overrides,
    default_home: PathBuf,
) -> ResolvedConfig {
    let (config_file, paths, shell) = match config {
        Some((path, file)) => (Some(path), file.paths, file.shell),
        None => (None, PathsConfig::default(), None),
    };

    // Project root is the parent of .mediashelf/
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let home = overrides
        .home
        .or_else(|| paths.home.as_deref().map(|h| resolve_path(&base_dir, h)))
        .unwrap_or(default_home);

    let catalog = overrides
        .catalog
        .or_else(|| paths.catalog.as_deref().map(|c| resolve_path(&base_dir, c)))
        .unwrap_or_else(|| home.join(CATALOG_FILE));

    let shell = ShellSettings {
        autosave: shell
            .and_then(|s| s.autosave)
            .unwrap_or(ShellSettings::default().autosave),
    };

    ResolvedConfig {
        home,
        catalog,
        config_file,
        shell,
    }
}

/// Load configuration from all sources
pub fn load_config(overrides: Overrides) -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let config = match find_config_file() {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    Ok(resolve(config, overrides, default_home))
}
