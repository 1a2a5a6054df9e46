use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::quick_filter::QuickFilter;
use super::PackageConfig;
use crate::core::catalog::DEFAULT_API_VERSION;
use crate::core::error::ConfigError;
use crate::core::fetch::DEFAULT_CONCURRENCY;

const APP_DIR_NAME: &str = "sfdx-hydrate";
const GLOBAL_FILE: &str = "config.toml";
const PROJECT_FILE: &str = ".hydrate.toml";
const CONFIG_ENV: &str = "HYDRATE_CONFIG";

/// Where a layer of settings came from. Later sources win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    GlobalFile(PathBuf),
    ProjectFile(PathBuf),
    Flags,
}

impl ConfigSource {
    fn rank(&self) -> u8 {
        match self {
            ConfigSource::Defaults => 0,
            ConfigSource::GlobalFile(_) => 1,
            ConfigSource::ProjectFile(_) => 2,
            ConfigSource::Flags => 3,
        }
    }
}

/// One partial set of settings. Unset fields fall through to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigLayer {
    pub api_version: Option<String>,
    pub quick_filter: Option<Vec<String>>,
    pub named_filter: Option<String>,
    pub exclude_managed: Option<bool>,
    pub pretty_print: Option<bool>,
    pub concurrency: Option<usize>,
}

impl ConfigLayer {
    pub fn defaults() -> Self {
        Self {
            api_version: Some(DEFAULT_API_VERSION.to_string()),
            quick_filter: Some(Vec::new()),
            named_filter: None,
            exclude_managed: Some(false),
            pretty_print: Some(false),
            concurrency: Some(DEFAULT_CONCURRENCY),
        }
    }

    /// Read a TOML layer. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let layer = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("Loaded config layer from {:?}", path);
        Ok(Some(layer))
    }

    /// `upper` wins wherever it sets a value.
    fn overlay(self, upper: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            api_version: upper.api_version.or(self.api_version),
            quick_filter: upper.quick_filter.or(self.quick_filter),
            named_filter: upper.named_filter.or(self.named_filter),
            exclude_managed: upper.exclude_managed.or(self.exclude_managed),
            pretty_print: upper.pretty_print.or(self.pretty_print),
            concurrency: upper.concurrency.or(self.concurrency),
        }
    }
}

/// Default location of the user-level config file.
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(GLOBAL_FILE))
}

/// Project config file inside `cwd`.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(PROJECT_FILE)
}

/// Collect every available layer: defaults, the global and project files
/// when present, then the command-line flags.
pub fn collect_layers(
    global: Option<&Path>,
    project: &Path,
    flags: ConfigLayer,
) -> Result<Vec<(ConfigSource, ConfigLayer)>, ConfigError> {
    let mut layers = vec![(ConfigSource::Defaults, ConfigLayer::defaults())];

    if let Some(path) = global {
        if let Some(layer) = ConfigLayer::load(path)? {
            layers.push((ConfigSource::GlobalFile(path.to_path_buf()), layer));
        }
    }
    if let Some(layer) = ConfigLayer::load(project)? {
        layers.push((ConfigSource::ProjectFile(project.to_path_buf()), layer));
    }
    layers.push((ConfigSource::Flags, flags));

    Ok(layers)
}

/// Fold layers in precedence order into a validated [`PackageConfig`].
pub fn resolve(layers: &[(ConfigSource, ConfigLayer)]) -> Result<PackageConfig, ConfigError> {
    let mut ordered: Vec<&(ConfigSource, ConfigLayer)> = layers.iter().collect();
    ordered.sort_by_key(|(source, _)| source.rank());

    let merged = ordered
        .into_iter()
        .fold(ConfigLayer::default(), |acc, (_, layer)| acc.overlay(layer.clone()));

    let api_version = merged
        .api_version
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
    if !is_api_version(&api_version) {
        return Err(ConfigError::InvalidValue(format!(
            "api-version '{}' is not of the form NN.N",
            api_version
        )));
    }

    let concurrency = merged.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
    if concurrency == 0 {
        return Err(ConfigError::InvalidValue(
            "concurrency must be at least 1".into(),
        ));
    }

    let quick_filter = QuickFilter {
        types: merged.quick_filter.unwrap_or_default(),
        named: merged.named_filter,
    };
    // Surface unknown filter names before any remote call.
    quick_filter.resolve()?;

    Ok(PackageConfig {
        api_version,
        quick_filter,
        exclude_managed: merged.exclude_managed.unwrap_or(false),
        pretty_print: merged.pretty_print.unwrap_or(false),
        concurrency,
    })
}

fn is_api_version(raw: &str) -> bool {
    match raw.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
