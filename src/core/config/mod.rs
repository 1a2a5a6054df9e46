// ─── Configuration ───
// Layered resolution (defaults < global file < project file < flags) and the
// named quick-filter registry.

mod layers;
mod quick_filter;

pub use layers::{
    collect_layers, global_config_path, project_config_path, resolve, ConfigLayer, ConfigSource,
};
pub use quick_filter::{named_filter, registry, QuickFilter, TypeFilter};

use crate::core::catalog::{OrgSession, DEFAULT_API_VERSION};
use crate::core::error::ConfigError;
use crate::core::fetch::DEFAULT_CONCURRENCY;

/// Settings of one package descriptor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    pub api_version: String,
    pub quick_filter: QuickFilter,
    pub exclude_managed: bool,
    pub pretty_print: bool,
    pub concurrency: usize,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            quick_filter: QuickFilter::default(),
            exclude_managed: false,
            pretty_print: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Build the org session from explicit settings.
pub fn org_session(
    instance_url: Option<String>,
    access_token: Option<String>,
) -> Result<OrgSession, ConfigError> {
    let instance_url = instance_url
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConfigError::MissingConnection("instance URL"))?;
    let access_token = access_token
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingConnection("access token"))?;
    if !instance_url.starts_with("https://") && !instance_url.starts_with("http://") {
        return Err(ConfigError::InvalidValue(format!(
            "instance URL '{}' must start with http:// or https://",
            instance_url
        )));
    }
    Ok(OrgSession {
        instance_url,
        access_token,
    })
}
