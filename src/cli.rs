//! Command-line argument definitions using clap derive.
//!
//! Connection flags are global and fall back to `SF_INSTANCE_URL` and
//! `SF_ACCESS_TOKEN`.

use clap::{Args, Parser, Subcommand};

use crate::core::config::ConfigLayer;

/// Hydrate package.xml and scratch org definitions from a live org
#[derive(Parser, Debug)]
#[command(name = "hydrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Org instance URL, e.g. https://mydomain.my.salesforce.com
    #[arg(long, global = true, env = "SF_INSTANCE_URL")]
    pub instance_url: Option<String>,

    /// OAuth access token for the org
    #[arg(long, global = true, env = "SF_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a package.xml covering the org's metadata
    Packagexml(PackageArgs),

    /// Build a scratch org definition from the org's settings
    Scratchfile,
}

#[derive(Args, Debug, Default)]
pub struct PackageArgs {
    /// Metadata API version, e.g. 45.0
    #[arg(long)]
    pub api_version: Option<String>,

    /// Only include these metadata types (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub quick_filter: Vec<String>,

    /// Only include the types of a named filter, e.g. apex or security
    #[arg(long)]
    pub named_filter: Option<String>,

    /// Leave out members installed from managed packages
    #[arg(long)]
    pub exclude_managed: bool,

    /// Indent the generated XML
    #[arg(long)]
    pub pretty: bool,

    /// Maximum number of concurrent list calls
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl PackageArgs {
    /// The flag layer of the config stack. Switches left off do not
    /// override file settings.
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            api_version: self.api_version.clone(),
            quick_filter: (!self.quick_filter.is_empty()).then(|| {
                self.quick_filter
                    .iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            }),
            named_filter: self.named_filter.clone(),
            exclude_managed: self.exclude_managed.then_some(true),
            pretty_print: self.pretty.then_some(true),
            concurrency: self.concurrency,
        }
    }
}
