use std::path::Path;

use tracing::{debug, info};

use crate::cli::{Cli, Command, PackageArgs};
use crate::core::catalog::{SalesforceCatalog, DEFAULT_API_VERSION};
use crate::core::config::{
    collect_layers, global_config_path, org_session, project_config_path, resolve, PackageConfig,
};
use crate::core::error::HydrateResult;
use crate::core::package::build_package_descriptor;
use crate::core::scratch::build_scratch_definition;

/// Run the selected command and return the document for stdout.
pub async fn dispatch(cli: Cli) -> HydrateResult<String> {
    match &cli.command {
        Command::Packagexml(args) => {
            let cwd = std::env::current_dir()?;
            let config = package_config(args, global_config_path().as_deref(), &cwd)?;
            let catalog = connect(&cli, &config.api_version)?;
            packagexml(&catalog, &config).await
        }
        Command::Scratchfile => {
            let catalog = connect(&cli, DEFAULT_API_VERSION)?;
            scratchfile(&catalog).await
        }
    }
}

/// Resolve the settings of a packagexml run from every config layer.
pub fn package_config(
    args: &PackageArgs,
    global: Option<&Path>,
    cwd: &Path,
) -> HydrateResult<PackageConfig> {
    let layers = collect_layers(global, &project_config_path(cwd), args.to_layer())?;
    for (source, _) in &layers {
        debug!("Config layer: {:?}", source);
    }
    Ok(resolve(&layers)?)
}

fn connect(cli: &Cli, query_version: &str) -> HydrateResult<SalesforceCatalog> {
    let session = org_session(cli.instance_url.clone(), cli.access_token.clone())?;
    info!("Connecting to {}", session.instance_url);
    SalesforceCatalog::new(session, query_version)
}

async fn packagexml(catalog: &SalesforceCatalog, config: &PackageConfig) -> HydrateResult<String> {
    info!(
        "Building package.xml (API {}, concurrency {})",
        config.api_version, config.concurrency
    );
    build_package_descriptor(catalog, config).await
}

async fn scratchfile(catalog: &SalesforceCatalog) -> HydrateResult<String> {
    info!("Building scratch org definition");
    build_scratch_definition(catalog).await.to_json()
}
