mod bucket;
mod descriptor;
mod merge;
mod standard_value_sets;

pub use bucket::PackageTypeBucket;
pub use descriptor::{PackageDescriptor, PackageTypeMembers};
pub use merge::{effective_type, merge, MergeOptions, MergeOutcome};
pub use standard_value_sets::{STANDARD_VALUE_SET, STANDARD_VALUE_SETS};

use tracing::{info, warn};

use crate::core::catalog::MetadataCatalog;
use crate::core::config::PackageConfig;
use crate::core::error::HydrateResult;
use crate::core::fetch::FetchOrchestrator;

/// Fetch, merge and filter: everything short of rendering.
///
/// Only configuration problems fail the run; remote failures show up as
/// missing members plus a warning.
pub async fn build_package<C: MetadataCatalog + ?Sized>(
    catalog: &C,
    config: &PackageConfig,
) -> HydrateResult<PackageDescriptor> {
    let filter = config.quick_filter.resolve()?;

    let fetched = FetchOrchestrator::new(catalog, &config.api_version)
        .with_concurrency(config.concurrency)
        .fetch_all()
        .await;

    let outcome = merge(
        fetched,
        &MergeOptions {
            exclude_managed: config.exclude_managed,
        },
    );

    if !outcome.failures.is_empty() {
        warn!(
            "{} remote calls failed; their members are missing from the descriptor",
            outcome.failures.len()
        );
    }

    let descriptor = PackageDescriptor::from_bucket(&outcome.bucket, &config.api_version, &filter);
    info!(
        "Package descriptor ready: {} of {} types",
        descriptor.types.len(),
        outcome.bucket.len()
    );
    Ok(descriptor)
}

/// Build the package.xml document for an org.
pub async fn build_package_descriptor<C: MetadataCatalog + ?Sized>(
    catalog: &C,
    config: &PackageConfig,
) -> HydrateResult<String> {
    build_package(catalog, config)
        .await?
        .to_xml(config.pretty_print)
}
