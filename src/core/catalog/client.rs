use std::collections::HashMap;

use async_trait::async_trait;

use super::model::{ListQuery, Listing, MetadataTypeDescriptor};
use crate::core::error::HydrateResult;

/// Developer name of a flow mapped to its active version number.
pub type FlowVersionMap = HashMap<String, u32>;

/// One row of a SOQL result, kept as loose JSON since callers only pick
/// a handful of fields out of it.
pub type QueryRecord = serde_json::Map<String, serde_json::Value>;

/// The remote metadata catalog of an org.
///
/// Every call is independent; implementations share a read-only session
/// across concurrent calls.
#[async_trait]
pub trait MetadataCatalog: Send + Sync {
    /// `describeMetadata`: every metadata type the org knows about.
    async fn describe(&self, api_version: &str) -> HydrateResult<Vec<MetadataTypeDescriptor>>;

    /// `listMetadata` for a single type, optionally scoped to a folder.
    async fn list(&self, query: &ListQuery, api_version: &str) -> HydrateResult<Listing>;

    /// Tooling API query.
    async fn tooling_query(&self, soql: &str) -> HydrateResult<Vec<QueryRecord>>;

    /// Data API query.
    async fn query(&self, soql: &str) -> HydrateResult<Vec<QueryRecord>>;
}
