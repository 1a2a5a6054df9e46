use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::batch::{BatchSlot, FetchFailure, FetchPhase, FetchedMetadata};
use crate::core::catalog::{
    field, FlowVersionMap, FolderDescriptor, ListQuery, MetadataCatalog, MetadataTypeDescriptor,
};

/// Default number of outstanding listing calls per batch.
pub const DEFAULT_CONCURRENCY: usize = 8;

const FLOW_VERSION_QUERY: &str =
    "SELECT DeveloperName, ActiveVersion.VersionNumber FROM FlowDefinition";

/// Drives the catalog call graph:
///
/// ```text
/// describe ─┬─> folder discovery ──> per-folder listing ─┐
///           └─> unfoldered listing ─────────────────────┼─> join
/// flow versions ────────────────────────────────────────┘
/// ```
///
/// Failed calls never abort siblings; they come back as failed slots or
/// recorded failures with an empty contribution.
pub struct FetchOrchestrator<'a, C: MetadataCatalog + ?Sized> {
    catalog: &'a C,
    api_version: String,
    /// Maximum number of outstanding calls inside one batch.
    concurrency: usize,
}

impl<'a, C: MetadataCatalog + ?Sized> FetchOrchestrator<'a, C> {
    pub fn new(catalog: &'a C, api_version: &str) -> Self {
        Self {
            catalog,
            api_version: api_version.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Run every branch and join them.
    pub async fn fetch_all(&self) -> FetchedMetadata {
        let (members, flows) = tokio::join!(self.fetch_members(), self.fetch_flow_versions());

        let (types, foldered, unfoldered, mut failures) = members;
        let (flow_versions, flow_failure) = flows;
        failures.extend(flow_failure);

        info!(
            "Fetched {} types: {} foldered slots, {} unfoldered slots, {} active flows",
            types.len(),
            foldered.len(),
            unfoldered.len(),
            flow_versions.len()
        );

        FetchedMetadata {
            types,
            foldered,
            unfoldered,
            flow_versions,
            failures,
        }
    }

    /// describe, then the foldered chain and the unfoldered batch side by side.
    async fn fetch_members(
        &self,
    ) -> (
        Vec<MetadataTypeDescriptor>,
        Vec<BatchSlot>,
        Vec<BatchSlot>,
        Vec<FetchFailure>,
    ) {
        let mut failures = Vec::new();

        let types = match self.catalog.describe(&self.api_version).await {
            Ok(types) => types,
            Err(e) => {
                let failure = FetchFailure::new(FetchPhase::Describe, "describeMetadata", &e);
                warn!("{}", failure);
                failures.push(failure);
                Vec::new()
            }
        };

        let (in_folder, direct): (Vec<_>, Vec<_>) = types.iter().partition(|t| t.in_folder);
        let unfoldered_queries = direct
            .iter()
            .map(|t| ListQuery::unfoldered(t.xml_name.as_str()))
            .collect();

        let ((foldered, folder_failures), unfoldered) = tokio::join!(
            self.fetch_foldered(&in_folder),
            self.list_batch(FetchPhase::UnfolderedMembers, unfoldered_queries),
        );
        failures.extend(folder_failures);

        (types, foldered, unfoldered, failures)
    }

    async fn fetch_foldered(
        &self,
        types: &[&MetadataTypeDescriptor],
    ) -> (Vec<BatchSlot>, Vec<FetchFailure>) {
        let mut failures = Vec::new();

        let mut discovery_queries: Vec<ListQuery> = Vec::new();
        for t in types {
            let query = ListQuery::unfoldered(folder_type_for(&t.xml_name));
            if !discovery_queries.contains(&query) {
                discovery_queries.push(query);
            }
        }

        let discovered = self
            .list_batch(FetchPhase::FolderDiscovery, discovery_queries)
            .await;

        let mut folders = Vec::new();
        for slot in discovered {
            let (query, records) = slot.settle(FetchPhase::FolderDiscovery, &mut failures);
            for record in records {
                match record.full_name {
                    Some(full_name) => folders.push(FolderDescriptor {
                        // A folder without a declared type belongs to the type we asked for.
                        folder_type: record
                            .member_type
                            .unwrap_or_else(|| query.metadata_type.clone()),
                        full_name,
                    }),
                    None => warn!("Skipping {} record without fullName", query.metadata_type),
                }
            }
        }
        debug!("Discovered {} folders", folders.len());

        let member_queries = folders
            .iter()
            .map(|folder| {
                ListQuery::in_folder(member_type_for_folder(&folder.folder_type), &folder.full_name)
            })
            .collect();

        let slots = self
            .list_batch(FetchPhase::FolderedMembers, member_queries)
            .await;
        (slots, failures)
    }

    /// Issue every query concurrently and wait for all of them to settle.
    /// Slots come back in request order so output stays stable across runs.
    async fn list_batch(&self, phase: FetchPhase, queries: Vec<ListQuery>) -> Vec<BatchSlot> {
        debug!("Issuing {} {} calls", queries.len(), phase);

        stream::iter(queries)
            .map(|query| async move {
                let outcome = self.catalog.list(&query, &self.api_version).await;
                BatchSlot { query, outcome }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn fetch_flow_versions(&self) -> (FlowVersionMap, Option<FetchFailure>) {
        match self.catalog.tooling_query(FLOW_VERSION_QUERY).await {
            Ok(records) => {
                let mut versions = FlowVersionMap::new();
                for record in &records {
                    let name = field(record, "DeveloperName").and_then(|v| v.as_str());
                    let version = field(record, "ActiveVersion.VersionNumber")
                        .and_then(|v| v.as_u64())
                        .and_then(|v| u32::try_from(v).ok());
                    match (name, version) {
                        (Some(name), Some(version)) => {
                            versions.insert(name.to_string(), version);
                        }
                        // Flows without an active version are expected.
                        (Some(_), None) => {}
                        (None, _) => warn!("Skipping flow definition without DeveloperName"),
                    }
                }
                (versions, None)
            }
            Err(e) => {
                let failure = FetchFailure::new(FetchPhase::FlowVersions, "FlowDefinition", &e);
                warn!("{}", failure);
                (FlowVersionMap::new(), Some(failure))
            }
        }
    }
}

/// Folder container type of a foldered type: `EmailTemplate` -> `EmailFolder`.
pub fn folder_type_for(xml_name: &str) -> String {
    format!("{}Folder", xml_name.replacen("Template", "", 1))
}

/// Member type listed inside a folder: `EmailFolder` -> `EmailTemplate`.
pub fn member_type_for_folder(folder_type: &str) -> String {
    let base = folder_type.replacen("Folder", "", 1);
    if base == "Email" {
        format!("{}Template", base)
    } else {
        base
    }
}
