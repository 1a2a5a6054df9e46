use std::fmt;

use tracing::warn;

use crate::core::catalog::{FlowVersionMap, ListQuery, Listing, MetadataMember, MetadataTypeDescriptor};
use crate::core::error::{HydrateError, HydrateResult};

/// Stage of the fetch graph a call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Describe,
    FolderDiscovery,
    FolderedMembers,
    UnfolderedMembers,
    FlowVersions,
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPhase::Describe => write!(f, "describe"),
            FetchPhase::FolderDiscovery => write!(f, "folder discovery"),
            FetchPhase::FolderedMembers => write!(f, "foldered members"),
            FetchPhase::UnfolderedMembers => write!(f, "unfoldered members"),
            FetchPhase::FlowVersions => write!(f, "flow versions"),
        }
    }
}

/// A remote call that failed and was degraded to an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub phase: FetchPhase,
    pub target: String,
    pub message: String,
}

impl FetchFailure {
    pub fn new(phase: FetchPhase, target: impl Into<String>, error: &HydrateError) -> Self {
        Self {
            phase,
            target: target.into(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} call for {} failed: {}", self.phase, self.target, self.message)
    }
}

/// One listing call of a fan-out batch, paired with the query that issued it.
#[derive(Debug)]
pub struct BatchSlot {
    pub query: ListQuery,
    pub outcome: HydrateResult<Listing>,
}

impl BatchSlot {
    /// Turn the slot into a plain member list.
    ///
    /// This is the single place where failed calls are logged and recorded;
    /// a failure contributes no members.
    pub fn settle(
        self,
        phase: FetchPhase,
        failures: &mut Vec<FetchFailure>,
    ) -> (ListQuery, Vec<MetadataMember>) {
        match self.outcome {
            Ok(listing) => (self.query, listing.into_members()),
            Err(e) => {
                let failure = FetchFailure::new(phase, self.query.to_string(), &e);
                warn!("{}", failure);
                failures.push(failure);
                (self.query, Vec::new())
            }
        }
    }
}

/// Every result stream of a fetch run, joined and ready for merging.
#[derive(Debug, Default)]
pub struct FetchedMetadata {
    pub types: Vec<MetadataTypeDescriptor>,
    pub foldered: Vec<BatchSlot>,
    pub unfoldered: Vec<BatchSlot>,
    pub flow_versions: FlowVersionMap,
    /// Failures already settled inside the orchestrator (describe, folder
    /// discovery, flow versions). Member slot failures surface at merge.
    pub failures: Vec<FetchFailure>,
}
