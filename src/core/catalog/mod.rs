mod client;
mod model;
mod rest;
mod session;
mod soap;

#[cfg(test)]
pub mod mock;

pub use client::{FlowVersionMap, MetadataCatalog, QueryRecord};
pub use model::{
    FolderDescriptor, ListQuery, Listing, ManageableState, MetadataMember,
    MetadataTypeDescriptor,
};
pub use rest::field;
pub use session::{OrgSession, SalesforceCatalog};
pub use soap::METADATA_NS;

/// API version used when nothing else is configured.
pub const DEFAULT_API_VERSION: &str = "43.0";
