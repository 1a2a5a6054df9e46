//! In-memory catalog for deterministic tests.
//!
//! Listings are canned per [`ListQuery`]; unknown queries answer
//! [`Listing::Empty`]. Any call can be configured to fail.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{MetadataCatalog, QueryRecord};
use super::model::{ListQuery, Listing, MetadataTypeDescriptor};
use crate::core::error::{HydrateError, HydrateResult};

#[derive(Debug, Default)]
pub struct MockCatalog {
    types: Vec<MetadataTypeDescriptor>,
    describe_fails: bool,
    listings: HashMap<ListQuery, Listing>,
    failing: HashSet<ListQuery>,
    /// (SOQL substring, canned records or `None` to fail)
    tooling: Vec<(String, Option<Vec<QueryRecord>>)>,
    data: Vec<(String, Option<Vec<QueryRecord>>)>,
    /// Every list call in the order it was issued.
    calls: Mutex<Vec<ListQuery>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, xml_name: &str, in_folder: bool) -> Self {
        self.types
            .push(MetadataTypeDescriptor::new(xml_name, in_folder));
        self
    }

    pub fn failing_describe(mut self) -> Self {
        self.describe_fails = true;
        self
    }

    pub fn with_listing(mut self, query: ListQuery, listing: Listing) -> Self {
        self.listings.insert(query, listing);
        self
    }

    pub fn failing_list(mut self, query: ListQuery) -> Self {
        self.failing.insert(query);
        self
    }

    pub fn with_tooling(mut self, needle: &str, records: Vec<QueryRecord>) -> Self {
        self.tooling.push((needle.to_string(), Some(records)));
        self
    }

    pub fn failing_tooling(mut self, needle: &str) -> Self {
        self.tooling.push((needle.to_string(), None));
        self
    }

    pub fn with_query(mut self, needle: &str, records: Vec<QueryRecord>) -> Self {
        self.data.push((needle.to_string(), Some(records)));
        self
    }

    pub fn failing_query(mut self, needle: &str) -> Self {
        self.data.push((needle.to_string(), None));
        self
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn answer(
        table: &[(String, Option<Vec<QueryRecord>>)],
        soql: &str,
    ) -> HydrateResult<Vec<QueryRecord>> {
        match table.iter().find(|(needle, _)| soql.contains(needle.as_str())) {
            Some((_, Some(records))) => Ok(records.clone()),
            Some((needle, None)) => Err(HydrateError::Other(format!(
                "mock query failure for '{}'",
                needle
            ))),
            None => Ok(Vec::new()),
        }
    }
}

/// Build a query record from a JSON literal.
pub fn record(json: &str) -> QueryRecord {
    serde_json::from_str(json).expect("valid record literal")
}

#[async_trait]
impl MetadataCatalog for MockCatalog {
    async fn describe(&self, _api_version: &str) -> HydrateResult<Vec<MetadataTypeDescriptor>> {
        if self.describe_fails {
            return Err(HydrateError::Other("mock describe failure".into()));
        }
        Ok(self.types.clone())
    }

    async fn list(&self, query: &ListQuery, _api_version: &str) -> HydrateResult<Listing> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }
        // Yield so sibling calls interleave like real I/O.
        tokio::task::yield_now().await;
        if self.failing.contains(query) {
            return Err(HydrateError::Other(format!("mock list failure for {}", query)));
        }
        Ok(self.listings.get(query).cloned().unwrap_or_default())
    }

    async fn tooling_query(&self, soql: &str) -> HydrateResult<Vec<QueryRecord>> {
        Self::answer(&self.tooling, soql)
    }

    async fn query(&self, soql: &str) -> HydrateResult<Vec<QueryRecord>> {
        Self::answer(&self.data, soql)
    }
}
