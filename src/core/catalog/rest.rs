use serde::Deserialize;

use super::client::QueryRecord;

/// Which REST query endpoint to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryApi {
    Data,
    Tooling,
}

/// One page of a SOQL query result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    #[serde(default)]
    pub records: Vec<QueryRecord>,
    #[serde(default = "default_done")]
    pub done: bool,
    #[serde(default)]
    pub next_records_url: Option<String>,
}

fn default_done() -> bool {
    true
}

/// URL of the first page of a query.
pub fn query_url(instance_url: &str, api_version: &str, api: QueryApi) -> String {
    let base = instance_url.trim_end_matches('/');
    match api {
        QueryApi::Data => format!("{}/services/data/v{}/query", base, api_version),
        QueryApi::Tooling => format!("{}/services/data/v{}/tooling/query", base, api_version),
    }
}

/// Absolute URL of a follow-up page; `nextRecordsUrl` is instance-relative.
pub fn next_page_url(instance_url: &str, page: &QueryPage) -> Option<String> {
    if page.done {
        return None;
    }
    page.next_records_url
        .as_deref()
        .map(|path| format!("{}{}", instance_url.trim_end_matches('/'), path))
}

/// Walk a dotted path (`ActiveVersion.VersionNumber`) through a record.
pub fn field<'a>(record: &'a QueryRecord, path: &str) -> Option<&'a serde_json::Value> {
    let mut parts = path.split('.');
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
