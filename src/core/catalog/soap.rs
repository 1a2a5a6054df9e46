// ─── Metadata API (SOAP) ───
// Request envelopes and response decoding for describeMetadata / listMetadata.

use quick_xml::de::from_str;
use quick_xml::escape::escape;
use serde::de::{Error as _, IntoDeserializer};
use serde::{Deserialize, Deserializer};

use super::model::{ListQuery, Listing, ManageableState, MetadataMember, MetadataTypeDescriptor};
use crate::core::error::{HydrateError, HydrateResult};

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const METADATA_NS: &str = "http://soap.sforce.com/2006/04/metadata";

/// Metadata API endpoint for an org and API version.
pub fn endpoint(instance_url: &str, api_version: &str) -> String {
    format!(
        "{}/services/Soap/m/{}",
        instance_url.trim_end_matches('/'),
        api_version
    )
}

fn envelope(session_id: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<soapenv:Envelope xmlns:soapenv="{env}" xmlns:met="{met}">"#,
            "<soapenv:Header><met:SessionHeader><met:sessionId>{session}</met:sessionId></met:SessionHeader></soapenv:Header>",
            "<soapenv:Body>{body}</soapenv:Body>",
            "</soapenv:Envelope>"
        ),
        env = SOAP_ENV_NS,
        met = METADATA_NS,
        session = escape(session_id),
        body = body,
    )
}

pub fn describe_envelope(session_id: &str, api_version: &str) -> String {
    envelope(
        session_id,
        &format!(
            "<met:describeMetadata><met:asOfVersion>{}</met:asOfVersion></met:describeMetadata>",
            escape(api_version)
        ),
    )
}

pub fn list_envelope(session_id: &str, query: &ListQuery, api_version: &str) -> String {
    let folder = query
        .folder
        .as_deref()
        .map(|f| format!("<met:folder>{}</met:folder>", escape(f)))
        .unwrap_or_default();
    envelope(
        session_id,
        &format!(
            "<met:listMetadata><met:queries>{}<met:type>{}</met:type></met:queries><met:asOfVersion>{}</met:asOfVersion></met:listMetadata>",
            folder,
            escape(&query.metadata_type),
            escape(api_version)
        ),
    )
}

// ── Response model ─────────────────────────────────────
// quick-xml matches element local names, so the soapenv: prefix is dropped.

#[derive(Debug, Deserialize)]
struct Envelope<B> {
    #[serde(rename = "Body")]
    body: B,
}

#[derive(Debug, Deserialize)]
struct DescribeBody {
    #[serde(rename = "describeMetadataResponse")]
    response: DescribeResponse,
}

#[derive(Debug, Deserialize)]
struct DescribeResponse {
    result: DescribeResult,
}

#[derive(Debug, Deserialize)]
struct DescribeResult {
    #[serde(rename = "metadataObjects", default)]
    metadata_objects: Vec<MetadataTypeDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ListBody {
    #[serde(rename = "listMetadataResponse")]
    response: ListResponse,
}

#[derive(Debug, Deserialize, Default)]
struct ListResponse {
    #[serde(default)]
    result: Vec<FileProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileProperties {
    #[serde(rename = "type", default)]
    member_type: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "nil_state")]
    manageable_state: Option<ManageableState>,
    #[serde(default)]
    file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FaultBody {
    #[serde(rename = "Fault")]
    fault: Fault,
}

#[derive(Debug, Deserialize)]
struct Fault {
    #[serde(default)]
    faultcode: String,
    #[serde(default)]
    faultstring: String,
}

/// `xsi:nil` elements arrive as empty text; anything else goes through the
/// [`ManageableState`] serde mapping.
fn nil_state<'de, D>(deserializer: D) -> Result<Option<ManageableState>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(state) => ManageableState::deserialize(state.into_deserializer())
            .map(Some)
            .map_err(|e: serde::de::value::Error| D::Error::custom(e)),
        None => Ok(None),
    }
}

impl From<FileProperties> for MetadataMember {
    fn from(props: FileProperties) -> Self {
        MetadataMember {
            member_type: props.member_type,
            full_name: props.full_name,
            manageable_state: props.manageable_state,
            file_name: props.file_name,
        }
    }
}

/// Decode a SOAP fault, if the payload is one.
pub fn parse_fault(xml: &str) -> Option<HydrateError> {
    let envelope: Envelope<FaultBody> = from_str(xml).ok()?;
    Some(HydrateError::SoapFault {
        code: envelope.body.fault.faultcode,
        message: envelope.body.fault.faultstring,
    })
}

pub fn parse_describe(xml: &str) -> HydrateResult<Vec<MetadataTypeDescriptor>> {
    if let Some(fault) = parse_fault(xml) {
        return Err(fault);
    }
    let envelope: Envelope<DescribeBody> = from_str(xml)?;
    Ok(envelope.body.response.result.metadata_objects)
}

pub fn parse_list(xml: &str) -> HydrateResult<Listing> {
    if let Some(fault) = parse_fault(xml) {
        return Err(fault);
    }
    let envelope: Envelope<ListBody> = from_str(xml)?;
    let records = envelope
        .body
        .response
        .result
        .into_iter()
        .map(MetadataMember::from)
        .collect();
    Ok(Listing::from_records(records))
}
