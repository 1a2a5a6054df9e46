use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::client::{MetadataCatalog, QueryRecord};
use super::model::{ListQuery, Listing, MetadataTypeDescriptor};
use super::rest::{self, QueryApi, QueryPage};
use super::soap;
use crate::core::error::{HydrateError, HydrateResult};
use crate::core::http::build_http_client;

const BODY_EXCERPT: usize = 200;

/// An authenticated org session. Acquiring one is the caller's business.
#[derive(Debug, Clone)]
pub struct OrgSession {
    pub instance_url: String,
    pub access_token: String,
}

/// [`MetadataCatalog`] backed by the org's SOAP Metadata API and REST query
/// endpoints.
pub struct SalesforceCatalog {
    client: Client,
    session: OrgSession,
    /// API version used for SOQL queries.
    query_version: String,
}

impl SalesforceCatalog {
    pub fn new(session: OrgSession, query_version: &str) -> HydrateResult<Self> {
        let client = build_http_client(&session.access_token)?;
        Ok(Self {
            client,
            session,
            query_version: query_version.to_string(),
        })
    }

    async fn soap_call(&self, api_version: &str, envelope: String) -> HydrateResult<String> {
        let url = soap::endpoint(&self.session.instance_url, api_version);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/xml; charset=UTF-8")
            .header("SOAPAction", "\"\"")
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Faults come back as HTTP 500 with a regular envelope.
        if let Some(fault) = soap::parse_fault(&text) {
            return Err(fault);
        }
        if !status.is_success() {
            return Err(remote_status(url, status.as_u16(), &text));
        }
        Ok(text)
    }

    async fn run_query(&self, soql: &str, api: QueryApi) -> HydrateResult<Vec<QueryRecord>> {
        let url = rest::query_url(&self.session.instance_url, &self.query_version, api);
        let mut page = self.fetch_page(self.client.get(&url).query(&[("q", soql)]), &url).await?;
        let mut records = std::mem::take(&mut page.records);

        while let Some(next) = rest::next_page_url(&self.session.instance_url, &page) {
            page = self.fetch_page(self.client.get(&next), &next).await?;
            records.append(&mut page.records);
        }

        debug!("Query returned {} records: {}", records.len(), soql);
        Ok(records)
    }

    async fn fetch_page(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> HydrateResult<QueryPage> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(remote_status(url.to_string(), status.as_u16(), &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn remote_status(url: String, status: u16, body: &str) -> HydrateError {
    HydrateError::RemoteStatus {
        url,
        status,
        body: body.chars().take(BODY_EXCERPT).collect(),
    }
}

#[async_trait]
impl MetadataCatalog for SalesforceCatalog {
    async fn describe(&self, api_version: &str) -> HydrateResult<Vec<MetadataTypeDescriptor>> {
        let envelope = soap::describe_envelope(&self.session.access_token, api_version);
        let text = self.soap_call(api_version, envelope).await?;
        soap::parse_describe(&text)
    }

    async fn list(&self, query: &ListQuery, api_version: &str) -> HydrateResult<Listing> {
        let envelope = soap::list_envelope(&self.session.access_token, query, api_version);
        let text = self.soap_call(api_version, envelope).await?;
        soap::parse_list(&text)
    }

    async fn tooling_query(&self, soql: &str) -> HydrateResult<Vec<QueryRecord>> {
        self.run_query(soql, QueryApi::Tooling).await
    }

    async fn query(&self, soql: &str) -> HydrateResult<Vec<QueryRecord>> {
        self.run_query(soql, QueryApi::Data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog(server: &MockServer) -> SalesforceCatalog {
        SalesforceCatalog::new(
            OrgSession {
                instance_url: server.uri(),
                access_token: "00Dtoken".into(),
            },
            "43.0",
        )
        .unwrap()
    }

    fn soap_body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="http://soap.sforce.com/2006/04/metadata"><soapenv:Body>{inner}</soapenv:Body></soapenv:Envelope>"#
        )
    }

    #[tokio::test]
    async fn describe_posts_envelope_with_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/Soap/m/43.0"))
            .and(header("SOAPAction", "\"\""))
            .and(body_string_contains("<met:sessionId>00Dtoken</met:sessionId>"))
            .and(body_string_contains("describeMetadata"))
            .respond_with(ResponseTemplate::new(200).set_body_string(soap_body(
                "<describeMetadataResponse><result><metadataObjects><inFolder>false</inFolder><xmlName>ApexClass</xmlName></metadataObjects></result></describeMetadataResponse>",
            )))
            .mount(&server)
            .await;

        let types = catalog(&server).describe("43.0").await.unwrap();
        assert_eq!(types, vec![MetadataTypeDescriptor::new("ApexClass", false)]);
    }

    #[tokio::test]
    async fn list_surfaces_soap_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/Soap/m/43.0"))
            .respond_with(ResponseTemplate::new(500).set_body_string(soap_body(
                "<soapenv:Fault><faultcode>sf:INVALID_TYPE</faultcode><faultstring>Unknown type</faultstring></soapenv:Fault>",
            )))
            .mount(&server)
            .await;

        let err = catalog(&server)
            .list(&ListQuery::unfoldered("Nope"), "43.0")
            .await
            .unwrap_err();
        assert!(matches!(err, HydrateError::SoapFault { ref code, .. } if code == "sf:INVALID_TYPE"));
    }

    #[tokio::test]
    async fn non_soap_error_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = catalog(&server).describe("43.0").await.unwrap_err();
        assert!(matches!(err, HydrateError::RemoteStatus { status: 503, ref body, .. } if body == "maintenance"));
    }

    #[tokio::test]
    async fn tooling_query_follows_pages() {
        let server = MockServer::start().await;
        let soql = "SELECT DeveloperName FROM FlowDefinition";
        Mock::given(method("GET"))
            .and(path("/services/data/v43.0/tooling/query"))
            .and(query_param("q", soql))
            .and(header("authorization", "Bearer 00Dtoken"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"size":2,"done":false,"nextRecordsUrl":"/services/data/v43.0/tooling/query/01g-1","records":[{"DeveloperName":"A"}]}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/services/data/v43.0/tooling/query/01g-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"size":2,"done":true,"records":[{"DeveloperName":"B"}]}"#,
            ))
            .mount(&server)
            .await;

        let records = catalog(&server).tooling_query(soql).await.unwrap();
        let names: Vec<_> = records
            .iter()
            .filter_map(|r| r.get("DeveloperName").and_then(|v| v.as_str()))
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn data_query_uses_data_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v43.0/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"done":true,"records":[{"Name":"Acme","OrganizationType":"Developer Edition"}]}"#,
            ))
            .mount(&server)
            .await;

        let records = catalog(&server)
            .query("SELECT Name, OrganizationType FROM Organization")
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }
}
