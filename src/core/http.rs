use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, AUTHORIZATION};
use reqwest::Client;

use crate::core::error::{ConfigError, HydrateError, HydrateResult};

const APP_USER_AGENT: &str = "sfdx-hydrate/0.1.0";

/// Build the shared client for every call of a run.
///
/// The session token travels as a default bearer header so the SOAP and
/// REST paths share one connection pool.
pub fn build_http_client(access_token: &str) -> HydrateResult<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    let mut bearer = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|_| {
        HydrateError::Config(ConfigError::InvalidValue(
            "access token contains characters not allowed in a header".into(),
        ))
    })?;
    bearer.set_sensitive(true);
    default_headers.insert(AUTHORIZATION, bearer);

    Ok(Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()?)
}
