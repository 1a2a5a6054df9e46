use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the hydrate backend.
/// Every module returns `Result<T, HydrateError>`.
#[derive(Debug, Error)]
pub enum HydrateError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed: HTTP {status}: {body}")]
    RemoteStatus {
        url: String,
        status: u16,
        body: String,
    },

    // ── Metadata API ────────────────────────────────────
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    // ── XML ─────────────────────────────────────────────
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Configuration ───────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Fatal configuration problems. These abort a run before any remote call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unknown named filter '{name}' (known: {known})")]
    UnknownFilter { name: String, known: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("missing connection setting: {0}")]
    MissingConnection(&'static str),
}

/// Convenience alias used throughout the crate.
pub type HydrateResult<T> = Result<T, HydrateError>;

impl From<std::io::Error> for HydrateError {
    fn from(source: std::io::Error) -> Self {
        HydrateError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl HydrateError {
    /// Whether this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HydrateError::Config(_))
    }
}
