mod record;

use std::future::Future;

use thiserror::Error;
use tracing::debug;

pub use record::{parse_record, EntityRecord, Stat};

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for #{id} failed: {source}")]
    Network {
        id: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("{status}: {reason}")]
    Status { id: u32, status: u16, reason: String },

    #[error("malformed record for #{id}: {source}")]
    Parse {
        id: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record for #{id}: {message}")]
    InvalidRecord { id: u32, message: String },

    #[error("requested #{requested} but received #{returned}")]
    IdMismatch { requested: u32, returned: u32 },
}

impl FetchError {
    // the identifier that was requested when the failure happened
    pub fn id(&self) -> u32 {
        match self {
            Self::Network { id, .. }
            | Self::Status { id, .. }
            | Self::Parse { id, .. }
            | Self::InvalidRecord { id, .. } => *id,
            Self::IdMismatch { requested, .. } => *requested,
        }
    }
}

// A source of normalized records. Each call is independent: no caching, no retry.
pub trait RecordSource {
    fn fetch(&self, id: u32) -> impl Future<Output = Result<EntityRecord, FetchError>> + Send;
}

// 2xx is success, and so is 0 which local (non-network) loads report
pub fn check_status(id: u32, status: u16, reason: &str) -> Result<(), FetchError> {
    if (200..300).contains(&status) || status == 0 {
        return Ok(());
    }
    Err(FetchError::Status {
        id,
        status,
        reason: reason.to_string(),
    })
}

// The server's own reason phrase when it sent a non-canonical one, else the
// registered name for the code.
fn reason_phrase(resp: &reqwest::Response) -> String {
    if let Some(reason) = resp.extensions().get::<hyper::ext::ReasonPhrase>() {
        return String::from_utf8_lossy(reason.as_bytes()).into_owned();
    }
    resp.status().canonical_reason().unwrap_or("").to_string()
}

#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn record_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}/", self.api_url, id)
    }
}

impl RecordSource for HttpSource {
    async fn fetch(&self, id: u32) -> Result<EntityRecord, FetchError> {
        let url = self.record_url(id);
        debug!(id, %url, "fetching record");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network { id, source: e })?;

        let status = resp.status();
        check_status(id, status.as_u16(), &reason_phrase(&resp))?;

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network { id, source: e })?;
        parse_record(id, &body)
    }
}
