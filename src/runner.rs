use std::time::Duration;

use indicatif::ProgressBar;
use thiserror::Error;
use tracing::info;

use crate::fetcher::{HttpSource, DEFAULT_API_URL};
use crate::index::EntityIndex;
use crate::loader::{self, LoadError};
use crate::session::Session;
use crate::view::Presenter;

pub const DEFAULT_COUNT: u32 = 151;
pub const MAX_COUNT: u32 = 10_000;
pub const DEFAULT_USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct Options {
    pub api_url: String,
    pub count: u32,
    // 0 disables the per-request timeout
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            count: DEFAULT_COUNT,
            timeout_seconds: 0,
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid API URL: {url}")]
    InvalidApiUrl { url: String },

    #[error("invalid count {value}, expected 1..=10000")]
    InvalidCount { value: u32 },

    #[error("invalid user agent: {value}")]
    InvalidUserAgent { value: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.count == 0 || options.count > MAX_COUNT {
            return Err(RunnerError::InvalidCount {
                value: options.count,
            });
        }
        let url_ok = reqwest::Url::parse(options.api_url.trim())
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !url_ok {
            return Err(RunnerError::InvalidApiUrl {
                url: options.api_url.clone(),
            });
        }
        if reqwest::header::HeaderValue::from_str(&options.user_agent).is_err() {
            return Err(RunnerError::InvalidUserAgent {
                value: options.user_agent.clone(),
            });
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn source(&self) -> Result<HttpSource, RunnerError> {
        let client = build_client(
            self.options.proxy.as_deref(),
            self.options.timeout_seconds,
            &self.options.user_agent,
        )?;
        Ok(HttpSource::new(client, &self.options.api_url))
    }

    // fetch -> join -> sort -> index, with no presentation attached
    pub async fn load_index(&self, pb: &ProgressBar) -> Result<EntityIndex, RunnerError> {
        let source = self.source()?;
        let index = loader::load_index(&source, self.options.count, pb).await?;
        info!(count = index.len(), api = %self.options.api_url, "catalog loaded");
        Ok(index)
    }

    // Loads the catalog and opens a session that renders through `presenter`.
    // A failed load only reaches the presenter as the error placeholder.
    pub async fn open_session<P: Presenter>(
        &self,
        pb: &ProgressBar,
        presenter: &mut P,
    ) -> Result<Session, RunnerError> {
        let source = self.source()?;
        let session = Session::load(&source, self.options.count, pb, presenter).await?;
        Ok(session)
    }
}

fn build_client(
    proxy: Option<&str>,
    timeout_seconds: usize,
    user_agent: &str,
) -> Result<reqwest::Client, RunnerError> {
    let mut headers = reqwest::header::HeaderMap::new();
    let agent = reqwest::header::HeaderValue::from_str(user_agent).map_err(|_| {
        RunnerError::InvalidUserAgent {
            value: user_agent.to_string(),
        }
    })?;
    headers.insert(reqwest::header::USER_AGENT, agent);

    let mut builder = reqwest::Client::builder().default_headers(headers);

    if timeout_seconds > 0 {
        let timeout = Duration::from_secs(timeout_seconds.try_into().unwrap_or(u64::MAX));
        builder = builder.timeout(timeout);
    }

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| RunnerError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| RunnerError::HttpClientBuild { source: e })
}
