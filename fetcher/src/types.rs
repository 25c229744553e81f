use crate::*;

pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// A non-200 response. The message is taken from the JSON error body when
    /// the API sent one.
    #[error("{message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("{source} with data {snippet}...")]
    DecodeError {
        source: serde_json::Error,
        snippet: String,
    },
    #[error(transparent)]
    UrlError(#[from] url::ParseError),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("unknown response {0}")]
    UnknownResponse(String),
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub network: Network,
    pub api_key_id: String,
    pub api_key_secret: String,
    /// Replaces `DEFAULT_ROOT_URL`, e.g. to go through a proxy.
    pub root_url: Option<String>,
    pub timeout_duration: Option<Duration>,
    /// Number of concurrent requests used by the multi-transaction calls.
    pub num_workers: usize,
}

impl ChainConfig {
    pub fn new(
        network: Network,
        api_key_id: impl Into<String>,
        api_key_secret: impl Into<String>,
    ) -> Self {
        Self {
            network,
            api_key_id: api_key_id.into(),
            api_key_secret: api_key_secret.into(),
            root_url: None,
            timeout_duration: None,
            num_workers: DEFAULT_NUM_WORKERS,
        }
    }
}
