use crate::*;
use serde::de::DeserializeOwned;
use url::Url;

pub const LOG_TARGET: &str = "chain-api-fetcher";

pub const DEFAULT_ROOT_URL: &str = "https://api.chain.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Worker count used by the multi-transaction calls unless configured otherwise.
pub const DEFAULT_NUM_WORKERS: usize = 5;

/// Maximum number of addresses a multi-address call can take.
pub const MAX_ADDRESSES: usize = 200;
pub const MAX_ADDRESS_TRANSACTIONS_LIMIT: u32 = 500;
pub const DEFAULT_ADDRESS_TRANSACTIONS_LIMIT: u32 = 50;

const SNIPPET_LEN: usize = 30;

/// Appends path segments to `base`. Segments are percent-encoded, so a hash
/// can never escape its position in the path.
pub(crate) fn join_segments<S: AsRef<str>>(base: &Url, segments: &[S]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.push(segment.as_ref());
        }
    }
    url
}

pub(crate) fn parse_root_url(root_url: &str) -> FetchResult<Url> {
    let url = Url::parse(root_url)?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidArgument(format!(
            "root url {} can't have path segments",
            root_url
        )));
    }
    Ok(url)
}

pub(crate) fn validate_addresses<S: AsRef<str>>(hashes: &[S]) -> FetchResult<String> {
    if hashes.is_empty() {
        return Err(FetchError::InvalidArgument(
            "at least one address is required".to_string(),
        ));
    }
    if hashes.len() > MAX_ADDRESSES {
        return Err(FetchError::InvalidArgument(format!(
            "max addresses allowed is {}",
            MAX_ADDRESSES
        )));
    }
    Ok(hashes
        .iter()
        .map(|hash| hash.as_ref())
        .collect::<Vec<_>>()
        .join(","))
}

pub(crate) fn address_transactions_limit(limit: Option<u32>) -> FetchResult<u32> {
    match limit {
        None | Some(0) => Ok(DEFAULT_ADDRESS_TRANSACTIONS_LIMIT),
        Some(limit) if limit > MAX_ADDRESS_TRANSACTIONS_LIMIT => {
            Err(FetchError::InvalidArgument(format!(
                "limit must be <= {}",
                MAX_ADDRESS_TRANSACTIONS_LIMIT
            )))
        }
        Some(limit) => Ok(limit),
    }
}

/// Quoted prefix of a response body for error messages.
pub(crate) fn snippet(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    let prefix: String = text.chars().take(SNIPPET_LEN).collect();
    format!("{:?}", prefix)
}

pub(crate) fn decode_json<T: DeserializeOwned>(data: &[u8]) -> FetchResult<T> {
    serde_json::from_slice(data).map_err(|source| FetchError::DecodeError {
        source,
        snippet: snippet(data),
    })
}

#[derive(Default, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Builds the error for a non-200 response from its body.
pub(crate) fn api_error(url: &Url, status: reqwest::StatusCode, body: &[u8]) -> FetchError {
    // A `null` body decodes as an empty error object and falls back to the raw text.
    let message = match serde_json::from_slice::<Option<ApiErrorBody>>(body) {
        Ok(parsed) => {
            let ApiErrorBody { message, error } = parsed.unwrap_or_default();
            message
                .filter(|message| !message.is_empty())
                .or(error.filter(|error| !error.is_empty()))
                .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
        }
        Err(_) => format!("{}: {}: {}...", url, status, snippet(body)),
    };
    FetchError::ApiError { status, message }
}
