use thiserror::Error;

#[derive(Error, Debug)]
pub enum Dhis2Error {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("DHIS2 request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse DHIS2 response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("invalid DHIS2 base url '{0}'")]
    InvalidBaseUrl(String),
}
