use std::fmt;
use std::time::Duration;

use miette::Diagnostic;
use oauth2::HttpClientError;
use oauth2::basic::BasicErrorResponse;
use serde::Deserialize;
use thiserror::Error;

/// A single error element inside a [`Fault`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FaultError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default, rename = "code")]
    pub code: Option<String>,
    #[serde(default, rename = "element")]
    pub element: Option<String>,
}

/// The `Fault` object QuickBooks returns on failed requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Fault {
    #[serde(default, rename = "Error")]
    pub errors: Vec<FaultError>,
    #[serde(default, rename = "type")]
    pub fault_type: Option<String>,
}

/// The full error body: `{"Fault": {...}, "time": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FaultResponse {
    pub fault: Fault,
    #[serde(default, rename = "time")]
    pub time: Option<String>,
}

impl fmt::Display for FaultResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.fault.fault_type.as_deref().unwrap_or("Fault")
        )?;
        for error in &self.fault.errors {
            write!(f, ": {}", error.message)?;
            if let Some(code) = &error.code {
                write!(f, " (code {code})")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when interacting with the QuickBooks API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {0:?}")]
    #[diagnostic(
        code(quickbooks_rs::request_error),
        help("Check your network connection and QuickBooks API availability")
    )]
    Request(#[source] reqwest::Error),

    #[error("error decoding response: {0:?}")]
    #[diagnostic(
        code(quickbooks_rs::deserialization_error),
        help("The API returned data in an unexpected format")
    )]
    DeserializationError(#[source] serde_json::Error, Option<String>),

    /// An operation that needs a server-assigned `Id` was attempted on an
    /// entity that has never been saved. Raised before any network call.
    #[error("cannot {operation} {entity} without an Id")]
    #[diagnostic(
        code(quickbooks_rs::unsaved_object),
        help("Save the {entity} first, or fetch it from the API so it carries an Id")
    )]
    UnsavedObject {
        operation: &'static str,
        entity: &'static str,
    },

    #[error("response did not contain the expected {expected:?} object")]
    #[diagnostic(
        code(quickbooks_rs::unexpected_response),
        help("The API response was missing the wrapper key for the requested entity")
    )]
    UnexpectedResponse { expected: String },

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(quickbooks_rs::invalid_endpoint),
        help("Check that the API endpoint URL is correctly formatted")
    )]
    InvalidEndpoint,

    /// A fault reported by the API, such as a `ValidationFault`.
    #[error("QuickBooks API fault: {0}")]
    #[diagnostic(
        code(quickbooks_rs::api_fault),
        help("Review the fault details returned by the QuickBooks API")
    )]
    Fault(FaultResponse),

    #[error("authentication failed: {response_body:?}")]
    #[diagnostic(
        code(quickbooks_rs::authentication),
        help("The access token is missing, expired, or revoked; refresh it and retry")
    )]
    AuthenticationFailed {
        status_code: reqwest::StatusCode,
        response_body: Option<String>,
    },

    /// An error returned during `OAuth2` operations.
    #[error("oauth2 error: {0:?}")]
    #[diagnostic(
        code(quickbooks_rs::oauth2_error),
        help("Verify your OAuth2 configuration and credentials")
    )]
    OAuth2(oauth2::RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>),

    /// Rate limit exceeded (HTTP 429 Too Many Requests).
    #[error("rate limit exceeded: retry after {retry_after:?}")]
    #[diagnostic(
        code(quickbooks_rs::rate_limit_exceeded),
        help("The QuickBooks API rate limit has been exceeded. Wait and retry, or throttle requests.")
    )]
    RateLimitExceeded {
        retry_after: Option<Duration>,
        status_code: reqwest::StatusCode,
        url: String,
        response_body: Option<String>,
    },
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::DeserializationError(e, None)
    }
}

impl From<oauth2::RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>>
    for Error
{
    fn from(
        e: oauth2::RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>,
    ) -> Self {
        Self::OAuth2(e)
    }
}

/// Type alias for results from this crate.
pub type Result<O> = std::result::Result<O, Error>;
