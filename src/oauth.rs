use oauth2::basic::{
    BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
    BasicTokenType,
};
use oauth2::{EndpointNotSet, EndpointSet, StandardRevocableToken, StandardTokenResponse};
use serde::{Deserialize, Serialize};

/// Stores the OAuth 2 client ID and client secret.
#[derive(Debug, Clone)]
pub struct KeyPair(
    pub(crate) oauth2::ClientId,
    pub(crate) Option<oauth2::ClientSecret>,
);

impl KeyPair {
    /// Creates a new `KeyPair` from the provided `client_id` and `client_secret` strings.
    #[must_use]
    pub fn new(client_id: String, client_secret: Option<String>) -> Self {
        Self(
            oauth2::ClientId::new(client_id),
            client_secret.map(oauth2::ClientSecret::new),
        )
    }

    /// Creates a new `KeyPair` from `QB_CLIENT_ID` and `QB_CLIENT_SECRET` environment variables.
    ///
    /// # Panics
    /// Panics if the `QB_CLIENT_ID` environment variable is not set.
    #[must_use]
    pub fn from_env() -> Self {
        Self(
            oauth2::ClientId::new(std::env::var("QB_CLIENT_ID").expect("QB_CLIENT_ID not set")),
            std::env::var("QB_CLIENT_SECRET")
                .ok()
                .map(oauth2::ClientSecret::new),
        )
    }
}

/// Extra fields Intuit's token endpoint returns alongside the standard set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntuitTokenFields {
    /// Lifetime of the refresh token, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_refresh_token_expires_in: Option<u64>,
    /// OpenID Connect identity token, present when the `openid` scope was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl oauth2::ExtraTokenFields for IntuitTokenFields {}

pub type TokenResponse = StandardTokenResponse<IntuitTokenFields, BasicTokenType>;

/// An OAuth 2 client configured with Intuit's authorization and token endpoints.
pub type OAuthClient = oauth2::Client<
    BasicErrorResponse,
    TokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;
