use std::borrow::Cow;
use std::time::Duration;

use oauth2::{
    AccessToken, AuthorizationCode, CsrfToken, HttpClientError, RefreshToken, TokenResponse,
    basic::BasicErrorResponse,
};
use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;
use url::Url;
use uuid::Uuid;

use crate::endpoints::Environment;
use crate::error::{Error, FaultResponse, Result};
use crate::oauth::{KeyPair, OAuthClient};
use crate::scope::Scope;

const INTUIT_AUTH_URL: &str = "https://appcenter.intuit.com/connect/oauth2";
const INTUIT_TOKEN_URL: &str = "https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer";

const MAX_RETRY_ATTEMPTS: usize = 3;

/// The `minorversion` query parameter sent with every API call. Intuit
/// versions response payloads behind it; fields like `Item.Sku` only appear
/// from certain minor versions onward.
const MINOR_VERSION: u16 = 75;

/// Generates an idempotency id suitable for the `requestid` parameter on
/// create/update/delete calls.
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// The transport client for the QuickBooks API. Holds the OAuth 2 access
/// token and the company (realm) id, and executes authenticated requests.
///
/// This layer owns nothing but transport concerns: URL construction,
/// authentication headers, fault decoding, and 429 retry. Entity semantics
/// live in the capability traits in [`crate::operations`].
#[derive(Clone, Debug)]
pub struct QuickBooks {
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
    company_id: String,
    environment: Environment,
    base_url: Option<Url>,
    minor_version: u16,
}

impl QuickBooks {
    /// Creates a client from an already-obtained access token.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        company_id: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            access_token: AccessToken::new(access_token.into()),
            refresh_token: None,
            company_id: company_id.into(),
            environment,
            base_url: None,
            minor_version: MINOR_VERSION,
        }
    }

    fn build_oauth_client(key_pair: KeyPair) -> OAuthClient {
        let client = oauth2::Client::new(key_pair.0)
            .set_auth_uri(oauth2::AuthUrl::new(INTUIT_AUTH_URL.to_string()).unwrap())
            .set_token_uri(oauth2::TokenUrl::new(INTUIT_TOKEN_URL.to_string()).unwrap());

        match key_pair.1 {
            Some(secret) => client.set_client_secret(secret),
            None => client,
        }
    }

    /// Generates an authorization URL to use for the code flow authorization method.
    ///
    /// The user signs in at the returned URL; Intuit redirects back with a
    /// `code` and the selected company's `realmId`.
    #[instrument(skip(scopes))]
    pub fn authorize_url(
        key_pair: KeyPair,
        redirect_url: Url,
        scopes: &[Scope],
    ) -> (Url, CsrfToken) {
        Self::build_oauth_client(key_pair)
            .set_redirect_uri(oauth2::RedirectUrl::from_url(redirect_url))
            .authorize_url(CsrfToken::new_random)
            .add_scopes(scopes.iter().copied().map(Scope::into_oauth2))
            .url()
    }

    /// Creates an authorized client from a code generated in the code flow
    /// authorization method, bound to the company selected during consent.
    ///
    /// # Errors
    /// Returns an error if the token exchange fails.
    #[instrument(skip(code))]
    pub async fn from_authorization_code(
        key_pair: KeyPair,
        redirect_url: Url,
        code: String,
        company_id: impl Into<String> + std::fmt::Debug,
        environment: Environment,
    ) -> std::result::Result<
        Self,
        oauth2::RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>,
    > {
        let oauth_client = Self::build_oauth_client(key_pair);
        let http_client = reqwest::Client::new();

        let token_result = oauth_client
            .exchange_code(AuthorizationCode::new(code))
            .set_redirect_uri(Cow::Owned(oauth2::RedirectUrl::from_url(redirect_url)))
            .request_async(&http_client)
            .await?;

        Ok(Self {
            access_token: token_result.access_token().clone(),
            refresh_token: token_result.refresh_token().cloned(),
            company_id: company_id.into(),
            environment,
            base_url: None,
            minor_version: MINOR_VERSION,
        })
    }

    /// Refreshes the access token using the refresh token.
    pub async fn refresh_access_token(&mut self, key_pair: KeyPair) -> Result<()> {
        let oauth_client = Self::build_oauth_client(key_pair);
        let http_client = reqwest::Client::new();

        if let Some(refresh_token) = &self.refresh_token {
            let token_result = oauth_client
                .exchange_refresh_token(refresh_token)
                .request_async(&http_client)
                .await
                .map_err(Error::OAuth2)?;

            self.access_token = token_result.access_token().clone();
            if let Some(new_refresh_token) = token_result.refresh_token() {
                self.refresh_token = Some(new_refresh_token.clone());
            }
        }
        Ok(())
    }

    /// The company (realm) id this client is bound to.
    #[must_use]
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Overrides the API host. Primarily for tests against a local mock server.
    pub fn set_base_url(&mut self, url: Url) {
        trace!(%url, "overriding API base url");
        self.base_url = Some(url);
    }

    /// The versioned API root, e.g. `https://sandbox-quickbooks.api.intuit.com/v3`.
    #[must_use]
    pub fn api_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}/v3", base.as_str().trim_end_matches('/')),
            None => format!("{}/v3", self.environment.base_url()),
        }
    }

    /// Builds a URL under `…/v3/company/<realm>/`, carrying the `minorversion`
    /// parameter every API call requires.
    pub fn company_endpoint(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/company/{}/{}",
            self.api_url(),
            self.company_id,
            path
        ))
        .map_err(|_| Error::InvalidEndpoint)?;
        url.query_pairs_mut()
            .append_pair("minorversion", &self.minor_version.to_string());
        Ok(url)
    }

    fn build_http_client(&self) -> reqwest::Client {
        let mut headers = header::HeaderMap::new();
        headers.append(
            "Authorization",
            header::HeaderValue::from_str(&format!("Bearer {}", self.access_token.secret()))
                .unwrap(),
        );
        reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap()
    }

    /// Build a request object with authentication headers.
    pub(crate) fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.build_http_client()
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    /// Execute a request with automatic retry for rate limit errors.
    async fn execute_with_retry<T, F, Fut>(&self, request_fn: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match request_fn().await {
                Ok(result) => return Ok(result),
                Err(Error::RateLimitExceeded { retry_after, .. })
                    if attempts <= MAX_RETRY_ATTEMPTS =>
                {
                    let wait_time = retry_after.unwrap_or(Duration::from_secs(60));

                    warn!(
                        "rate limit exceeded (attempt {}/{}), waiting {:?} before retrying",
                        attempts, MAX_RETRY_ATTEMPTS, wait_time
                    );

                    sleep(wait_time).await;
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn rate_limit_error(response: reqwest::Response) -> Error {
        let status = response.status();
        let url = response.url().to_string();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);
        let text = response.text().await.unwrap_or_default();

        warn!(%url, ?retry_after, "rate limit exceeded");
        Error::RateLimitExceeded {
            retry_after,
            status_code: status,
            url,
            response_body: Some(text),
        }
    }

    fn fault_from_body(text: String) -> Error {
        match serde_json::from_str::<FaultResponse>(&text) {
            Ok(fault) => Error::Fault(fault),
            Err(e) => Error::DeserializationError(e, Some(text)),
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        debug!(%url, %status, "received response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Self::rate_limit_error(response).await);
        }

        let text = response.text().await?;
        trace!("response text:\n{text}");

        match status {
            StatusCode::OK => serde_json::from_str(&text).map_err(|e| {
                error!("failed to deserialize response: {e}");
                Error::DeserializationError(e, Some(text))
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::AuthenticationFailed {
                status_code: status,
                response_body: Some(text),
            }),
            _ => Err(Self::fault_from_body(text)),
        }
    }

    /// Perform an authenticated `GET` request against the API.
    #[instrument(skip(self))]
    pub async fn get<R: DeserializeOwned>(&self, url: Url, params: &[(&str, &str)]) -> Result<R> {
        self.execute_with_retry(|| async {
            trace!(%url, "making GET request");
            let response = self
                .build_request(Method::GET, url.clone())
                .query(params)
                .send()
                .await?;

            Self::handle_response(response).await
        })
        .await
    }

    /// Perform an authenticated `POST` request against the API with an
    /// already-encoded body.
    #[instrument(skip(self, body))]
    pub async fn post<R: DeserializeOwned>(
        &self,
        url: Url,
        body: Option<String>,
        content_type: &str,
        params: &[(&str, &str)],
    ) -> Result<R> {
        self.execute_with_retry(|| async {
            trace!(%url, content_type, "making POST request");
            let mut request = self
                .build_request(Method::POST, url.clone())
                .header(header::CONTENT_TYPE, content_type)
                .query(params);
            if let Some(body) = &body {
                request = request.body(body.clone());
            }
            let response = request.send().await?;

            Self::handle_response(response).await
        })
        .await
    }

    /// Execute a QuickBooks SQL-like select statement against the query endpoint.
    #[instrument(skip(self))]
    pub async fn query(&self, select: &str) -> Result<Value> {
        let url = self.company_endpoint("query")?;
        self.post(url, Some(select.to_owned()), "application/text", &[])
            .await
    }

    /// Fetch a single object by its primary key.
    #[instrument(skip(self))]
    pub async fn get_single_object(
        &self,
        object_name: &str,
        pk: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.company_endpoint(&format!("{}/{}", object_name.to_lowercase(), pk))?;
        self.get(url, params).await
    }

    async fn post_object(
        &self,
        object_name: &str,
        body: &str,
        request_id: Option<&str>,
        extra_params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.company_endpoint(&object_name.to_lowercase())?;
        let mut params: Vec<(&str, &str)> = extra_params.to_vec();
        if let Some(request_id) = request_id {
            params.push(("requestid", request_id));
        }
        self.post(url, Some(body.to_owned()), "application/json", &params)
            .await
    }

    /// Create a new object. The body must not carry an `Id`.
    #[instrument(skip(self, body))]
    pub async fn create_object(
        &self,
        object_name: &str,
        body: &str,
        request_id: Option<&str>,
    ) -> Result<Value> {
        self.post_object(object_name, body, request_id, &[]).await
    }

    /// Perform a full update of an existing object. The body must carry the
    /// current `Id` and `SyncToken`.
    #[instrument(skip(self, body))]
    pub async fn update_object(
        &self,
        object_name: &str,
        body: &str,
        request_id: Option<&str>,
    ) -> Result<Value> {
        self.post_object(object_name, body, request_id, &[]).await
    }

    /// Delete an object. The API models deletion as a POST with
    /// `operation=delete`.
    #[instrument(skip(self, body))]
    pub async fn delete_object(
        &self,
        object_name: &str,
        body: &str,
        request_id: Option<&str>,
    ) -> Result<Value> {
        self.post_object(object_name, body, request_id, &[("operation", "delete")])
            .await
    }

    /// Dispatch a miscellaneous operation under the company root, such as
    /// `invoice/<id>/send`.
    #[instrument(skip(self, body))]
    pub async fn misc_operation(
        &self,
        end_point: &str,
        body: Option<&str>,
        content_type: &str,
    ) -> Result<Value> {
        let url = self.company_endpoint(end_point)?;
        self.post(url, body.map(str::to_owned), content_type, &[])
            .await
    }

    /// Download an entity as PDF, returning the raw bytes.
    #[instrument(skip(self))]
    pub async fn download_pdf(&self, object_name: &str, id: &str) -> Result<Vec<u8>> {
        let url = self.company_endpoint(&format!("{}/{}/pdf", object_name.to_lowercase(), id))?;
        self.execute_with_retry(|| async {
            let response = self
                .build_request(Method::GET, url.clone())
                .header(header::ACCEPT, "application/pdf")
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(Self::rate_limit_error(response).await);
            }
            if status == StatusCode::OK {
                return Ok(response.bytes().await?.to_vec());
            }
            let text = response.text().await?;
            Err(Self::fault_from_body(text))
        })
        .await
    }
}
