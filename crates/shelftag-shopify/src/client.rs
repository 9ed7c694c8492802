//! HTTP client for the Shopify Admin GraphQL API.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ShopifyError;
use crate::types::{GraphQlRequest, GraphQlResponse};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the Admin GraphQL endpoint of one shop.
///
/// Handles rate limiting (429), server faults, and GraphQL-level errors as
/// typed [`ShopifyError`] values. Individual operations (reader, writer,
/// enumerator, subscription reconciler) live in their own modules and share
/// the [`ShopifyClient::graphql`] call path, which applies the configured
/// fixed-delay retry policy to transient failures.
pub struct ShopifyClient {
    pub(crate) client: Client,
    pub(crate) endpoint: Url,
    pub(crate) access_token: String,
    /// Maximum number of retry attempts after the first failure.
    pub(crate) max_retries: u32,
    /// Fixed delay in seconds between retry attempts.
    pub(crate) retry_delay_secs: u64,
}

impl ShopifyClient {
    /// Creates a client pointed at the shop's Admin GraphQL endpoint,
    /// `https://<shop_domain>/admin/api/<api_version>/graphql.json`.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for transient errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShopifyError::InvalidEndpoint`] if the
    /// shop domain does not form a valid URL.
    pub fn new(
        shop_domain: &str,
        api_version: &str,
        access_token: &str,
        timeout_secs: u64,
        max_retries: u32,
        retry_delay_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let endpoint = format!("https://{shop_domain}/admin/api/{api_version}/graphql.json");
        Self::with_endpoint(
            &endpoint,
            access_token,
            timeout_secs,
            max_retries,
            retry_delay_secs,
        )
    }

    /// Creates a client with an explicit endpoint URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShopifyError::InvalidEndpoint`] if
    /// `endpoint` is not a valid URL.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        max_retries: u32,
        retry_delay_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shelftag/0.1 (label-sync)")
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| ShopifyError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
            max_retries,
            retry_delay_secs,
        })
    }

    /// Executes one GraphQL call and returns the `data` object.
    ///
    /// `context` names the operation for error messages. This is a single
    /// attempt; callers wanting the retry policy go through
    /// [`Self::graphql_with_retry`].
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::RateLimited`] — HTTP 429, with the `Retry-After`
    ///   value when the header is present (default 60 s).
    /// - [`ShopifyError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ShopifyError::Http`] — network or TLS failure.
    /// - [`ShopifyError::Deserialize`] — response body is not a GraphQL
    ///   envelope.
    /// - [`ShopifyError::GraphQl`] — the envelope carries top-level errors.
    /// - [`ShopifyError::MissingData`] — the envelope has neither data nor
    ///   errors.
    pub(crate) async fn graphql(
        &self,
        context: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope =
            serde_json::from_str::<GraphQlResponse>(&body).map_err(|e| {
                ShopifyError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                }
            })?;

        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            return Err(ShopifyError::GraphQl {
                context: context.to_owned(),
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        envelope.data.ok_or_else(|| ShopifyError::MissingData {
            context: context.to_owned(),
        })
    }

    /// Executes one GraphQL call under the configured retry policy.
    pub(crate) async fn graphql_with_retry(
        &self,
        context: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError> {
        crate::retry::retry_with_delay(self.max_retries, self.retry_delay_secs, || {
            self.graphql(context, query, variables.clone())
        })
        .await
    }
}
