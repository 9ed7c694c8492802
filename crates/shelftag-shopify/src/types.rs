//! Wire types for the Admin GraphQL API.
//!
//! ## Observed response shapes
//!
//! ### Prices
//! `price` and `compareAtPrice` on `ProductVariant` are decimal strings
//! (`"12.99"`), with `compareAtPrice` explicitly `null` when the variant is
//! not on sale. We pass them through as-is; parsing happens in the
//! classifier.
//!
//! ### Metafields
//! Metafields come back as an edge list, not a map. The reader flattens
//! `edges[].node.{namespace,key,value}` into a lookup map before use.
//! Boolean metafields carry the string values `"true"` / `"false"`.
//!
//! ### Webhook endpoints
//! `WebhookSubscription.endpoint` is a union; only `WebhookHttpEndpoint`
//! carries a `callbackUrl`. Other endpoint kinds (EventBridge, PubSub)
//! deserialize with `callback_url: None` and never match our callback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// POST body of a GraphQL call.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// A connection without pagination info (single-page reads).
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

/// A connection the caller pages through.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedConnection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// `userErrors` entry on Admin mutations.
#[derive(Debug, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Variant facts query
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VariantFactsData {
    #[serde(rename = "productVariant")]
    pub product_variant: Option<VariantFactsNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFactsNode {
    pub created_at: DateTime<Utc>,
    pub price: String,
    #[serde(default)]
    pub compare_at_price: Option<String>,
    pub product: ProductNode,
    pub metafields: Connection<MetafieldNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct MetafieldNode {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Variant id enumeration
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VariantIdsData {
    #[serde(rename = "productVariants")]
    pub product_variants: PagedConnection<IdNode>,
}

#[derive(Debug, Deserialize)]
pub struct IdNode {
    pub id: String,
}

// ---------------------------------------------------------------------------
// metafieldsSet mutation
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MetafieldsSetData {
    #[serde(rename = "metafieldsSet")]
    pub metafields_set: Option<MetafieldsSetPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldsSetPayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

// ---------------------------------------------------------------------------
// Webhook subscription management
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WebhookSubscriptionsData {
    #[serde(rename = "webhookSubscriptions")]
    pub webhook_subscriptions: Connection<WebhookSubscriptionNode>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookSubscriptionNode {
    pub id: String,
    #[serde(default)]
    pub endpoint: Option<WebhookEndpoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEndpoint {
    #[serde(default)]
    pub callback_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookCreateData {
    #[serde(rename = "webhookSubscriptionCreate")]
    pub webhook_subscription_create: Option<WebhookCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreatePayload {
    #[serde(default)]
    pub webhook_subscription: Option<IdNode>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookDeleteData {
    #[serde(rename = "webhookSubscriptionDelete")]
    pub webhook_subscription_delete: Option<WebhookDeletePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDeletePayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// Normalizes a variant identifier to its GraphQL GID form.
///
/// Webhook payloads carry bare numeric ids while GraphQL responses carry
/// `gid://shopify/ProductVariant/<id>`; the pipeline accepts either.
#[must_use]
pub fn variant_gid(id: &str) -> String {
    if id.starts_with("gid://") {
        id.to_owned()
    } else {
        format!("gid://shopify/ProductVariant/{id}")
    }
}
