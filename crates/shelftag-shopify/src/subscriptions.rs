//! Idempotent webhook-subscription registration.
//!
//! Run once at process start: converges the platform-side subscription
//! metadata to exactly one `PRODUCTS_UPDATE` subscription at this process's
//! callback address, no matter how many restarts created duplicates before.

use crate::client::ShopifyClient;
use crate::error::ShopifyError;
use crate::types::{WebhookCreateData, WebhookDeleteData, WebhookSubscriptionsData};

/// Webhook topic covering product and variant changes.
pub const PRODUCTS_UPDATE_TOPIC: &str = "PRODUCTS_UPDATE";

const LIST_SUBSCRIPTIONS_QUERY: &str = r"
query WebhookSubscriptions($topics: [WebhookSubscriptionTopic!]) {
  webhookSubscriptions(first: 100, topics: $topics) {
    edges {
      node {
        id
        endpoint {
          __typename
          ... on WebhookHttpEndpoint {
            callbackUrl
          }
        }
      }
    }
  }
}
";

const CREATE_SUBSCRIPTION_MUTATION: &str = r"
mutation WebhookSubscriptionCreate($topic: WebhookSubscriptionTopic!, $webhookSubscription: WebhookSubscriptionInput!) {
  webhookSubscriptionCreate(topic: $topic, webhookSubscription: $webhookSubscription) {
    webhookSubscription {
      id
    }
    userErrors {
      field
      message
    }
  }
}
";

const DELETE_SUBSCRIPTION_MUTATION: &str = r"
mutation WebhookSubscriptionDelete($id: ID!) {
  webhookSubscriptionDelete(id: $id) {
    deletedWebhookSubscriptionId
    userErrors {
      field
      message
    }
  }
}
";

/// What the reconciler found and did.
#[derive(Debug, Clone)]
pub struct SubscriptionReconcile {
    /// The id of the surviving (or newly created) subscription.
    pub subscription_id: String,
    /// Whether a new subscription had to be created.
    pub created: bool,
    /// How many duplicate subscriptions were deleted.
    pub deleted: usize,
}

impl ShopifyClient {
    /// Converges to exactly one `PRODUCTS_UPDATE` subscription at
    /// `callback_url`.
    ///
    /// Lists the topic's subscriptions, keeps the first whose callback URL
    /// matches, deletes the other matches, and creates one if none match.
    /// Subscriptions pointing at other callback addresses (other
    /// deployments of this service, unrelated apps) are left untouched.
    /// Safe to run repeatedly and concurrently with normal traffic — it
    /// only touches platform-side metadata, never variant data.
    ///
    /// # Errors
    ///
    /// Propagates [`ShopifyError`] from the underlying list/create/delete
    /// calls; [`ShopifyError::UserErrors`] when a mutation is rejected.
    pub async fn reconcile_webhook_subscription(
        &self,
        callback_url: &str,
    ) -> Result<SubscriptionReconcile, ShopifyError> {
        let context = "webhookSubscriptions";
        let data = self
            .graphql_with_retry(
                context,
                LIST_SUBSCRIPTIONS_QUERY,
                serde_json::json!({ "topics": [PRODUCTS_UPDATE_TOPIC] }),
            )
            .await?;

        let parsed: WebhookSubscriptionsData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        let matching: Vec<String> = parsed
            .webhook_subscriptions
            .edges
            .into_iter()
            .filter(|edge| {
                edge.node
                    .endpoint
                    .as_ref()
                    .and_then(|e| e.callback_url.as_deref())
                    == Some(callback_url)
            })
            .map(|edge| edge.node.id)
            .collect();

        match matching.split_first() {
            Some((keep, duplicates)) => {
                for id in duplicates {
                    self.delete_subscription(id).await?;
                    tracing::info!(subscription_id = %id, "deleted duplicate webhook subscription");
                }
                Ok(SubscriptionReconcile {
                    subscription_id: keep.clone(),
                    created: false,
                    deleted: duplicates.len(),
                })
            }
            None => {
                let id = self.create_subscription(callback_url).await?;
                tracing::info!(subscription_id = %id, callback_url, "created webhook subscription");
                Ok(SubscriptionReconcile {
                    subscription_id: id,
                    created: true,
                    deleted: 0,
                })
            }
        }
    }

    async fn create_subscription(&self, callback_url: &str) -> Result<String, ShopifyError> {
        let context = "webhookSubscriptionCreate";
        let variables = serde_json::json!({
            "topic": PRODUCTS_UPDATE_TOPIC,
            "webhookSubscription": {
                "callbackUrl": callback_url,
                "format": "JSON",
            }
        });

        let data = self
            .graphql_with_retry(context, CREATE_SUBSCRIPTION_MUTATION, variables)
            .await?;

        let parsed: WebhookCreateData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        let payload = parsed
            .webhook_subscription_create
            .ok_or_else(|| ShopifyError::MissingData {
                context: context.to_owned(),
            })?;

        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserErrors {
                context: context.to_owned(),
                messages: payload.user_errors.into_iter().map(|e| e.message).collect(),
            });
        }

        payload
            .webhook_subscription
            .map(|node| node.id)
            .ok_or_else(|| ShopifyError::MissingData {
                context: context.to_owned(),
            })
    }

    async fn delete_subscription(&self, id: &str) -> Result<(), ShopifyError> {
        let context = "webhookSubscriptionDelete";
        let data = self
            .graphql_with_retry(
                context,
                DELETE_SUBSCRIPTION_MUTATION,
                serde_json::json!({ "id": id }),
            )
            .await?;

        let parsed: WebhookDeleteData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        let payload = parsed
            .webhook_subscription_delete
            .ok_or_else(|| ShopifyError::MissingData {
                context: context.to_owned(),
            })?;

        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserErrors {
                context: context.to_owned(),
                messages: payload.user_errors.into_iter().map(|e| e.message).collect(),
            });
        }

        Ok(())
    }
}
