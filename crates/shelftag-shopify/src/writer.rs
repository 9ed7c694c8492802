//! Single-variant write: one `metafieldsSet` mutation per label update.

use crate::client::ShopifyClient;
use crate::error::ShopifyError;
use crate::types::{variant_gid, MetafieldsSetData};
use crate::{LABEL_KEY, LABEL_NAMESPACE};

const SET_LABEL_MUTATION: &str = r"
mutation SetVariantLabel($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields {
      id
    }
    userErrors {
      field
      message
    }
  }
}
";

impl ShopifyClient {
    /// Sets the label metafield on one variant.
    ///
    /// `value` is the canonical label value; the empty string clears the
    /// label. Transient failures are retried under the configured policy;
    /// platform validation errors come back as
    /// [`ShopifyError::UserErrors`] and must not be retried — they indicate
    /// a malformed request, not contention.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UserErrors`] — field-level validation failures.
    /// - [`ShopifyError::MissingData`] — the mutation payload was absent.
    /// - Transient errors, after the configured retries are exhausted.
    pub async fn write_label(&self, variant_id: &str, value: &str) -> Result<(), ShopifyError> {
        let gid = variant_gid(variant_id);
        let context = format!("metafieldsSet({gid})");
        let variables = serde_json::json!({
            "metafields": [{
                "ownerId": gid,
                "namespace": LABEL_NAMESPACE,
                "key": LABEL_KEY,
                "type": "single_line_text_field",
                "value": value,
            }]
        });

        let data = self
            .graphql_with_retry(&context, SET_LABEL_MUTATION, variables)
            .await?;

        let parsed: MetafieldsSetData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let payload = parsed
            .metafields_set
            .ok_or_else(|| ShopifyError::MissingData {
                context: context.clone(),
            })?;

        if !payload.user_errors.is_empty() {
            return Err(ShopifyError::UserErrors {
                context,
                messages: payload
                    .user_errors
                    .into_iter()
                    .map(|e| match e.field {
                        Some(field) => format!("{}: {}", field.join("."), e.message),
                        None => e.message,
                    })
                    .collect(),
            });
        }

        Ok(())
    }
}
