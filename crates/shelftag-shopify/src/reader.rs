//! Single-variant read: everything the classifier needs, in one query.

use std::collections::HashMap;

use shelftag_core::VariantFacts;

use crate::client::ShopifyClient;
use crate::error::ShopifyError;
use crate::types::{variant_gid, VariantFactsData};
use crate::{LABEL_KEY, LABEL_NAMESPACE, SIGNAL_KEY, SIGNAL_NAMESPACE};

const VARIANT_FACTS_QUERY: &str = r"
query VariantFacts($id: ID!) {
  productVariant(id: $id) {
    id
    createdAt
    price
    compareAtPrice
    product {
      createdAt
    }
    metafields(first: 20) {
      edges {
        node {
          namespace
          key
          value
        }
      }
    }
  }
}
";

/// One variant's classification inputs plus its currently stored label.
#[derive(Debug, Clone)]
pub struct VariantSnapshot {
    pub facts: VariantFacts,
    /// Raw value of the label metafield; empty string when unset.
    pub current_label: String,
}

impl ShopifyClient {
    /// Fetches the full classification-input record for one variant.
    ///
    /// All-or-nothing: either a complete [`VariantSnapshot`] comes back or
    /// an error does. The variant's metafield edge list is flattened into a
    /// `(namespace, key) → value` map before the best-seller signal and the
    /// current label are extracted, so extra metafields on the variant are
    /// harmless.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::NotFound`] — the id resolves to no variant
    ///   (deleted between notification and read). Not retried.
    /// - [`ShopifyError::Deserialize`] — the response shape is wrong. Not
    ///   retried.
    /// - Transient errors, after the configured retries are exhausted.
    pub async fn variant_snapshot(
        &self,
        variant_id: &str,
    ) -> Result<VariantSnapshot, ShopifyError> {
        let gid = variant_gid(variant_id);
        let context = format!("variantSnapshot({gid})");
        let data = self
            .graphql_with_retry(
                &context,
                VARIANT_FACTS_QUERY,
                serde_json::json!({ "id": gid }),
            )
            .await?;

        let parsed: VariantFactsData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let Some(node) = parsed.product_variant else {
            return Err(ShopifyError::NotFound { variant_id: gid });
        };

        let metafields: HashMap<(String, String), String> = node
            .metafields
            .edges
            .into_iter()
            .map(|edge| {
                (
                    (edge.node.namespace, edge.node.key),
                    edge.node.value,
                )
            })
            .collect();

        let bestseller = metafields
            .get(&(SIGNAL_NAMESPACE.to_owned(), SIGNAL_KEY.to_owned()))
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        let current_label = metafields
            .get(&(LABEL_NAMESPACE.to_owned(), LABEL_KEY.to_owned()))
            .cloned()
            .unwrap_or_default();

        Ok(VariantSnapshot {
            facts: VariantFacts {
                variant_created_at: node.created_at,
                product_created_at: node.product.created_at,
                price: node.price,
                compare_at_price: node.compare_at_price,
                bestseller,
            },
            current_label,
        })
    }
}
