//! Full-catalog variant enumeration via cursor pagination.

use std::time::Duration;

use crate::client::ShopifyClient;
use crate::error::ShopifyError;
use crate::retry::retry_with_delay;
use crate::types::VariantIdsData;

/// Maximum number of pages to fetch before stopping.
/// Prevents infinite loops on cycling cursors.
///
/// Note: each page request may be retried up to `max_retries` times on
/// transient errors, so the effective worst-case request count is
/// `MAX_PAGES * (1 + max_retries)`.
const MAX_PAGES: usize = 1000;

const VARIANT_IDS_QUERY: &str = r"
query VariantIds($first: Int!, $after: String) {
  productVariants(first: $first, after: $after) {
    edges {
      node {
        id
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
";

/// The result of a full-catalog enumeration.
///
/// `complete` is `false` when a page failed after exhausting its retries
/// (or the [`MAX_PAGES`] guard tripped) and enumeration stopped early with
/// whatever had been collected. Callers must treat an incomplete run as a
/// partial sync, not as the whole catalog.
#[derive(Debug, Clone)]
pub struct CatalogEnumeration {
    pub variant_ids: Vec<String>,
    pub complete: bool,
}

impl ShopifyClient {
    /// Enumerates every variant id in the catalog, page by page.
    ///
    /// Pages are fetched with the configured per-page retry policy and an
    /// `inter_page_delay_ms` pause between pages (skipped before the
    /// first). A page failure after retries stops enumeration early and
    /// returns the ids collected so far with `complete: false` — a single
    /// feed outage bounds the run instead of stalling it, at the cost of
    /// that run being partial.
    pub async fn enumerate_variant_ids(
        &self,
        page_size: u32,
        inter_page_delay_ms: u64,
    ) -> CatalogEnumeration {
        let mut variant_ids: Vec<String> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut is_first_page = true;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                tracing::warn!(
                    max_pages = MAX_PAGES,
                    collected = variant_ids.len(),
                    "variant enumeration exceeded the page guard — stopping early"
                );
                return CatalogEnumeration {
                    variant_ids,
                    complete: false,
                };
            }

            if !is_first_page && inter_page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_page_delay_ms)).await;
            }
            is_first_page = false;

            let page = retry_with_delay(self.max_retries, self.retry_delay_secs, || {
                self.fetch_variant_id_page(page_size, cursor.as_deref())
            })
            .await;

            match page {
                Ok(page) => {
                    variant_ids.extend(page.ids);
                    if !page.has_next_page {
                        return CatalogEnumeration {
                            variant_ids,
                            complete: true,
                        };
                    }
                    cursor = page.end_cursor;
                }
                Err(err) => {
                    tracing::warn!(
                        page = page_count,
                        collected = variant_ids.len(),
                        error = %err,
                        "variant enumeration page failed after retries — returning partial result"
                    );
                    return CatalogEnumeration {
                        variant_ids,
                        complete: false,
                    };
                }
            }
        }
    }

    async fn fetch_variant_id_page(
        &self,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<VariantIdPage, ShopifyError> {
        let context = "variantIds";
        let data = self
            .graphql(
                context,
                VARIANT_IDS_QUERY,
                serde_json::json!({ "first": page_size, "after": cursor }),
            )
            .await?;

        let parsed: VariantIdsData =
            serde_json::from_value(data).map_err(|e| ShopifyError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        let connection = parsed.product_variants;
        Ok(VariantIdPage {
            ids: connection.edges.into_iter().map(|e| e.node.id).collect(),
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        })
    }
}

struct VariantIdPage {
    ids: Vec<String>,
    has_next_page: bool,
    end_cursor: Option<String>,
}
