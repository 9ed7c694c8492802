//! The reconcile engine: one variant at a time, cooldown gate first, then
//! read → classify → write-guard → write, with per-variant error isolation.

pub mod cooldown;
pub mod queue;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use shelftag_core::{classify, decide_write, WriteDecision};
use shelftag_shopify::{ShopifyClient, ShopifyError};

use cooldown::CooldownStore;

/// Drives the reconcile pipeline for individual variants and batches.
pub struct Engine {
    client: Arc<ShopifyClient>,
    cooldown: Arc<dyn CooldownStore>,
    /// Pause after each classify-or-write sequence: the backpressure
    /// against the platform's rate limits. A blocking pause on the
    /// processing path, not a token bucket.
    inter_call_delay: Duration,
}

/// What happened to one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target label differed and the mutation succeeded.
    Written,
    /// The stored label already matched the target.
    SkippedUnchanged,
    /// Target was the empty sentinel over an already-empty label.
    SkippedAlreadyEmpty,
    /// Suppressed by the cooldown gate before any network call.
    CooledDown,
    /// The variant vanished between notification and read.
    NotFound,
    /// Read or write failed; logged, siblings unaffected.
    Failed,
}

/// Tallies for one batch run.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchSummary {
    pub processed: usize,
    pub written: usize,
    pub skipped: usize,
    pub cooled_down: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl Engine {
    #[must_use]
    pub fn new(
        client: Arc<ShopifyClient>,
        cooldown: Arc<dyn CooldownStore>,
        inter_call_delay: Duration,
    ) -> Self {
        Self {
            client,
            cooldown,
            inter_call_delay,
        }
    }

    /// Runs the full pipeline for one variant id.
    ///
    /// Never returns an error: every failure mode degrades to an
    /// [`Outcome`] so that batch processing continues with the next id.
    pub async fn reconcile(&self, variant_id: &str) -> Outcome {
        if !self.cooldown.admit(variant_id) {
            tracing::debug!(variant_id, "variant in cooldown — skipping");
            return Outcome::CooledDown;
        }

        let snapshot = match self.client.variant_snapshot(variant_id).await {
            Ok(snapshot) => snapshot,
            Err(ShopifyError::NotFound { .. }) => {
                tracing::debug!(variant_id, "variant no longer exists — skipping");
                return Outcome::NotFound;
            }
            Err(err) => {
                tracing::warn!(variant_id, error = %err, "variant read failed — skipping");
                return Outcome::Failed;
            }
        };

        let target = classify(Utc::now(), &snapshot.facts);
        let outcome = match decide_write(&snapshot.current_label, target) {
            WriteDecision::Write => {
                match self
                    .client
                    .write_label(variant_id, target.metafield_value())
                    .await
                {
                    Ok(()) => {
                        tracing::info!(
                            variant_id,
                            from = %snapshot.current_label,
                            to = %target,
                            "label updated"
                        );
                        Outcome::Written
                    }
                    Err(err @ ShopifyError::UserErrors { .. }) => {
                        tracing::error!(variant_id, error = %err, "label write rejected");
                        Outcome::Failed
                    }
                    Err(err) => {
                        tracing::warn!(variant_id, error = %err, "label write failed");
                        Outcome::Failed
                    }
                }
            }
            WriteDecision::SkipUnchanged => {
                tracing::debug!(variant_id, label = %target, "label unchanged — no write");
                Outcome::SkippedUnchanged
            }
            WriteDecision::SkipAlreadyEmpty => {
                tracing::debug!(variant_id, "label already empty — no write");
                Outcome::SkippedAlreadyEmpty
            }
        };

        if self.inter_call_delay > Duration::ZERO {
            tokio::time::sleep(self.inter_call_delay).await;
        }

        outcome
    }

    /// Reconciles a batch of ids sequentially, tallying outcomes.
    ///
    /// Failures local to one id never abort the rest of the batch.
    pub async fn reconcile_batch(&self, variant_ids: &[String]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for variant_id in variant_ids {
            summary.processed += 1;
            match self.reconcile(variant_id).await {
                Outcome::Written => summary.written += 1,
                Outcome::SkippedUnchanged | Outcome::SkippedAlreadyEmpty => summary.skipped += 1,
                Outcome::CooledDown => summary.cooled_down += 1,
                Outcome::NotFound => summary.not_found += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }
        summary
    }
}
