//! The pending queue: unbounded producer, bounded batch consumer.
//!
//! Enqueueing never blocks (webhook handlers must answer fast); the
//! consumer task drains at most `batch_size` ids per `interval` tick and
//! runs them through the engine. Batch size and interval are configuration
//! because they trade throughput against upstream rate-limit risk.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;

use super::Engine;

/// Handle for enqueueing variant ids. Cheap to clone.
#[derive(Clone)]
pub struct PendingQueue {
    tx: mpsc::UnboundedSender<String>,
}

impl PendingQueue {
    /// Spawns the consumer task and returns the producer handle.
    ///
    /// The consumer exits when every producer handle has been dropped and
    /// the queue has drained.
    pub fn spawn(
        engine: Arc<Engine>,
        batch_size: usize,
        interval: Duration,
    ) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let mut batch = Vec::with_capacity(batch_size);
                let mut disconnected = false;
                while batch.len() < batch_size {
                    match rx.try_recv() {
                        Ok(id) => batch.push(id),
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            disconnected = true;
                            break;
                        }
                    }
                }

                if !batch.is_empty() {
                    let summary = engine.reconcile_batch(&batch).await;
                    tracing::info!(
                        processed = summary.processed,
                        written = summary.written,
                        skipped = summary.skipped,
                        cooled_down = summary.cooled_down,
                        not_found = summary.not_found,
                        failed = summary.failed,
                        "drained pending batch"
                    );
                }

                if disconnected {
                    tracing::info!("pending queue closed — consumer exiting");
                    return;
                }
            }
        });

        (Self { tx }, handle)
    }

    /// Adds one variant id to the queue. Never blocks.
    pub fn enqueue(&self, variant_id: String) {
        if self.tx.send(variant_id).is_err() {
            tracing::error!("pending queue consumer is gone — dropping variant id");
        }
    }

    /// Adds a set of variant ids, returning how many were accepted.
    pub fn enqueue_all<I>(&self, variant_ids: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut count = 0;
        for id in variant_ids {
            self.enqueue(id);
            count += 1;
        }
        count
    }
}
