//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring full-catalog sync job.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use shelftag_core::AppConfig;
use shelftag_shopify::ShopifyClient;

use crate::engine::queue::PendingQueue;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    client: Arc<ShopifyClient>,
    queue: PendingQueue,
    config: Arc<AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_full_sync_job(&scheduler, client, queue, config).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the nightly full-catalog sync.
///
/// Runs every day at 03:00 UTC (`0 0 3 * * *`): enumerates every variant
/// id in the catalog and feeds them through the same pending queue the
/// webhook path uses, so labels converge even for variants whose change
/// notifications were missed.
async fn register_full_sync_job(
    scheduler: &JobScheduler,
    client: Arc<ShopifyClient>,
    queue: PendingQueue,
    config: Arc<AppConfig>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 0 3 * * *", move |_uuid, _lock| {
        let client = Arc::clone(&client);
        let queue = queue.clone();
        let config = Arc::clone(&config);

        Box::pin(async move {
            tracing::info!("scheduler: starting nightly full catalog sync");
            let enumeration = client
                .enumerate_variant_ids(config.page_size, config.inter_page_delay_ms)
                .await;

            if !enumeration.complete {
                tracing::warn!(
                    collected = enumeration.variant_ids.len(),
                    "scheduler: enumeration was truncated — running partial sync"
                );
            }

            let enqueued = queue.enqueue_all(enumeration.variant_ids);
            tracing::info!(enqueued, "scheduler: nightly full sync enqueued");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
