mod api;
mod engine;
mod middleware;
mod scheduler;
mod signature;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    engine::{cooldown::InMemoryCooldown, queue::PendingQueue, Engine},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(shelftag_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = Arc::new(shelftag_shopify::ShopifyClient::new(
        &config.shop_domain,
        &config.api_version,
        &config.admin_token,
        config.request_timeout_secs,
        config.max_retries,
        config.retry_delay_secs,
    )?);

    // Converge to exactly one webhook subscription at our callback. A
    // failure here is logged, not fatal: an already-registered subscription
    // keeps notifications flowing while the operator investigates.
    match client
        .reconcile_webhook_subscription(&config.callback_url)
        .await
    {
        Ok(outcome) => tracing::info!(
            subscription_id = %outcome.subscription_id,
            created = outcome.created,
            deleted = outcome.deleted,
            "webhook subscription reconciled"
        ),
        Err(err) => tracing::error!(
            error = %err,
            "webhook subscription reconciliation failed — continuing with existing platform state"
        ),
    }

    let cooldown = Arc::new(InMemoryCooldown::new(Duration::from_secs(
        config.cooldown_secs,
    )));
    let reconciler = Arc::new(Engine::new(
        Arc::clone(&client),
        cooldown,
        Duration::from_millis(config.inter_call_delay_ms),
    ));
    let (queue, _consumer) = PendingQueue::spawn(
        reconciler,
        config.batch_size,
        Duration::from_secs(config.batch_interval_secs),
    );

    let _scheduler =
        scheduler::build_scheduler(Arc::clone(&client), queue.clone(), Arc::clone(&config))
            .await?;

    let auth = AuthState::from_env(matches!(
        config.env,
        shelftag_core::Environment::Development
    ))?;
    let app = build_app(
        AppState {
            config: Arc::clone(&config),
            client,
            queue,
        },
        auth,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
