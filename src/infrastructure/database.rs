//! MongoDB client construction and startup connection.

use std::time::Duration;

use anyhow::{Context, Result};
use mongodb::{Client, bson::doc, options::ClientOptions};
use tokio_retry::{
    Retry,
    strategy::{ExponentialBackoff, jitter},
};

use crate::config::{Config, mask_connection_string};

/// Initial delay between connection attempts, in milliseconds.
const RETRY_BASE_DELAY_MS: u64 = 200;
/// Upper bound for a single backoff delay.
const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

/// Builds driver options from the service configuration.
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed.
pub async fn client_options(config: &Config) -> Result<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongodb_url)
        .await
        .context("Invalid MongoDB connection string")?;

    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.max_pool_size = Some(config.db_max_pool_size);
    options.min_pool_size = Some(config.db_min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.db_connect_timeout));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.db_server_selection_timeout));

    Ok(options)
}

/// Connects to MongoDB and verifies the deployment answers a `ping`.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the ping fails.
pub async fn connect(options: ClientOptions) -> Result<Client> {
    let client = Client::with_options(options).context("Failed to build MongoDB client")?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB did not answer ping")?;

    Ok(client)
}

/// Connects with exponential backoff, making up to `db_connect_retries` attempts.
///
/// # Errors
///
/// Returns the last connection error once all attempts are exhausted.
pub async fn connect_with_retry(config: &Config) -> Result<Client> {
    let options = client_options(config).await?;

    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_DELAY_MS)
        .max_delay(RETRY_MAX_DELAY)
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1));

    let target = mask_connection_string(&config.mongodb_url);

    let client = Retry::start(strategy, || {
        let options = options.clone();
        let target = target.clone();
        async move {
            tracing::info!("Attempting to connect to MongoDB at {}", target);
            connect(options).await.inspect_err(|e| {
                tracing::warn!(error = %e, "MongoDB connection attempt failed");
            })
        }
    })
    .await
    .with_context(|| {
        format!(
            "Failed to connect to MongoDB after {} attempt(s)",
            config.db_connect_retries
        )
    })?;

    tracing::info!("Connected to MongoDB");
    Ok(client)
}
