// Fraud Case Sync - queue worker
// Syncs fraud cases for each API key received on the queue into Catena-X

use anyhow::Context;
use fraud_case_sync::{telemetry, Config, FraudCaseSync, SyncHandler};
use message_bus::{AmqpConfig, AmqpSource, Consumer, StopReason};
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing(telemetry::log_format_from_env());

    let config = Config::from_env().map_err(|e| {
        error!("Failed to validate required env vars: {}", e);
        e
    })?;

    let _sentry = telemetry::init_error_reporting(&config).context("Failed to initialize Sentry")?;

    info!("Fraud Case Sync starting...");

    let sync = FraudCaseSync::new(&config).context("Failed to create HTTP client")?;
    let handler = SyncHandler::new(sync);

    let mut source = AmqpSource::connect(&AmqpConfig::new(&config.amqp_url, &config.queue_name))
        .await
        .map_err(|e| {
            error!("Failed to connect to RabbitMQ: {}", e);
            e
        })?;

    info!(queue = %config.queue_name, "Waiting for messages");

    match Consumer::run(&mut source, &handler).await {
        Ok(StopReason::ChannelClosed) => {
            warn!("Queue channel closed, shutting down");
            Ok(())
        }
        Ok(StopReason::Fatal {
            delivery_tag,
            error,
        }) => {
            error!(delivery_tag, "Stopping after fatal error: {}", error);
            Err(anyhow::anyhow!("fatal sync error: {}", error))
        }
        Err(e) => {
            error!("Queue consumer failed: {}", e);
            Err(e.into())
        }
    }
}
