use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kafka_bridge::broker::{KafkaBrokerClient, KafkaPublisher};
use kafka_bridge::cli::{Cli, Command};
use kafka_bridge::consumer::{ConsumerConfig, ConsumerService};
use kafka_bridge::dispatcher::{Dispatcher, DispatcherConfig};
use kafka_bridge::producer::{ProducerConfig, ProducerService};
use kafka_bridge::routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let listen = cli.command.listen();

    match cli.command {
        Command::Consumer(args) => {
            let config = ConsumerConfig::from(&args);
            let client =
                KafkaBrokerClient::new(&config).context("Failed to create Kafka consumer")?;
            let service = Arc::new(ConsumerService::new(Arc::new(client), config));

            info!(%listen, "Starting consumer service");
            tokio::select! {
                _ = warp::serve(routes::consumer_routes(service.clone())).run(listen) => {}
                _ = shutdown_signal() => {}
            }
            service.shutdown().await;
        }
        Command::Producer(args) => {
            let config = ProducerConfig::from(&args);
            let publisher =
                KafkaPublisher::new(&config).context("Failed to create Kafka producer")?;
            let service = Arc::new(ProducerService::new(Arc::new(publisher), config));

            info!(%listen, topic = service.topic(), "Starting producer service");
            tokio::select! {
                _ = warp::serve(routes::producer_routes(service.clone())).run(listen) => {}
                _ = shutdown_signal() => {}
            }
            service.shutdown();
        }
        Command::Dispatcher(args) => {
            let config = DispatcherConfig::from(&args);
            let dispatcher = Arc::new(
                Dispatcher::with_http_relay(config).context("Failed to create dispatcher")?,
            );

            info!(%listen, "Starting dispatcher");
            tokio::select! {
                _ = warp::serve(routes::dispatcher_routes(dispatcher)).run(listen) => {}
                _ = shutdown_signal() => {}
            }
        }
    }

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Unable to listen for the shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
