use anyhow::Result;
use clap::Parser;
use log::info;
use order_management::io::{Args, ZmqPublisher, ZmqSubscriberFeed};
use order_management::service::OrderManagementService;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Order Management Service ===");
    info!("Using user config: {}", args.user_config.display());
    info!("Using symbol config: {}", args.symbol_config.display());

    let order_feed = Arc::new(ZmqPublisher::bind(&args.matching_engine_endpoint)?);
    let response_feed = Arc::new(ZmqPublisher::bind(&args.response_endpoint)?);
    let report_feed = Arc::new(ZmqPublisher::bind(&args.report_endpoint)?);

    let mut service = OrderManagementService::initialize(
        &args.user_config,
        &args.symbol_config,
        Duration::from_micros(args.idle_interval_us),
        order_feed,
        response_feed,
        report_feed,
    )?;

    service.start();

    let mut order_subscriber = ZmqSubscriberFeed::start(
        "order-request",
        &args.order_endpoint,
        service.order_listener(),
    )?;
    let mut report_subscriber = ZmqSubscriberFeed::start(
        "execution-report",
        &args.execution_report_endpoint,
        service.execution_report_listener(),
    )?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    // Producers first, then the workers drain and join.
    order_subscriber.stop();
    report_subscriber.stop();
    service.stop();

    info!("Order Management Service shutdown complete");
    Ok(())
}
