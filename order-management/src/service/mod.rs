use crate::adapter::{MessageAdapter, SequenceGenerator};
use crate::composer::{Composer, ComposerListener};
use crate::config;
use crate::risk::RiskEngine;
use crate::router::OrderRouter;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info};
use oms::{
    ExecutionReport, NewOrderSingle, OrderRequest, OrderResponse, OrderResponseReport, OrderStatus,
    OutboundFeed,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Identity this service writes into outbound routing fields.
pub const SERVICE_NAME: &str = "OrderManagementService";
/// Data service addressed by the response path.
pub const DATA_SERVICE: &str = "DATA_SERVICE_A";

/// One order through the pipeline: risk evaluation, then either a rejection
/// response or routing to the matching engine with a validation response.
/// A publish failure after risk acceptance is still a rejection, with its
/// own message text.
pub fn process_order(risk_engine: &RiskEngine, router: &OrderRouter, order: &OrderRequest) {
    info!(
        "Received new order: {} for symbol: {}",
        order.order_id(),
        order.symbol()
    );

    let decision = risk_engine.evaluate(order);
    if !decision.accepted {
        info!("Order {} rejected: {}", order.order_id(), decision.reason);
        router.send_order_response(&OrderResponse::new(
            order.order_id(),
            OrderStatus::Rejected,
            decision.reason,
            Utc::now().timestamp_millis(),
        ));
        return;
    }

    if router.route_to_matching_engine(order) {
        info!("Order {} routed to matching engine", order.order_id());
        router.send_order_response(&OrderResponse::new(
            order.order_id(),
            OrderStatus::Validated,
            "Order validated and routed to matching engine",
            Utc::now().timestamp_millis(),
        ));
    } else {
        error!(
            "Failed to route order {} to matching engine",
            order.order_id()
        );
        router.send_order_response(&OrderResponse::new(
            order.order_id(),
            OrderStatus::Rejected,
            "Failed to route order to matching engine",
            Utc::now().timestamp_millis(),
        ));
    }
}

/// One execution report through the pipeline: project and forward to the
/// client response feed.
pub fn process_execution_report(router: &OrderRouter, report: &ExecutionReport) {
    info!("Execution report received for order {}", report.order_id);

    if !router.publish_response_report(report) {
        error!(
            "Failed to publish response report for order {}",
            report.order_id
        );
    }
}

/// Wires the risk engine, adapter, composers and router together and owns
/// their lifecycle. Workers are joined in `stop()` before any shared
/// collaborator is released.
pub struct OrderManagementService {
    risk_engine: Arc<RiskEngine>,
    router: Arc<OrderRouter>,
    order_composer: Composer<OrderRequest>,
    report_composer: Composer<ExecutionReport>,
    running: Arc<AtomicBool>,
}

impl OrderManagementService {
    /// Builds the full service from configuration files. A missing or
    /// malformed configuration document is fatal: the service never starts
    /// accepting orders.
    pub fn initialize(
        user_config_path: &Path,
        symbol_config_path: &Path,
        idle_interval: Duration,
        order_feed: Arc<dyn OutboundFeed<NewOrderSingle>>,
        response_feed: Arc<dyn OutboundFeed<OrderResponse>>,
        report_feed: Arc<dyn OutboundFeed<OrderResponseReport>>,
    ) -> Result<Self> {
        info!("Initializing Order Management Service...");

        let users = config::load_user_configs(user_config_path)
            .context("Failed to initialize risk engine")?;
        let symbols = config::load_symbol_configs(symbol_config_path)
            .context("Failed to initialize risk engine")?;
        info!(
            "Risk engine configured with {} users and {} symbols",
            users.len(),
            symbols.len()
        );

        let risk_engine = Arc::new(RiskEngine::new(users, symbols));
        let adapter = MessageAdapter::new(
            Arc::new(SequenceGenerator::new()),
            SERVICE_NAME,
            DATA_SERVICE,
        );
        let router = Arc::new(OrderRouter::new(
            adapter,
            order_feed,
            response_feed,
            report_feed,
        ));

        Ok(Self::with_components(risk_engine, router, idle_interval))
    }

    /// Assembles the service from prebuilt collaborators. Used by
    /// `initialize` and by tests that construct the risk engine directly.
    pub fn with_components(
        risk_engine: Arc<RiskEngine>,
        router: Arc<OrderRouter>,
        idle_interval: Duration,
    ) -> Self {
        let order_risk = risk_engine.clone();
        let order_router = router.clone();
        let order_composer = Composer::new(
            "order-request",
            idle_interval,
            move |order: OrderRequest| {
                process_order(&order_risk, &order_router, &order);
            },
        );

        let report_router = router.clone();
        let report_composer = Composer::new(
            "execution-report",
            idle_interval,
            move |report: ExecutionReport| {
                process_execution_report(&report_router, &report);
            },
        );

        info!("Order Management Service initialized successfully");

        Self {
            risk_engine,
            router,
            order_composer,
            report_composer,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Enqueue capability for the inbound order feed.
    pub fn order_listener(&self) -> ComposerListener<OrderRequest> {
        self.order_composer.listener()
    }

    /// Enqueue capability for the inbound execution-report feed.
    pub fn execution_report_listener(&self) -> ComposerListener<ExecutionReport> {
        self.report_composer.listener()
    }

    pub fn risk_engine(&self) -> &RiskEngine {
        &self.risk_engine
    }

    pub fn router(&self) -> &OrderRouter {
        &self.router
    }

    pub fn start(&self) {
        if self.running.swap(true, Ordering::AcqRel) {
            info!("Service is already running");
            return;
        }
        info!("Order Management Service started. Listening for orders...");
    }

    /// Cooperative shutdown: workers drain their queues and are joined
    /// before this returns.
    pub fn stop(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            info!("Service is not running");
            return;
        }

        self.order_composer.stop();
        self.report_composer.stop();
        info!("Order Management Service stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests;
