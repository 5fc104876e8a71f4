use crate::adapter::MessageAdapter;
use log::{error, info};
use oms::{
    ExecutionReport, NewOrderSingle, OrderRequest, OrderResponse, OrderResponseReport, OutboundFeed,
};
use std::sync::Arc;

/// Thin egress layer: adapt where needed, publish, report success or failure.
/// No retry — the order-processing logic decides how to react to `false`.
pub struct OrderRouter {
    adapter: MessageAdapter,
    order_feed: Arc<dyn OutboundFeed<NewOrderSingle>>,
    response_feed: Arc<dyn OutboundFeed<OrderResponse>>,
    report_feed: Arc<dyn OutboundFeed<OrderResponseReport>>,
}

impl OrderRouter {
    pub fn new(
        adapter: MessageAdapter,
        order_feed: Arc<dyn OutboundFeed<NewOrderSingle>>,
        response_feed: Arc<dyn OutboundFeed<OrderResponse>>,
        report_feed: Arc<dyn OutboundFeed<OrderResponseReport>>,
    ) -> Self {
        Self {
            adapter,
            order_feed,
            response_feed,
            report_feed,
        }
    }

    /// Adapts the order to its wire form and publishes it to the matching
    /// engine. Adapter failures and transport failures both come back as
    /// `false`; they differ only in what was logged.
    pub fn route_to_matching_engine(&self, order: &OrderRequest) -> bool {
        let wire = match self.adapter.to_new_order_single(order) {
            Ok(wire) => wire,
            Err(e) => {
                error!("Failed to adapt order {}: {}", order.order_id(), e);
                return false;
            }
        };

        match self.order_feed.publish(&wire) {
            Ok(()) => {
                info!(
                    "Published order {} to matching engine (seq {})",
                    wire.cl_ord_id, wire.header.msg_seq_num
                );
                true
            }
            Err(e) => {
                error!(
                    "Unable to publish order {} to matching engine: {:#}",
                    wire.cl_ord_id, e
                );
                false
            }
        }
    }

    pub fn send_order_response(&self, response: &OrderResponse) -> bool {
        match self.response_feed.publish(response) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Unable to publish response for order {}: {:#}",
                    response.order_id(),
                    e
                );
                false
            }
        }
    }

    /// Projects an inbound execution report into the client-facing response
    /// report and publishes it.
    pub fn publish_response_report(&self, report: &ExecutionReport) -> bool {
        let response = self.adapter.to_response_report(report);

        match self.report_feed.publish(&response) {
            Ok(()) => {
                info!("Response report published for order {}", response.order_id);
                true
            }
            Err(e) => {
                error!(
                    "Unable to publish response report for order {}: {:#}",
                    response.order_id, e
                );
                false
            }
        }
    }
}
