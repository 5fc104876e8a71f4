use super::{Check, CheckContext, CheckOutcome};
use oms::OrderType;

/// First line of defense: parameter sanity before any limit lookup.
pub struct StructuralCheck;

impl Check for StructuralCheck {
    fn name(&self) -> &str {
        "Structural"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        let order = ctx.order;

        if order.order_id().is_empty() {
            return CheckOutcome::Rejected("Order ID cannot be empty".to_string());
        }

        if order.client_id().is_empty() {
            return CheckOutcome::Rejected("Client ID cannot be empty".to_string());
        }

        if order.symbol().is_empty() {
            return CheckOutcome::Rejected("Symbol cannot be empty".to_string());
        }

        if order.quantity() <= 0.0 {
            return CheckOutcome::Rejected("Quantity must be positive".to_string());
        }

        if order.order_type() == OrderType::Limit && order.price() <= 0.0 {
            return CheckOutcome::Rejected("Limit orders must have positive price".to_string());
        }

        if order.order_type().requires_stop_price() && order.stop_price() <= 0.0 {
            return CheckOutcome::Rejected("Stop orders must have positive stop price".to_string());
        }

        CheckOutcome::Approved
    }
}
