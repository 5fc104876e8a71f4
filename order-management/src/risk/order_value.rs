use super::{Check, CheckContext, CheckOutcome};

/// Caps the order's notional value at the resolved client's per-order limit.
pub struct OrderValueCheck;

impl Check for OrderValueCheck {
    fn name(&self) -> &str {
        "OrderValue"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        let order_value = (ctx.order.quantity() * ctx.order.price()).abs();
        if order_value > ctx.limits.max_order_value {
            return CheckOutcome::Rejected(format!(
                "Order value exceeds maximum allowed: ${:.2}",
                ctx.limits.max_order_value
            ));
        }
        CheckOutcome::Approved
    }
}
