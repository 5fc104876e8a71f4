use super::{Check, CheckContext, CheckOutcome};
use oms::Side;

/// Directional sanity for stop prices: a buy stop must trigger below the
/// limit price, a sell stop above it. Only orders that carry a stop price
/// are examined.
pub struct StopPriceCheck;

impl Check for StopPriceCheck {
    fn name(&self) -> &str {
        "StopPrice"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        let order = ctx.order;
        if order.stop_price() <= 0.0 {
            return CheckOutcome::Approved;
        }

        let inverted = match order.side() {
            Side::Buy => order.stop_price() >= order.price(),
            Side::Sell => order.stop_price() <= order.price(),
        };

        if inverted {
            return CheckOutcome::Rejected("Invalid stop price for order direction".to_string());
        }

        CheckOutcome::Approved
    }
}
