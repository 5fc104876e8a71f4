use super::{Check, CheckContext, CheckOutcome};
use oms::OrderType;

/// Tolerance for tick-size conformance; prices this close to a tick boundary
/// (from either side) count as on-tick.
const TICK_EPSILON: f64 = 1e-8;

/// Validates the order against the symbol's configuration: tradeability,
/// quantity band, per-symbol order value cap, and tick-size conformance for
/// limit prices.
pub struct SymbolLimitsCheck;

impl Check for SymbolLimitsCheck {
    fn name(&self) -> &str {
        "SymbolLimits"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        let symbol = match ctx.symbol {
            Some(symbol) => symbol,
            None => {
                return CheckOutcome::Rejected("Symbol not found or not configured".to_string());
            }
        };

        if !symbol.is_tradeable {
            return CheckOutcome::Rejected("Symbol is not tradeable".to_string());
        }

        if ctx.order.quantity() < symbol.min_quantity {
            return CheckOutcome::Rejected("Order quantity below minimum allowed".to_string());
        }

        if ctx.order.quantity() > symbol.max_quantity {
            return CheckOutcome::Rejected("Order quantity exceeds maximum allowed".to_string());
        }

        if ctx.order.notional_value() > symbol.max_order_value {
            return CheckOutcome::Rejected(
                "Order value exceeds maximum allowed for symbol".to_string(),
            );
        }

        if ctx.order.order_type() == OrderType::Limit && symbol.tick_size > 0.0 {
            let remainder = (ctx.order.price() % symbol.tick_size).abs();
            let off_tick =
                remainder > TICK_EPSILON && (symbol.tick_size - remainder).abs() > TICK_EPSILON;
            if off_tick {
                return CheckOutcome::Rejected(
                    "Order price does not conform to tick size".to_string(),
                );
            }
        }

        CheckOutcome::Approved
    }
}
