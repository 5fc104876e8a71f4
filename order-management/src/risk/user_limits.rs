use super::{Check, CheckContext, CheckOutcome};

/// Validates the order against the submitting user's configuration: the user
/// must be known (or covered by the DEFAULT record), active, within their
/// position and daily-volume caps, and funded for the required margin.
pub struct UserLimitsCheck;

impl Check for UserLimitsCheck {
    fn name(&self) -> &str {
        "UserLimits"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        let user = match ctx.user {
            Some(user) => user,
            None => {
                return CheckOutcome::Rejected("User not found or not configured".to_string());
            }
        };

        if !user.is_active {
            return CheckOutcome::Rejected("User account is inactive".to_string());
        }

        let order_value = ctx.order.notional_value();

        if order_value > user.max_position_size {
            return CheckOutcome::Rejected(
                "Order value exceeds maximum position size limit".to_string(),
            );
        }

        if ctx.order.quantity() > user.max_daily_volume {
            return CheckOutcome::Rejected(
                "Order quantity exceeds daily volume limit".to_string(),
            );
        }

        let required_margin = order_value * user.margin_requirement;
        if required_margin > user.available_balance {
            return CheckOutcome::Rejected("Insufficient margin/balance for order".to_string());
        }

        CheckOutcome::Approved
    }
}
