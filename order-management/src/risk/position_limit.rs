use super::{Check, CheckContext, CheckOutcome};

/// Caps the order quantity at the resolved client's maximum position size.
pub struct PositionLimitCheck;

impl Check for PositionLimitCheck {
    fn name(&self) -> &str {
        "PositionLimit"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        if ctx.order.quantity().abs() > ctx.limits.max_position_size {
            return CheckOutcome::Rejected(format!(
                "Position limit exceeded for {}",
                ctx.order.symbol()
            ));
        }
        CheckOutcome::Approved
    }
}
