use super::{Check, CheckContext, CheckOutcome};

/// Cheap shape test for trading-pair symbols (e.g. "EURUSD", "GBPJPY"):
/// 6 to 8 characters. Runs before any limit lookup so malformed symbols
/// never touch the keyed stores.
pub struct SymbolFormatCheck;

impl Check for SymbolFormatCheck {
    fn name(&self) -> &str {
        "SymbolFormat"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        let symbol = ctx.order.symbol();
        if symbol.len() < 6 || symbol.len() > 8 {
            return CheckOutcome::Rejected(format!("Invalid symbol format: {}", symbol));
        }
        CheckOutcome::Approved
    }
}
