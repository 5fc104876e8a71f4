use crate::config::{SymbolConfig, SymbolConfigs, UserConfig, UserConfigs, DEFAULT_KEY};
use log::{debug, info, warn};
use oms::OrderRequest;
use std::sync::Arc;

pub mod daily_volume;
pub mod limits;
pub mod order_value;
pub mod position_limit;
pub mod stop_price;
pub mod structural;
pub mod symbol_format;
pub mod symbol_limits;
pub mod user_limits;

pub use daily_volume::{DailyVolumeCheck, DailyVolumeTracker};
pub use limits::{LimitsStore, RiskLimits};

/// Outcome of a full risk evaluation. Produced fresh per order, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskDecision {
    pub accepted: bool,
    pub reason: String,
    pub calculated_margin: f64,
    pub position_impact: f64,
}

impl RiskDecision {
    fn approved(calculated_margin: f64, position_impact: f64) -> Self {
        Self {
            accepted: true,
            reason: "Order approved".to_string(),
            calculated_margin,
            position_impact,
        }
    }

    fn rejected(reason: String, calculated_margin: f64, position_impact: f64) -> Self {
        Self {
            accepted: false,
            reason,
            calculated_margin,
            position_impact,
        }
    }
}

/// Outcome of a single chain step.
#[derive(Debug, PartialEq)]
pub enum CheckOutcome {
    Approved,
    Rejected(String),
}

/// Everything a check may consult, resolved once per evaluation so no store
/// lock is held while the chain runs. `user`/`symbol` are `None` when neither
/// an explicit nor a DEFAULT record exists; the owning checks turn that into
/// a rejection.
pub struct CheckContext<'a> {
    pub order: &'a OrderRequest,
    pub limits: &'a RiskLimits,
    pub user: Option<&'a UserConfig>,
    pub symbol: Option<&'a SymbolConfig>,
}

/// A single risk rule. Checks run in a fixed order and the first rejection
/// wins.
pub trait Check: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, ctx: &CheckContext) -> CheckOutcome;
}

/// Evaluates orders against per-client limits and per-symbol configuration,
/// tracking rolling daily volume as a side effect of acceptance.
pub struct RiskEngine {
    limits: LimitsStore,
    users: UserConfigs,
    symbols: SymbolConfigs,
    volumes: Arc<DailyVolumeTracker>,
    checks: Vec<Box<dyn Check>>,
    /// Runs after margin computation so a stop-price rejection still carries
    /// the calculated margin.
    stop_check: stop_price::StopPriceCheck,
}

impl RiskEngine {
    pub fn new(users: UserConfigs, symbols: SymbolConfigs) -> Self {
        Self::with_default_limits(users, symbols, RiskLimits::default())
    }

    pub fn with_default_limits(
        users: UserConfigs,
        symbols: SymbolConfigs,
        default_limits: RiskLimits,
    ) -> Self {
        Self::with_volume_tracker(
            users,
            symbols,
            default_limits,
            Arc::new(DailyVolumeTracker::new()),
        )
    }

    pub fn with_volume_tracker(
        users: UserConfigs,
        symbols: SymbolConfigs,
        default_limits: RiskLimits,
        volumes: Arc<DailyVolumeTracker>,
    ) -> Self {
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(structural::StructuralCheck),
            Box::new(symbol_format::SymbolFormatCheck),
            Box::new(user_limits::UserLimitsCheck),
            Box::new(symbol_limits::SymbolLimitsCheck),
            Box::new(position_limit::PositionLimitCheck),
            Box::new(order_value::OrderValueCheck),
            Box::new(DailyVolumeCheck::new(volumes.clone())),
        ];

        Self {
            limits: LimitsStore::with_default(default_limits),
            users,
            symbols,
            volumes,
            checks,
            stop_check: stop_price::StopPriceCheck,
        }
    }

    /// Full evaluation: the check chain in order, short-circuiting on the
    /// first rejection, then margin computation, then the stop-price sanity
    /// check. Acceptance has already added the order's notional to the
    /// client's daily volume by the time this returns.
    pub fn evaluate(&self, order: &OrderRequest) -> RiskDecision {
        debug!("Evaluating risk for order: {}", order.order_id());

        let limits = self.limits.resolve(order.client_id());
        let user = self.users.resolve(order.user_id());
        let symbol = self.symbols.resolve(order.symbol());

        let ctx = CheckContext {
            order,
            limits: &limits,
            user: user.as_ref(),
            symbol: symbol.as_ref(),
        };

        for check in &self.checks {
            if let CheckOutcome::Rejected(reason) = check.check(&ctx) {
                warn!(
                    "Order {} rejected by check {}: {}",
                    order.order_id(),
                    check.name(),
                    reason
                );
                return RiskDecision::rejected(reason, 0.0, order.quantity());
            }
        }

        let margin = (order.quantity() * order.price()).abs() * limits.margin_requirement_rate;

        if let CheckOutcome::Rejected(reason) = self.stop_check.check(&ctx) {
            warn!(
                "Order {} rejected by check {}: {}",
                order.order_id(),
                self.stop_check.name(),
                reason
            );
            return RiskDecision::rejected(reason, margin, order.quantity());
        }

        info!(
            "Order {} approved - symbol: {} qty: {} margin: ${:.2}",
            order.order_id(),
            order.symbol(),
            order.quantity(),
            margin
        );

        RiskDecision::approved(margin, order.quantity())
    }

    /// Quick position-size check against the DEFAULT limits, for callers
    /// that do not need a full evaluation.
    pub fn validate_position_limits(&self, _symbol: &str, quantity: f64) -> bool {
        let limits = self.limits.resolve(DEFAULT_KEY);
        quantity.abs() <= limits.max_position_size
    }

    /// Margin the order would reserve under the client's limits.
    pub fn calculate_margin_requirement(&self, order: &OrderRequest) -> f64 {
        let limits = self.limits.resolve(order.client_id());
        (order.quantity() * order.price()).abs() * limits.margin_requirement_rate
    }

    pub fn risk_limits(&self, client_id: &str) -> RiskLimits {
        self.limits.resolve(client_id)
    }

    pub fn update_risk_limits(&self, client_id: impl Into<String>, limits: RiskLimits) {
        self.limits.update(client_id, limits);
    }

    pub fn update_user_config(&self, config: UserConfig) {
        self.users.update(config);
    }

    pub fn update_symbol_config(&self, config: SymbolConfig) {
        self.symbols.update(config);
    }

    pub fn daily_volume(&self, client_id: &str) -> f64 {
        self.volumes.current(client_id)
    }

    pub fn reset_daily_volume(&self, client_id: &str) {
        self.volumes.reset(client_id);
    }
}

#[cfg(test)]
pub(crate) mod tests;
