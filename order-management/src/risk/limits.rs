use crate::config::DEFAULT_KEY;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-client risk limits. The `DEFAULT` entry backs every client without an
/// explicit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum position per symbol, in units.
    pub max_position_size: f64,
    /// Maximum traded notional per rolling 24h window.
    pub max_daily_volume: f64,
    /// Fraction of notional reserved as collateral.
    pub margin_requirement_rate: f64,
    /// Maximum notional of a single order.
    pub max_order_value: f64,
    pub daily_loss_limit: f64,
    pub allow_hedging: bool,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_position_size: 1_000_000.0,
            max_daily_volume: 5_000_000.0,
            margin_requirement_rate: 0.02,
            max_order_value: 100_000.0,
            daily_loss_limit: 50_000.0,
            allow_hedging: true,
        }
    }
}

/// Client-keyed limits map. The lock is held only for the map access; the
/// resolved limits are returned by value so no evaluation runs under it.
pub struct LimitsStore {
    inner: Mutex<HashMap<String, RiskLimits>>,
}

impl LimitsStore {
    pub fn new() -> Self {
        Self::with_default(RiskLimits::default())
    }

    pub fn with_default(default_limits: RiskLimits) -> Self {
        let mut inner = HashMap::new();
        inner.insert(DEFAULT_KEY.to_string(), default_limits);
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Limits for a client, falling back to the DEFAULT entry. The DEFAULT
    /// entry is seeded at construction and can only be replaced, never
    /// removed, so resolution is total.
    pub fn resolve(&self, client_id: &str) -> RiskLimits {
        let inner = self.inner.lock().unwrap();
        inner
            .get(client_id)
            .or_else(|| inner.get(DEFAULT_KEY))
            .cloned()
            .unwrap_or_default()
    }

    pub fn update(&self, client_id: impl Into<String>, limits: RiskLimits) {
        let client_id = client_id.into();
        self.inner.lock().unwrap().insert(client_id.clone(), limits);
        info!("Updated risk limits for client: {}", client_id);
    }
}

impl Default for LimitsStore {
    fn default() -> Self {
        Self::new()
    }
}
