use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Check, CheckContext, CheckOutcome};

struct VolumeState {
    volume: f64,
    last_reset: DateTime<Utc>,
}

/// Per-client accumulated traded notional within a rolling window.
///
/// The reset check runs lazily on each touch, not on a timer: a client whose
/// window has elapsed starts from zero the next time it is referenced. The
/// window is a constructor parameter so tests can simulate elapsed days.
pub struct DailyVolumeTracker {
    window: Duration,
    state: Mutex<HashMap<String, VolumeState>>,
}

impl DailyVolumeTracker {
    pub fn new() -> Self {
        Self::with_window(Duration::hours(24))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Validates that the client's accumulated volume plus `value` stays
    /// within `max_daily_volume`, and accumulates on success. Deliberately
    /// not idempotent: re-validating the same order counts it again.
    pub fn try_accumulate(&self, client_id: &str, value: f64, max_daily_volume: f64) -> bool {
        let now = Utc::now();
        let mut state = self.state.lock().unwrap();

        let entry = state.entry(client_id.to_string()).or_insert(VolumeState {
            volume: 0.0,
            last_reset: now,
        });

        if now - entry.last_reset >= self.window {
            debug!("Reset daily counters for client: {}", client_id);
            entry.volume = 0.0;
            entry.last_reset = now;
        }

        if entry.volume + value > max_daily_volume {
            return false;
        }

        entry.volume += value;
        true
    }

    /// Accumulated volume for a client; zero if never touched.
    pub fn current(&self, client_id: &str) -> f64 {
        self.state
            .lock()
            .unwrap()
            .get(client_id)
            .map(|state| state.volume)
            .unwrap_or(0.0)
    }

    /// Explicit counter reset, regardless of window.
    pub fn reset(&self, client_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.insert(
            client_id.to_string(),
            VolumeState {
                volume: 0.0,
                last_reset: Utc::now(),
            },
        );
    }
}

impl Default for DailyVolumeTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Chain step wrapping the tracker: rejects when the order's notional would
/// push the client past its daily limit, otherwise records it.
pub struct DailyVolumeCheck {
    tracker: std::sync::Arc<DailyVolumeTracker>,
}

impl DailyVolumeCheck {
    pub fn new(tracker: std::sync::Arc<DailyVolumeTracker>) -> Self {
        Self { tracker }
    }
}

impl Check for DailyVolumeCheck {
    fn name(&self) -> &str {
        "DailyVolume"
    }

    fn check(&self, ctx: &CheckContext) -> CheckOutcome {
        let order_value = (ctx.order.quantity() * ctx.order.price()).abs();
        if !self.tracker.try_accumulate(
            ctx.order.client_id(),
            order_value,
            ctx.limits.max_daily_volume,
        ) {
            return CheckOutcome::Rejected("Daily volume limit exceeded".to_string());
        }
        CheckOutcome::Approved
    }
}
