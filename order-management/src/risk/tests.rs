use super::*;
use chrono::Duration;
use oms::{OrderType, Side};

pub(crate) fn order_with(
    order_id: &str,
    client_id: &str,
    symbol: &str,
    quantity: f64,
    price: f64,
) -> OrderRequest {
    OrderRequest::new(
        order_id,
        client_id,
        symbol,
        Side::Buy,
        OrderType::Limit,
        quantity,
        price,
        0.0,
        0,
        "user001",
    )
}

pub(crate) fn limit_order(order_id: &str, quantity: f64, price: f64) -> OrderRequest {
    order_with(order_id, "CLIENT_001", "EURUSD", quantity, price)
}

pub(crate) fn check_context<'a>(
    order: &'a OrderRequest,
    limits: &'a RiskLimits,
) -> CheckContext<'a> {
    check_context_with(order, limits, None, None)
}

pub(crate) fn check_context_with<'a>(
    order: &'a OrderRequest,
    limits: &'a RiskLimits,
    user: Option<&'a UserConfig>,
    symbol: Option<&'a SymbolConfig>,
) -> CheckContext<'a> {
    CheckContext {
        order,
        limits,
        user,
        symbol,
    }
}

fn default_user() -> UserConfig {
    UserConfig {
        user_id: DEFAULT_KEY.to_string(),
        max_position_size: 10_000_000.0,
        max_daily_volume: 10_000_000.0,
        available_balance: 10_000_000.0,
        margin_requirement: 0.02,
        is_active: true,
    }
}

fn default_symbol() -> SymbolConfig {
    SymbolConfig {
        symbol: DEFAULT_KEY.to_string(),
        min_quantity: 0.0,
        max_quantity: 10_000_000.0,
        tick_size: 0.0,
        margin_rate: 0.02,
        is_tradeable: true,
        max_order_value: 10_000_000.0,
    }
}

fn test_engine() -> RiskEngine {
    RiskEngine::new(
        UserConfigs::new(vec![default_user()]),
        SymbolConfigs::new(vec![default_symbol()]),
    )
}

fn engine_with_limits(default_limits: RiskLimits) -> RiskEngine {
    RiskEngine::with_default_limits(
        UserConfigs::new(vec![default_user()]),
        SymbolConfigs::new(vec![default_symbol()]),
        default_limits,
    )
}

#[test]
fn test_approves_order_within_all_limits() {
    let engine = test_engine();
    let order = limit_order("ORD_EURUSD_001", 50_000.0, 1.10);

    let decision = engine.evaluate(&order);

    assert!(decision.accepted);
    assert_eq!(decision.reason, "Order approved");
    // 55,000 notional at the 2% default rate.
    assert!((decision.calculated_margin - 1_100.0).abs() < 1e-6);
    assert_eq!(decision.position_impact, 50_000.0);
}

#[test]
fn test_rejects_non_positive_quantity() {
    let engine = test_engine();
    let order = limit_order("O-ZERO", 0.0, 1.10);

    let decision = engine.evaluate(&order);

    assert!(!decision.accepted);
    assert_eq!(decision.reason, "Quantity must be positive");
    assert_eq!(decision.calculated_margin, 0.0);
}

#[test]
fn test_position_limit_scenario() {
    let engine = test_engine();

    // DEFAULT max position is 1,000,000.
    assert!(!engine.validate_position_limits("EURUSD", 1_500_000.0));
    assert!(engine.validate_position_limits("EURUSD", 900_000.0));

    let order = limit_order("O-BIG", 1_500_000.0, 1.10);
    let decision = engine.evaluate(&order);
    assert!(!decision.accepted);
    assert!(decision.reason.contains("Position limit exceeded"));
}

#[test]
fn test_daily_volume_accumulates_and_rejects() {
    let engine = engine_with_limits(RiskLimits {
        max_daily_volume: 100.0,
        max_order_value: 1_000.0,
        max_position_size: 1_000.0,
        ..RiskLimits::default()
    });

    let first = engine.evaluate(&limit_order("O1", 60.0, 1.0));
    assert!(first.accepted);
    assert_eq!(engine.daily_volume("CLIENT_001"), 60.0);

    let second = engine.evaluate(&limit_order("O2", 60.0, 1.0));
    assert!(!second.accepted);
    assert_eq!(second.reason, "Daily volume limit exceeded");
    assert_eq!(engine.daily_volume("CLIENT_001"), 60.0);
}

#[test]
fn test_daily_volume_resets_after_window() {
    // Zero-length window simulates "24 hours later" on every touch.
    let engine = RiskEngine::with_volume_tracker(
        UserConfigs::new(vec![default_user()]),
        SymbolConfigs::new(vec![default_symbol()]),
        RiskLimits {
            max_daily_volume: 100.0,
            max_order_value: 1_000.0,
            max_position_size: 1_000.0,
            ..RiskLimits::default()
        },
        Arc::new(DailyVolumeTracker::with_window(Duration::zero())),
    );

    assert!(engine.evaluate(&limit_order("O1", 60.0, 1.0)).accepted);
    assert!(
        engine.evaluate(&limit_order("O2", 60.0, 1.0)).accepted,
        "counter must reset once the window has elapsed"
    );
}

#[test]
fn test_stop_price_rejection_still_carries_margin() {
    let engine = test_engine();
    let order = OrderRequest::new(
        "O-STOP",
        "CLIENT_001",
        "EURUSD",
        Side::Buy,
        OrderType::StopLimit,
        1_000.0,
        1.10,
        1.20, // buy stop above the price is inverted
        0,
        "user001",
    );

    let decision = engine.evaluate(&order);

    assert!(!decision.accepted);
    assert_eq!(decision.reason, "Invalid stop price for order direction");
    assert!((decision.calculated_margin - 22.0).abs() < 1e-6);
}

#[test]
fn test_unknown_user_rejected_without_default_record() {
    let engine = RiskEngine::new(
        UserConfigs::new(vec![UserConfig {
            user_id: "user001".to_string(),
            ..default_user()
        }]),
        SymbolConfigs::new(vec![default_symbol()]),
    );

    let order = OrderRequest::new(
        "O1", "CLIENT_001", "EURUSD", Side::Buy, OrderType::Limit, 100.0, 1.1, 0.0, 0, "ghost",
    );
    let decision = engine.evaluate(&order);

    assert!(!decision.accepted);
    assert_eq!(decision.reason, "User not found or not configured");
}

#[test]
fn test_tick_size_violation_rejected_in_evaluation() {
    let engine = test_engine();
    engine.update_symbol_config(SymbolConfig {
        symbol: "EURUSD".to_string(),
        tick_size: 0.0001,
        ..default_symbol()
    });

    let decision = engine.evaluate(&limit_order("O-TICK", 1_000.0, 1.10005));

    assert!(!decision.accepted);
    assert_eq!(decision.reason, "Order price does not conform to tick size");
}

#[test]
fn test_client_specific_limits_override_default() {
    let engine = test_engine();
    engine.update_risk_limits(
        "VIP_CLIENT",
        RiskLimits {
            max_order_value: 50_000.0,
            margin_requirement_rate: 0.05,
            ..RiskLimits::default()
        },
    );

    let order = order_with("O-VIP", "VIP_CLIENT", "EURUSD", 50_000.0, 1.10);
    let decision = engine.evaluate(&order);

    assert!(!decision.accepted);
    assert!(decision.reason.contains("Order value exceeds"));

    // Other clients still run under DEFAULT limits.
    let decision = engine.evaluate(&limit_order("O-STD", 50_000.0, 1.10));
    assert!(decision.accepted);
}

#[test]
fn test_calculate_margin_requirement_uses_client_rate() {
    let engine = test_engine();
    engine.update_risk_limits(
        "VIP_CLIENT",
        RiskLimits {
            margin_requirement_rate: 0.05,
            ..RiskLimits::default()
        },
    );

    let standard = limit_order("O1", 100_000.0, 1.10);
    assert!((engine.calculate_margin_requirement(&standard) - 2_200.0).abs() < 1e-6);

    let vip = order_with("O2", "VIP_CLIENT", "EURUSD", 100_000.0, 1.10);
    assert!((engine.calculate_margin_requirement(&vip) - 5_500.0).abs() < 1e-6);
}
