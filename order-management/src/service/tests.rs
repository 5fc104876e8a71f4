use super::*;
use crate::config::{SymbolConfig, SymbolConfigs, UserConfig, UserConfigs, DEFAULT_KEY};
use crate::io::RecordingFeed;
use crate::router::OrderRouter;
use oms::{FixHeader, MessageListener, OrderType, Side};
use std::thread;
use std::time::Instant;

struct TestHarness {
    risk_engine: Arc<RiskEngine>,
    router: Arc<OrderRouter>,
    order_feed: Arc<RecordingFeed<NewOrderSingle>>,
    response_feed: Arc<RecordingFeed<OrderResponse>>,
    report_feed: Arc<RecordingFeed<OrderResponseReport>>,
}

fn harness() -> TestHarness {
    let users = UserConfigs::new(vec![UserConfig {
        user_id: DEFAULT_KEY.to_string(),
        max_position_size: 10_000_000.0,
        max_daily_volume: 10_000_000.0,
        available_balance: 10_000_000.0,
        margin_requirement: 0.02,
        is_active: true,
    }]);
    let symbols = SymbolConfigs::new(vec![SymbolConfig {
        symbol: DEFAULT_KEY.to_string(),
        min_quantity: 0.0,
        max_quantity: 10_000_000.0,
        tick_size: 0.0,
        margin_rate: 0.02,
        is_tradeable: true,
        max_order_value: 10_000_000.0,
    }]);

    let risk_engine = Arc::new(RiskEngine::new(users, symbols));

    let order_feed = Arc::new(RecordingFeed::new());
    let response_feed = Arc::new(RecordingFeed::new());
    let report_feed = Arc::new(RecordingFeed::new());

    let adapter = MessageAdapter::new(
        Arc::new(SequenceGenerator::new()),
        SERVICE_NAME,
        DATA_SERVICE,
    );
    let router = Arc::new(OrderRouter::new(
        adapter,
        order_feed.clone(),
        response_feed.clone(),
        report_feed.clone(),
    ));

    TestHarness {
        risk_engine,
        router,
        order_feed,
        response_feed,
        report_feed,
    }
}

fn limit_order(order_id: &str, quantity: f64, price: f64) -> OrderRequest {
    OrderRequest::new(
        order_id,
        "CLIENT_001",
        "EURUSD",
        Side::Buy,
        OrderType::Limit,
        quantity,
        price,
        0.0,
        0,
        "user001",
    )
}

fn execution_report(order_id: &str) -> ExecutionReport {
    ExecutionReport {
        header: FixHeader {
            begin_string: "FIX.4.4".into(),
            msg_type: "8".into(),
            sender_comp_id: "MATCHING_ENGINE".into(),
            target_comp_id: "OMS_ROUTER".into(),
            msg_seq_num: 7,
            sending_time: 123,
        },
        order_id: order_id.into(),
        orig_cl_ord_id: order_id.into(),
        exec_id: uuid::Uuid::new_v4().to_string(),
        exec_type: 'F',
        ord_status: '2',
        symbol: "EURUSD".into(),
        security_exchange: "FOREX".into(),
        side: '1',
        order_qty: 1_000.0,
        last_qty: 1_000.0,
        cum_qty: 1_000.0,
        leaves_qty: 0.0,
        price: 1.10,
        last_price: 1.1001,
        avg_price: 1.1001,
        stop_price: 0.0,
        ord_type: '2',
        time_in_force: '0',
        transact_time: 1_700_000_000_000_000,
        ord_rej_reason: None,
        text: String::new(),
        route_source: "GATEWAY".into(),
        route_source_user: "GW".into(),
        route_destination: "CLIENT_COMP".into(),
        route_destination_user: "CLIENT_USER".into(),
    }
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_valid_order_is_routed_and_acknowledged() {
    let h = harness();

    process_order(&h.risk_engine, &h.router, &limit_order("O1", 50_000.0, 1.10));

    let published = h.order_feed.sent();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].cl_ord_id, "O1");
    assert_eq!(published[0].side, '1');

    let responses = h.response_feed.sent();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].status(), OrderStatus::Validated);
    assert_eq!(
        responses[0].message(),
        "Order validated and routed to matching engine"
    );
}

#[test]
fn test_risk_rejection_produces_rejected_response() {
    let h = harness();

    // Exceeds the DEFAULT position limit of 1,000,000.
    process_order(
        &h.risk_engine,
        &h.router,
        &limit_order("O-BIG", 1_500_000.0, 1.10),
    );

    assert_eq!(h.order_feed.count(), 0, "rejected order must not be routed");

    let responses = h.response_feed.sent();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].status(), OrderStatus::Rejected);
    assert!(responses[0].message().contains("Position limit exceeded"));
}

#[test]
fn test_publish_failure_produces_distinct_rejection() {
    let h = harness();
    h.order_feed.set_failing(true);

    process_order(&h.risk_engine, &h.router, &limit_order("O1", 50_000.0, 1.10));

    let responses = h.response_feed.sent();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].status(), OrderStatus::Rejected);
    assert_eq!(
        responses[0].message(),
        "Failed to route order to matching engine"
    );
}

#[test]
fn test_execution_report_is_projected_and_forwarded() {
    let h = harness();
    let report = execution_report("O9");

    process_execution_report(&h.router, &report);

    let forwarded = h.report_feed.sent();
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].order_id, "O9");
    assert_eq!(forwarded[0].header.sender_comp_id, "CLIENT_USER");
    assert_eq!(forwarded[0].header.target_comp_id, "CLIENT_COMP");
    assert_eq!(forwarded[0].header.sending_time, 0);
    assert_eq!(forwarded[0].cum_qty, report.cum_qty);
}

#[test]
fn test_service_lifecycle_and_listener_flow() {
    let h = harness();
    let mut service = OrderManagementService::with_components(
        h.risk_engine.clone(),
        h.router.clone(),
        Duration::from_micros(500),
    );

    assert!(!service.is_running());
    service.start();
    assert!(service.is_running());

    let order_listener = service.order_listener();
    let report_listener = service.execution_report_listener();

    order_listener.on_message(limit_order("O1", 50_000.0, 1.10));
    report_listener.on_message(execution_report("O1"));

    wait_until(|| h.response_feed.count() == 1 && h.report_feed.count() == 1);

    assert_eq!(h.order_feed.count(), 1);
    assert_eq!(h.response_feed.count(), 1);
    assert_eq!(h.report_feed.count(), 1);

    service.stop();
    assert!(!service.is_running());
}

#[test]
fn test_stop_drains_enqueued_orders() {
    let h = harness();
    let mut service = OrderManagementService::with_components(
        h.risk_engine.clone(),
        h.router.clone(),
        Duration::from_millis(50),
    );
    service.start();

    let listener = service.order_listener();
    for n in 0..20 {
        listener.on_message(limit_order(&format!("O{}", n), 1_000.0, 1.10));
    }
    service.stop();

    assert_eq!(
        h.response_feed.count(),
        20,
        "every order enqueued before stop() must be answered"
    );
}
