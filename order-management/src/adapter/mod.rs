use chrono::Utc;
use log::{debug, error};
use oms::{
    ExecutionReport, FixHeader, NewOrderSingle, OrderRequest, OrderResponseReport, OrderType, Side,
    TimeInForce,
};
use std::sync::Arc;
use thiserror::Error;

pub mod sequence;

pub use sequence::SequenceGenerator;

/// FIX protocol version stamped on every outbound header.
pub const BEGIN_STRING: &str = "FIX.4.4";
/// NewOrderSingle message type.
pub const MSG_TYPE_NEW_ORDER_SINGLE: &str = "D";
/// Component id this service signs outbound orders with.
pub const SENDER_COMP_ID: &str = "OMS_ROUTER";
/// Destination component for outbound orders.
pub const TARGET_COMP_ID: &str = "MATCHING_ENGINE";

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid quantity in order: {0}")]
    InvalidQuantity(String),
    #[error("invalid price for non-market order: {0}")]
    InvalidPrice(String),
}

/// FIX side code for an order side. Total over the enum.
pub fn side_char(side: Side) -> char {
    match side {
        Side::Buy => '1',
        Side::Sell => '2',
    }
}

/// FIX ord-type code for an order type. Total over the enum.
pub fn order_type_char(order_type: OrderType) -> char {
    match order_type {
        OrderType::Market => '1',
        OrderType::Limit => '2',
        OrderType::Stop => '3',
        OrderType::StopLimit => '4',
    }
}

/// FIX time-in-force code. Total over the enum; this tier only ever emits
/// `Day`.
pub fn time_in_force_char(tif: TimeInForce) -> char {
    match tif {
        TimeInForce::Day => '0',
        TimeInForce::GoodTillCancel => '1',
        TimeInForce::ImmediateOrCancel => '3',
    }
}

/// Inverse side mapping for inbound codes. Unknown codes are a counterparty
/// data error, not a crash: logged and reported as `None`.
pub fn side_from_char(code: char) -> Option<Side> {
    match code {
        '1' => Some(Side::Buy),
        '2' => Some(Side::Sell),
        other => {
            error!("Unknown order side code: '{}'", other);
            None
        }
    }
}

/// Inverse ord-type mapping for inbound codes.
pub fn order_type_from_char(code: char) -> Option<OrderType> {
    match code {
        '1' => Some(OrderType::Market),
        '2' => Some(OrderType::Limit),
        '3' => Some(OrderType::Stop),
        '4' => Some(OrderType::StopLimit),
        other => {
            error!("Unknown order type code: '{}'", other);
            None
        }
    }
}

/// Epoch microseconds, the timestamp resolution of the wire format.
pub fn current_utc_micros() -> u64 {
    Utc::now().timestamp_micros() as u64
}

/// Translates between the internal order/report model and the FIX-style wire
/// messages, assigning sequence numbers and timestamps on the way out.
pub struct MessageAdapter {
    sequence: Arc<SequenceGenerator>,
    /// Service identity written into the routing source fields.
    service_name: String,
    /// Data service the response path addresses.
    data_service: String,
    security_exchange: String,
}

impl MessageAdapter {
    pub fn new(
        sequence: Arc<SequenceGenerator>,
        service_name: impl Into<String>,
        data_service: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            service_name: service_name.into(),
            data_service: data_service.into(),
            security_exchange: "FOREX".to_string(),
        }
    }

    pub fn with_security_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.security_exchange = exchange.into();
        self
    }

    /// Builds the outbound wire order for the matching engine.
    ///
    /// Fails on non-positive quantity and on a non-market order without a
    /// positive price; everything else is derived field-for-field from the
    /// request. The transaction time is the request's own timestamp when one
    /// was set, otherwise conversion wall-clock time.
    pub fn to_new_order_single(&self, order: &OrderRequest) -> Result<NewOrderSingle, AdapterError> {
        if order.quantity() <= 0.0 {
            error!("Invalid quantity for order: {}", order.order_id());
            return Err(AdapterError::InvalidQuantity(order.order_id().to_string()));
        }

        if order.order_type().requires_price() && order.price() <= 0.0 {
            error!("Invalid price for non-market order: {}", order.order_id());
            return Err(AdapterError::InvalidPrice(order.order_id().to_string()));
        }

        let header = FixHeader {
            begin_string: BEGIN_STRING.to_string(),
            msg_type: MSG_TYPE_NEW_ORDER_SINGLE.to_string(),
            sender_comp_id: SENDER_COMP_ID.to_string(),
            target_comp_id: TARGET_COMP_ID.to_string(),
            msg_seq_num: self.sequence.generate(),
            sending_time: current_utc_micros(),
        };

        let transact_time = if order.timestamp() > 0 {
            order.timestamp() as u64
        } else {
            current_utc_micros()
        };

        let wire = NewOrderSingle {
            header,
            cl_ord_id: order.order_id().to_string(),
            symbol: order.symbol().to_string(),
            side: side_char(order.side()),
            order_qty: order.quantity(),
            price: order.price(),
            ord_type: order_type_char(order.order_type()),
            time_in_force: time_in_force_char(TimeInForce::Day),
            transact_time,
            security_exchange: self.security_exchange.clone(),
            route_source: self.service_name.clone(),
            route_source_user: self.service_name.clone(),
            route_destination: self.data_service.clone(),
            route_destination_user: self.data_service.clone(),
            text: "Order routed from OMS".to_string(),
        };

        debug!(
            "Converted OrderRequest to NewOrderSingle: {} for {} (seq {})",
            order.order_id(),
            order.symbol(),
            wire.header.msg_seq_num
        );

        Ok(wire)
    }

    /// Projects an inbound execution report into the client-facing response
    /// report. Pure field copy; only the transport header is rewritten —
    /// sender/target come from the report's routing destination fields and
    /// the sending time is reset to the unset sentinel.
    pub fn to_response_report(&self, report: &ExecutionReport) -> OrderResponseReport {
        let header = FixHeader {
            begin_string: BEGIN_STRING.to_string(),
            msg_type: report.header.msg_type.clone(),
            sender_comp_id: report.route_destination_user.clone(),
            target_comp_id: report.route_destination.clone(),
            msg_seq_num: report.header.msg_seq_num,
            sending_time: 0,
        };

        OrderResponseReport {
            header,
            order_id: report.order_id.clone(),
            orig_cl_ord_id: report.orig_cl_ord_id.clone(),
            exec_id: report.exec_id.clone(),
            exec_type: report.exec_type,
            ord_status: report.ord_status,
            symbol: report.symbol.clone(),
            security_exchange: report.security_exchange.clone(),
            side: report.side,
            order_qty: report.order_qty,
            last_qty: report.last_qty,
            cum_qty: report.cum_qty,
            leaves_qty: report.leaves_qty,
            price: report.price,
            last_price: report.last_price,
            avg_price: report.avg_price,
            stop_price: report.stop_price,
            ord_type: report.ord_type,
            time_in_force: report.time_in_force,
            transact_time: report.transact_time,
            ord_rej_reason: report.ord_rej_reason,
            text: report.text.clone(),
            route_source: report.route_source.clone(),
            route_source_user: report.route_source_user.clone(),
            route_destination: report.route_destination.clone(),
            route_destination_user: report.route_destination_user.clone(),
        }
    }
}
