use serde::{Deserialize, Serialize};

use super::fix::FixHeader;

/// Execution report received from the matching engine (MsgType "8"
/// conventions). Status and exec-type codes are carried verbatim as FIX
/// characters; interpreting them is the consumer's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub header: FixHeader,
    pub order_id: String,
    pub orig_cl_ord_id: String,
    pub exec_id: String,
    pub exec_type: char,
    pub ord_status: char,
    pub symbol: String,
    pub security_exchange: String,
    pub side: char,
    pub order_qty: f64,
    pub last_qty: f64,
    pub cum_qty: f64,
    pub leaves_qty: f64,
    pub price: f64,
    pub last_price: f64,
    pub avg_price: f64,
    pub stop_price: f64,
    pub ord_type: char,
    pub time_in_force: char,
    /// Epoch microseconds.
    pub transact_time: u64,
    pub ord_rej_reason: Option<i32>,
    pub text: String,
    pub route_source: String,
    pub route_source_user: String,
    pub route_destination: String,
    pub route_destination_user: String,
}

/// Client-facing projection of an `ExecutionReport`. Field-for-field copy of
/// the execution fields; only the transport header differs (sender/target
/// rewritten from the routing fields, sending time reset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderResponseReport {
    pub header: FixHeader,
    pub order_id: String,
    pub orig_cl_ord_id: String,
    pub exec_id: String,
    pub exec_type: char,
    pub ord_status: char,
    pub symbol: String,
    pub security_exchange: String,
    pub side: char,
    pub order_qty: f64,
    pub last_qty: f64,
    pub cum_qty: f64,
    pub leaves_qty: f64,
    pub price: f64,
    pub last_price: f64,
    pub avg_price: f64,
    pub stop_price: f64,
    pub ord_type: char,
    pub time_in_force: char,
    pub transact_time: u64,
    pub ord_rej_reason: Option<i32>,
    pub text: String,
    pub route_source: String,
    pub route_source_user: String,
    pub route_destination: String,
    pub route_destination_user: String,
}
