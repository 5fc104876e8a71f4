use serde::{Deserialize, Serialize};

/// FIX-style transport header shared by every outbound wire message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixHeader {
    pub begin_string: String,
    pub msg_type: String,
    pub sender_comp_id: String,
    pub target_comp_id: String,
    pub msg_seq_num: u64,
    /// Epoch microseconds; 0 is the "not set" sentinel.
    pub sending_time: u64,
}

/// Outbound order message to the matching engine, following
/// NewOrderSingle (MsgType "D") field conventions.
///
/// Composed by value: header plus body, no message-type hierarchy. Fully
/// derived from an `OrderRequest`; never mutated after the adapter builds it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrderSingle {
    pub header: FixHeader,
    pub cl_ord_id: String,
    pub symbol: String,
    /// FIX side code: '1' = Buy, '2' = Sell.
    pub side: char,
    pub order_qty: f64,
    pub price: f64,
    /// FIX ord-type code: '1' = Market, '2' = Limit, '3' = Stop, '4' = StopLimit.
    pub ord_type: char,
    /// FIX time-in-force code: '0' = Day.
    pub time_in_force: char,
    /// Epoch microseconds.
    pub transact_time: u64,
    pub security_exchange: String,
    pub route_source: String,
    pub route_source_user: String,
    pub route_destination: String,
    pub route_destination_user: String,
    pub text: String,
}
