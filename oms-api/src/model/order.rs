use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
}

impl OrderType {
    /// True for every type that carries a meaningful limit price.
    pub fn requires_price(&self) -> bool {
        !matches!(self, OrderType::Market)
    }

    /// True for the stop family, which requires a trigger price.
    pub fn requires_stop_price(&self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    Day,
    GoodTillCancel,
    ImmediateOrCancel,
}

/// A client's instruction to buy or sell, as delivered by the inbound order
/// feed. Immutable once created; the pipeline consumes it exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    order_id: String,
    client_id: String,
    symbol: String,
    side: Side,
    order_type: OrderType,
    quantity: f64,
    price: f64,
    stop_price: f64,
    /// Epoch microseconds at submission; 0 means unset.
    timestamp: i64,
    user_id: String,
}

impl OrderRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: impl Into<String>,
        client_id: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: f64,
        price: f64,
        stop_price: f64,
        timestamp: i64,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            client_id: client_id.into(),
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price,
            stop_price,
            timestamp,
            user_id: user_id.into(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stop_price(&self) -> f64 {
        self.stop_price
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Notional value of the order. Market orders have no price yet, so their
    /// notional is the quantity alone.
    pub fn notional_value(&self) -> f64 {
        if self.order_type == OrderType::Market {
            self.quantity.abs()
        } else {
            (self.quantity * self.price).abs()
        }
    }
}
