use serde::{Deserialize, Serialize};

/// Terminal pipeline outcome reported back to the submitting client.
/// `Validated` means the order passed risk and was handed to the matching
/// engine; fills and cancels arrive later on the execution-report path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Validated,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    order_id: String,
    status: OrderStatus,
    message: String,
    /// Epoch milliseconds at which the response was produced.
    timestamp: i64,
}

impl OrderResponse {
    pub fn new(
        order_id: impl Into<String>,
        status: OrderStatus,
        message: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            status,
            message: message.into(),
            timestamp,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}
