pub mod model;
pub mod traits;

pub use model::execution::{ExecutionReport, OrderResponseReport};
pub use model::fix::{FixHeader, NewOrderSingle};
pub use model::order::{OrderRequest, OrderType, Side, TimeInForce};
pub use model::response::{OrderResponse, OrderStatus};
pub use traits::feed::OutboundFeed;
pub use traits::listener::MessageListener;
