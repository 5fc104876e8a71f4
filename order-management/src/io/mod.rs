pub mod args;
pub mod mock;
pub mod zmq;

pub use args::Args;
pub use mock::RecordingFeed;
pub use self::zmq::{ZmqPublisher, ZmqSubscriberFeed};
