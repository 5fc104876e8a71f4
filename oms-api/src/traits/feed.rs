use anyhow::Result;

/// Publishing end of an outbound feed.
///
/// Implementations report failure through the error channel and must be
/// callable from any thread; retry policy belongs to the caller.
pub trait OutboundFeed<T>: Send + Sync {
    fn publish(&self, message: &T) -> Result<()>;
}

impl<T> OutboundFeed<T> for Box<dyn OutboundFeed<T>> {
    fn publish(&self, message: &T) -> Result<()> {
        (**self).publish(message)
    }
}
