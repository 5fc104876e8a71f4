/// Receiving end of an inbound feed.
///
/// The transport's callback thread hands each decoded message to exactly one
/// listener and returns immediately; the listener decides where the message
/// goes next (in this system, onto a composer queue). Keeping the contract to
/// a single method keeps the transport swappable without touching business
/// logic.
pub trait MessageListener<T>: Send + Sync {
    fn on_message(&self, message: T);
}

impl<T> MessageListener<T> for Box<dyn MessageListener<T>> {
    fn on_message(&self, message: T) {
        (**self).on_message(message)
    }
}
