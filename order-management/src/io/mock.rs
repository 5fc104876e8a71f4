use anyhow::{bail, Result};
use oms::OutboundFeed;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory outbound feed for tests and dry runs: records everything
/// published and can be flipped into a failing state to exercise the
/// transport-failure paths.
pub struct RecordingFeed<T> {
    sent: Mutex<Vec<T>>,
    fail: AtomicBool,
}

impl<T> RecordingFeed<T> {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let feed = Self::new();
        feed.fail.store(true, Ordering::Relaxed);
        feed
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl<T: Clone> RecordingFeed<T> {
    pub fn sent(&self) -> Vec<T> {
        self.sent.lock().unwrap().clone()
    }
}

impl<T> Default for RecordingFeed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> OutboundFeed<T> for RecordingFeed<T> {
    fn publish(&self, message: &T) -> Result<()> {
        if self.fail.load(Ordering::Relaxed) {
            bail!("mock transport failure");
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
