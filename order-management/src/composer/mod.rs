use log::info;
use oms::MessageListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub mod queue;

pub use queue::ConcurrentQueue;

/// Single-consumer work queue with a dedicated worker thread.
///
/// Producers enqueue from any thread; the worker drains the queue in arrival
/// order and applies the processing function to each message, so processing
/// order equals arrival order and at most one processing call is active at a
/// time. When the queue is empty the worker sleeps for the idle interval
/// instead of blocking on a condition variable, which bounds worst-case wakeup
/// latency and lets a backlog drain in one pass.
pub struct Composer<T> {
    queue: Arc<ConcurrentQueue<T>>,
    done: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    name: String,
}

impl<T: Send + 'static> Composer<T> {
    pub fn new<F>(name: impl Into<String>, idle_interval: Duration, mut processor: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let name = name.into();
        let queue = Arc::new(ConcurrentQueue::new());
        let done = Arc::new(AtomicBool::new(false));

        let worker_queue = queue.clone();
        let worker_done = done.clone();
        let worker_name = name.clone();

        info!("Starting composer [{}]", worker_name);

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                while !worker_done.load(Ordering::Acquire) {
                    while let Some(message) = worker_queue.try_pop() {
                        processor(message);
                    }
                    thread::sleep(idle_interval);
                }

                // One last drain so messages enqueued before stop() was
                // observed are processed rather than discarded.
                while let Some(message) = worker_queue.try_pop() {
                    processor(message);
                }

                info!("Composer [{}] exiting", worker_name);
            })
            .expect("Failed to spawn composer thread");

        Self {
            queue,
            done,
            handle: Some(handle),
            name,
        }
    }

    pub fn enqueue(&self, message: T) {
        self.queue.push(message);
    }

    /// Enqueue capability as a standalone listener for transport wiring.
    pub fn listener(&self) -> ComposerListener<T> {
        ComposerListener {
            queue: self.queue.clone(),
        }
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop the worker: sets the flag and joins. The worker finishes its
    /// current drain-or-sleep cycle, drains once more, then exits.
    pub fn stop(&mut self) {
        info!("Stopping composer [{}]", self.name);
        self.done.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl<T> Drop for Composer<T> {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Cloneable handle to a composer's queue implementing the feed-listener
/// contract. Outlives nothing: the queue is shared, the worker is not.
pub struct ComposerListener<T> {
    queue: Arc<ConcurrentQueue<T>>,
}

impl<T> Clone for ComposerListener<T> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<T: Send + Sync> MessageListener<T> for ComposerListener<T> {
    fn on_message(&self, message: T) {
        self.queue.push(message);
    }
}
