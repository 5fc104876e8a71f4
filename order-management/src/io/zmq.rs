use anyhow::{Context, Result};
use log::{error, info};
use oms::{MessageListener, OutboundFeed};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use zmq::{Context as ZmqContext, Socket};

/// Thread-safe PUB wrapper. Messages are JSON-encoded; the blocking send runs
/// inside the lock, which ZMQ is fast enough to tolerate.
pub struct ZmqPublisher {
    socket: Mutex<Socket>,
}

impl ZmqPublisher {
    pub fn bind(address: &str) -> Result<Self> {
        let context = ZmqContext::new();
        let socket = context
            .socket(zmq::PUB)
            .context("Failed to create PUB socket")?;
        socket
            .bind(address)
            .with_context(|| format!("Failed to bind PUB socket to {}", address))?;
        info!("[ZmqPublisher] Bound to {}", address);
        Ok(Self {
            socket: Mutex::new(socket),
        })
    }
}

impl<T: Serialize + Send + Sync> OutboundFeed<T> for ZmqPublisher {
    fn publish(&self, message: &T) -> Result<()> {
        let payload =
            serde_json::to_string(message).context("Failed to encode outbound message")?;
        let socket = self.socket.lock().unwrap();
        socket
            .send(payload.as_bytes(), 0)
            .context("Failed to send message (transport)")
    }
}

/// SUB socket drained by a dedicated thread: poll with a bounded timeout so
/// the running flag is observed, decode JSON, hand the value to the listener.
/// The listener is the composer's queue handle, so this thread only ever
/// produces.
pub struct ZmqSubscriberFeed {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    name: String,
}

impl ZmqSubscriberFeed {
    pub fn start<T, L>(name: &str, address: &str, listener: L) -> Result<Self>
    where
        T: DeserializeOwned + Send + 'static,
        L: MessageListener<T> + 'static,
    {
        let context = ZmqContext::new();
        let socket = context
            .socket(zmq::SUB)
            .context("Failed to create SUB socket")?;
        socket
            .connect(address)
            .with_context(|| format!("Failed to connect SUB socket to {}", address))?;
        socket.set_subscribe(b"").context("Failed to subscribe")?;

        info!("[{}] Subscribed to {}", name, address);

        let running = Arc::new(AtomicBool::new(true));
        let thread_running = running.clone();
        let thread_name = name.to_string();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                while thread_running.load(Ordering::Acquire) {
                    let mut items = [socket.as_poll_item(zmq::POLLIN)];
                    match zmq::poll(&mut items, 100) {
                        Ok(_) => {}
                        Err(e) => {
                            error!("[{}] Poll failed: {}", thread_name, e);
                            break;
                        }
                    }

                    if !items[0].get_revents().contains(zmq::POLLIN) {
                        continue;
                    }

                    match socket.recv_string(0) {
                        Ok(Ok(payload)) => match serde_json::from_str::<T>(&payload) {
                            Ok(message) => listener.on_message(message),
                            Err(e) => {
                                error!("[{}] Failed to parse message: {} from {}", thread_name, e, payload)
                            }
                        },
                        Ok(Err(_)) => error!("[{}] Received non-UTF8 payload", thread_name),
                        Err(e) => error!("[{}] Receive failed: {}", thread_name, e),
                    }
                }
                info!("[{}] Subscriber thread exiting", thread_name);
            })
            .expect("Failed to spawn subscriber thread");

        Ok(Self {
            running,
            handle: Some(handle),
            name: name.to_string(),
        })
    }

    pub fn stop(&mut self) {
        info!("[{}] Stopping subscriber", self.name);
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ZmqSubscriberFeed {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
