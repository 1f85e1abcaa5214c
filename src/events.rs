use std::pin::Pin;
use std::sync::{Arc, RwLock};

use futures::{Stream, StreamExt};
use stream_cancel::{Trigger, Valved};
use tokio::sync::broadcast;
use tokio::sync::broadcast::Sender;
use tokio_stream::wrappers::BroadcastStream;

/// Something noteworthy a [`DeviceSession`](crate::DeviceSession) did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Connected { address: String },
    Disconnected { address: String },
    ChargingModeSet { address: String, label: String, code: u8 },
    VoltageSet { address: String, volts: f64, raw: u16 },
}

/// Receives session events. Injected per session instead of a global logger.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &SessionEvent);
}

/// Forwards events to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &SessionEvent) {
        match event {
            SessionEvent::Connected { address } => log::info!("Connected to {}", address),
            SessionEvent::Disconnected { address } => {
                log::info!("Disconnected from {}", address)
            }
            SessionEvent::ChargingModeSet {
                address,
                label,
                code,
            } => log::info!("Set charging mode of {} to {} ({})", address, label, code),
            SessionEvent::VoltageSet {
                address,
                volts,
                raw,
            } => log::info!("Set voltage of {} to {} V (raw {})", address, volts, raw),
        }
    }
}

/// Fans events out to any number of subscriber streams.
pub struct BroadcastSink {
    event_sender: Sender<SessionEvent>,
    stream_stoppers: Arc<RwLock<Vec<Trigger>>>,
}

impl Default for BroadcastSink {
    fn default() -> Self {
        BroadcastSink::new(16)
    }
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (event_sender, _) = broadcast::channel(capacity);

        Self {
            event_sender,
            stream_stoppers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a new stream that receives session events.
    ///
    /// Lagging subscribers silently skip the events they missed.
    pub fn subscribe(&self) -> Valved<Pin<Box<dyn Stream<Item = SessionEvent> + Send>>> {
        let receiver = self.event_sender.subscribe();

        let stream: Pin<Box<dyn Stream<Item = SessionEvent> + Send>> =
            Box::pin(BroadcastStream::new(receiver).filter_map(|x| async move { x.ok() }));

        let (trigger, stream) = Valved::new(stream);
        if let Ok(mut stoppers) = self.stream_stoppers.write() {
            stoppers.push(trigger);
        }

        stream
    }

    /// End every stream handed out by [`subscribe`](Self::subscribe).
    pub fn close_streams(&self) {
        if let Ok(mut stoppers) = self.stream_stoppers.write() {
            stoppers.clear();
        }
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: &SessionEvent) {
        if self.event_sender.send(event.clone()).is_err() {
            log::trace!("No subscribers for {:?}", event);
        }
    }
}
