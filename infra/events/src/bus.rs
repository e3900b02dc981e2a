use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Buffer size per event channel. Progress notifications are small and
/// frequent; slow subscribers lag rather than block publishers.
const CHANNEL_CAPACITY: usize = 128;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// A thread-safe broadcast bus, one channel per event type.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to events of type `T`.
    ///
    /// The channel is created on first use; all subscribers of the same
    /// type share it.
    #[must_use]
    pub fn subscribe<T: Event>(&self) -> broadcast::Receiver<Arc<T>> {
        self.sender::<T>().subscribe()
    }

    /// Publishes an event, returning the number of subscribers reached.
    ///
    /// Events with no active subscribers are dropped silently; publishing
    /// never blocks or errors.
    pub fn publish<T: Event>(&self, event: T) -> usize {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes a shared event instance without re-wrapping.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> usize {
        match self.sender::<T>().send(event) {
            Ok(count) => {
                trace!(event = std::any::type_name::<T>(), count, "Event dispatched");
                count
            },
            Err(_) => {
                trace!(event = std::any::type_name::<T>(), "Event dropped: no active subscribers");
                0
            },
        }
    }

    /// Drops all channels. Returns how many were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn sender<T: Event>(&self) -> broadcast::Sender<Arc<T>> {
        let id = TypeId::of::<T>();

        if let Some(entry) = self.channels.read().get(&id) {
            // The map is only ever populated by this method, so the
            // downcast cannot fail for a present key.
            if let Some(tx) = entry.downcast_ref::<broadcast::Sender<Arc<T>>>() {
                return tx.clone();
            }
        }

        let mut channels = self.channels.write();
        let entry = channels.entry(id).or_insert_with(|| {
            trace!(event = std::any::type_name::<T>(), "Initializing new event channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(CHANNEL_CAPACITY);
            Box::new(tx)
        });
        entry
            .downcast_ref::<broadcast::Sender<Arc<T>>>()
            .expect("channel registered under its own TypeId")
            .clone()
    }
}
