//! # Event Bus
//!
//! A small, thread-safe broadcast bus keyed by event type. Feature slices
//! publish domain notifications (e.g. migration job progress) without
//! knowing who is listening; observers subscribe by type.
//!
//! Only broadcast (fan-out) semantics are offered: every subscriber sees
//! every event published after it subscribed, and events published with no
//! subscribers are dropped.
//!
//! ## Example
//!
//! ```rust
//! use tessera_event_bus::EventBus;
//!
//! #[derive(Debug)]
//! struct JobTick(u64);
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe::<JobTick>();
//! bus.publish(JobTick(1));
//! assert_eq!(rx.recv().await.unwrap().0, 1);
//! # }
//! ```

mod bus;

pub use crate::bus::{Event, EventBus};
