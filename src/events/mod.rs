//! # Events Module
//!
//! Progress reporting for ingestion and archive generation.
//!
//! The core library emits events through a channel so the CLI (or any other
//! front end) can show loading counters and archive progress without the
//! engine knowing how they are displayed.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Ingest(IngestEvent::ItemFound { discovered, .. }) = event {
//!             println!("{discovered} items loaded");
//!         }
//!     }
//! });
//!
//! let result = ingest_drop(payload, &sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
