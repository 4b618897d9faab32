//! Event channel built on crossbeam-channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sending half handed to the engine.
///
/// Cloneable; sending never blocks and never fails from the caller's
/// point of view.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { inner: sender }
    }

    /// Send an event. Dropped silently once the receiver is gone.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receiving half held by the front end.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event arrives, `None` once every sender is dropped
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    /// Create an unbounded event channel.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender nobody listens to, for callers that don't want progress.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ArchiveEvent, IngestEvent};
    use std::thread;

    #[test]
    fn ingest_progress_crosses_threads() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.send(Event::Ingest(IngestEvent::ItemFound {
                relative_path: "Photos/IMG_01.JPG".to_string(),
                is_directory: false,
                discovered: 3,
            }));
        });
        handle.join().unwrap();

        match receiver.recv() {
            Some(Event::Ingest(IngestEvent::ItemFound { discovered, .. })) => {
                assert_eq!(discovered, 3)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn null_sender_swallows_events() {
        let sender = null_sender();
        sender.send(Event::Archive(ArchiveEvent::Completed {
            files_written: 0,
            directories_written: 0,
            failed: 0,
        }));
    }

    #[test]
    fn receiver_ends_when_senders_drop() {
        let (sender, receiver) = EventChannel::new();
        sender.send(Event::Ingest(IngestEvent::Completed {
            files: 1,
            empty_directories: 0,
            skipped: 0,
        }));
        drop(sender);

        assert_eq!(receiver.iter().count(), 1);
        assert!(receiver.recv().is_none());
    }
}
