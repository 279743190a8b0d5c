use parking_lot::RwLock;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

use crate::broker::Message;

/// Append-only, arrival-ordered store of received messages
///
/// Appends and snapshots go through one internal lock, so a reader never sees
/// half of a batch. The buffer is unbounded unless built with
/// [`MessageBuffer::with_capacity_limit`], in which case the oldest messages
/// are evicted once the limit is reached.
#[derive(Debug, Default)]
pub struct MessageBuffer {
    messages: RwLock<VecDeque<Message>>,
    capacity: Option<NonZeroUsize>,
}

impl MessageBuffer {
    /// Create an unbounded buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding at most `capacity` messages (drop-oldest)
    pub fn with_capacity_limit(capacity: NonZeroUsize) -> Self {
        Self {
            messages: RwLock::new(VecDeque::new()),
            capacity: Some(capacity),
        }
    }

    pub fn append(&self, message: Message) {
        let mut messages = self.messages.write();
        messages.push_back(message);
        self.evict(&mut messages);
    }

    /// Append a whole batch, in order, under a single lock acquisition
    pub fn append_batch(&self, batch: impl IntoIterator<Item = Message>) {
        let mut messages = self.messages.write();
        messages.extend(batch);
        self.evict(&mut messages);
    }

    /// Copy of every message currently held, oldest first
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    fn evict(&self, messages: &mut VecDeque<Message>) {
        if let Some(capacity) = self.capacity {
            while messages.len() > capacity.get() {
                messages.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn payloads(buffer: &MessageBuffer) -> Vec<String> {
        buffer.snapshot().into_iter().map(|m| m.payload).collect()
    }

    #[test]
    fn test_empty_snapshot() {
        let buffer = MessageBuffer::new();
        assert!(buffer.snapshot().is_empty());
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_snapshot_preserves_append_order() {
        let buffer = MessageBuffer::new();
        for payload in ["a", "b", "c", "b"] {
            buffer.append(Message::new("t", payload));
        }
        assert_eq!(payloads(&buffer), vec!["a", "b", "c", "b"]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let buffer = MessageBuffer::new();
        buffer.append(Message::new("t", "first"));
        let before = buffer.snapshot();

        buffer.append(Message::new("t", "second"));

        assert_eq!(before.len(), 1);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_append_batch_keeps_batch_order() {
        let buffer = MessageBuffer::new();
        buffer.append(Message::new("t", "x"));
        buffer.append_batch(vec![Message::new("t", "a"), Message::new("t", "b")]);
        assert_eq!(payloads(&buffer), vec!["x", "a", "b"]);
    }

    #[test]
    fn test_capacity_limit_drops_oldest() {
        let capacity = NonZeroUsize::new(2).unwrap();
        let buffer = MessageBuffer::with_capacity_limit(capacity);
        buffer.append(Message::new("t", "1"));
        buffer.append(Message::new("t", "2"));
        buffer.append_batch(vec![Message::new("t", "3"), Message::new("t", "4")]);
        assert_eq!(payloads(&buffer), vec!["3", "4"]);
        assert_eq!(buffer.capacity(), Some(capacity));
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let buffer = Arc::new(MessageBuffer::new());
        let writers: Vec<_> = (0..4)
            .map(|writer| {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || {
                    for i in 0..250 {
                        buffer.append(Message::new("t", format!("{writer}-{i}")));
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), 1_000);

        // Per-writer order is preserved
        for writer in 0..4 {
            let prefix = format!("{writer}-");
            let seen: Vec<usize> = snapshot
                .iter()
                .filter_map(|m| m.payload.strip_prefix(&prefix))
                .map(|n| n.parse().unwrap())
                .collect();
            assert_eq!(seen, (0..250).collect::<Vec<_>>());
        }
    }
}
