//! Append-only message log.
//!
//! The single source of truth for what the UI renders. Mutations happen
//! through exactly two operations: `append` (optimistic or confirmed tail
//! push) and `replace_all` (wholesale reconciliation against a canonical
//! server fetch), making the reconciliation point first-class and testable.

use foodiespot_types::chat::Message;

/// Ordered view of the exchanged turns.
///
/// Insertion order = display order = conversational order; entries are
/// never reordered or deduplicated implicitly.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one message to the tail. O(1); prior entries are never mutated.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace the entire log with a canonical server history.
    ///
    /// Afterward the log contains exactly the given sequence, in the given
    /// order; no local-only artifacts survive.
    pub fn replace_all(&mut self, history: Vec<Message>) {
        self.messages = history;
    }

    /// The displayed turn sequence.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over the messages in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodiespot_types::chat::MessageRole;

    #[test]
    fn test_append_preserves_order() {
        let mut log = MessageLog::new();
        log.append(Message::user("first"));
        log.append(Message::assistant("second"));
        log.append(Message::user("third"));

        let contents: Vec<&str> = log.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_replace_all_discards_local_entries() {
        let mut log = MessageLog::new();
        log.append(Message::user("optimistic"));
        log.append(Message::assistant("placeholder"));

        let canonical = vec![Message::user("hello"), Message::assistant("Hi!")];
        log.replace_all(canonical.clone());

        assert_eq!(log.messages(), canonical.as_slice());
    }

    #[test]
    fn test_append_after_replace_all() {
        let mut log = MessageLog::new();
        log.replace_all(vec![Message::assistant("Welcome to FoodieSpot!")]);
        log.append(Message::user("any tapas nearby?"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[1].role, MessageRole::User);
    }

    #[test]
    fn test_empty_log() {
        let log = MessageLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
