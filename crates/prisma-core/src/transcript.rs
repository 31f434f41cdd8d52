//! Transcript controller: owns every mutation of the chat message list.

use tracing::debug;

use crate::script::{ChatEvent, Script};

/// Ordered chat transcript for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatEvent>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole transcript with a fresh copy of the scripted chat.
    ///
    /// Earlier user messages are discarded.
    pub fn load_script(&mut self, script: &Script) {
        self.messages.clear();
        self.messages.extend_from_slice(script.chat());
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Appends a user message.
    ///
    /// Text that is empty after trimming is ignored and `false` is returned.
    pub fn submit_user_message(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        debug!(chars = text.chars().count(), "user message appended");
        self.messages.push(ChatEvent::user(text));
        true
    }

    pub fn messages(&self) -> &[ChatEvent] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatEvent> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatEvent> {
        self.messages.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatEvent;
    type IntoIter = std::slice::Iter<'a, ChatEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
