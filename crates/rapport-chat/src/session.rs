//! Conversation session state.
//!
//! One [`Session`] per host run: an append-only transcript, the
//! preference store, and the awaiting cursor that tracks which guided
//! question (if any) is outstanding. The router mutates it through
//! `&mut`; nothing here survives the process.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prefs::{PendingPreference, Preferences};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    /// Epoch seconds.
    pub created_at: i64,
}

impl ChatMessage {
    fn new(role: Role, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.to_string(),
            created_at: Local::now().timestamp(),
        }
    }
}

/// Mutable per-session conversation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Ordered transcript, append-only except for [`Session::clear_messages`].
    pub messages: Vec<ChatMessage>,
    pub prefs: Preferences,
    /// At most one outstanding guided question at a time.
    pub awaiting: Option<PendingPreference>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session: empty transcript, no preferences, awaiting the
    /// name question.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            prefs: Preferences::default(),
            awaiting: Some(PendingPreference::Name),
        }
    }

    /// Append a user message to the transcript.
    pub fn push_user(&mut self, content: &str) {
        self.messages.push(ChatMessage::new(Role::User, content));
    }

    /// Append an assistant message to the transcript.
    pub fn push_assistant(&mut self, content: &str) {
        self.messages.push(ChatMessage::new(Role::Assistant, content));
    }

    /// Empty the transcript.
    ///
    /// Preferences and the awaiting cursor are untouched; clearing an
    /// already-empty transcript is a no-op.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_state() {
        let session = Session::new();
        assert!(session.messages.is_empty());
        assert!(session.prefs.name.is_none());
        assert!(session.prefs.location.is_none());
        assert_eq!(session.awaiting, Some(PendingPreference::Name));
    }

    #[test]
    fn test_default_matches_new() {
        // Default must also start the guided flow at the name question.
        let session = Session::default();
        assert!(session.messages.is_empty());
        assert!(session.prefs.is_empty());
        assert_eq!(session.awaiting, Some(PendingPreference::Name));
    }

    #[test]
    fn test_push_preserves_order() {
        let mut session = Session::new();
        session.push_user("hello");
        session.push_assistant("hi there");
        session.push_user("weather");

        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[0].content, "hello");
        assert_eq!(session.messages[1].role, Role::Assistant);
        assert_eq!(session.messages[2].content, "weather");
    }

    #[test]
    fn test_messages_have_distinct_ids() {
        let mut session = Session::new();
        session.push_user("a");
        session.push_user("b");
        assert_ne!(session.messages[0].id, session.messages[1].id);
    }

    #[test]
    fn test_clear_messages_idempotent() {
        let mut session = Session::new();
        session.prefs.set(PendingPreference::Name, "Alex");
        session.push_user("hello");
        session.push_assistant("hi");

        session.clear_messages();
        assert!(session.messages.is_empty());
        // Clearing twice in a row is a no-op both times.
        session.clear_messages();
        assert!(session.messages.is_empty());
        // Preferences are never altered by a transcript clear.
        assert_eq!(session.prefs.name.as_deref(), Some("Alex"));
    }

    #[test]
    fn test_clear_messages_leaves_awaiting() {
        let mut session = Session::new();
        session.push_assistant("Welcome!");
        session.clear_messages();
        assert_eq!(session.awaiting, Some(PendingPreference::Name));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let json = serde_json::to_string(&Role::User).unwrap();
        assert_eq!(json, "\"user\"");
    }
}
