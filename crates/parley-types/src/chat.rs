//! Chat turn and conversation types for Parley.
//!
//! A `ChatTurn` is one immutable message in a conversation. Conversations are
//! not stored entities: they are rebuilt by replaying every turn that shares a
//! `(user_id, conversation_id)` pair in insertion order.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Conversation id used when the caller does not pick one.
///
/// The presentation shell keeps a single thread per user.
pub const DEFAULT_CONVERSATION_ID: &str = "1";

/// Which party produced a turn.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (message_type IN ('AI', 'Human'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnRole {
    Human,
    #[serde(rename = "AI")]
    Assistant,
}

impl TurnRole {
    /// Value stored in the `message_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::Human => "Human",
            TurnRole::Assistant => "AI",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Human" => Ok(TurnRole::Human),
            "AI" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid message type: '{other}'")),
        }
    }
}

/// Identity of a conversation thread: one user, one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub user_id: String,
    pub conversation_id: String,
}

impl ConversationKey {
    pub fn new(user_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            conversation_id: conversation_id.into(),
        }
    }

    /// Key for the user's single default thread.
    pub fn default_for(user_id: impl Into<String>) -> Self {
        Self::new(user_id, DEFAULT_CONVERSATION_ID)
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.conversation_id)
    }
}

/// One message in a conversation.
///
/// Immutable once written. Ordering within a conversation comes from the
/// store's insertion sequence, not from any field on the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user_id: String,
    pub conversation_id: String,
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(key: &ConversationKey, role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            user_id: key.user_id.clone(),
            conversation_id: key.conversation_id.clone(),
            role,
            content: content.into(),
        }
    }
}

/// Speaker label shown for assistant turns in a rendered transcript.
pub const ASSISTANT_LABEL: &str = "AI";

/// One rendered line of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub speaker: String,
    pub text: String,
}

/// The display form of a conversation: `(speaker_label, text)` pairs in order.
///
/// Human turns are labelled with the user's name, assistant turns with `"AI"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub user_id: String,
    pub conversation_id: String,
    pub lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn from_turns(key: &ConversationKey, turns: &[ChatTurn]) -> Self {
        let lines = turns
            .iter()
            .map(|turn| TranscriptLine {
                speaker: match turn.role {
                    TurnRole::Human => turn.user_id.clone(),
                    TurnRole::Assistant => ASSISTANT_LABEL.to_string(),
                },
                text: turn.content.clone(),
            })
            .collect();

        Self {
            user_id: key.user_id.clone(),
            conversation_id: key.conversation_id.clone(),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::Human, TurnRole::Assistant] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_storage_values() {
        assert_eq!(TurnRole::Human.as_str(), "Human");
        assert_eq!(TurnRole::Assistant.as_str(), "AI");
        assert!("assistant".parse::<TurnRole>().is_err());
        assert!("human".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_turn_role_serde() {
        let json = serde_json::to_string(&TurnRole::Assistant).unwrap();
        assert_eq!(json, "\"AI\"");
        let parsed: TurnRole = serde_json::from_str("\"Human\"").unwrap();
        assert_eq!(parsed, TurnRole::Human);
    }

    #[test]
    fn test_default_key_uses_single_thread() {
        let key = ConversationKey::default_for("alice");
        assert_eq!(key.conversation_id, DEFAULT_CONVERSATION_ID);
        assert_eq!(key.to_string(), "alice/1");
    }

    #[test]
    fn test_chat_turn_carries_key() {
        let key = ConversationKey::new("bob", "7");
        let turn = ChatTurn::new(&key, TurnRole::Human, "hi");
        assert_eq!((turn.user_id.as_str(), turn.conversation_id.as_str()), ("bob", "7"));
        assert_eq!(turn.content, "hi");
    }

    #[test]
    fn test_transcript_labels() {
        let key = ConversationKey::default_for("alice");
        let turns = vec![
            ChatTurn::new(&key, TurnRole::Human, "What is 2+2?"),
            ChatTurn::new(&key, TurnRole::Assistant, "4"),
        ];

        let transcript = Transcript::from_turns(&key, &turns);
        assert_eq!(transcript.lines.len(), 2);
        assert_eq!(transcript.lines[0].speaker, "alice");
        assert_eq!(transcript.lines[0].text, "What is 2+2?");
        assert_eq!(transcript.lines[1].speaker, "AI");
        assert_eq!(transcript.lines[1].text, "4");
    }
}
