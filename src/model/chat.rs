use serde::{Deserialize, Serialize};

/// Preview text of a conversation that has no messages yet
pub const NO_MESSAGES_PREVIEW: &str = "No messages yet";
/// Activity label written whenever a conversation is created or messaged
pub const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    Direct,
    Group,
}

impl ConversationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationKind::Direct => "direct",
            ConversationKind::Group => "group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: u32,
    pub name: String,
    pub kind: ConversationKind,
    pub participants: Vec<u32>,
    pub last_message_preview: String,
    pub last_activity_label: String,
    #[serde(default)]
    pub unread_count: u32,
}

impl Conversation {
    /// True for a direct conversation between exactly `a` and `b`.
    pub fn is_direct_between(&self, a: u32, b: u32) -> bool {
        self.kind == ConversationKind::Direct
            && self.participants.len() == 2
            && self.participants.contains(&a)
            && self.participants.contains(&b)
    }
}

/// A chat message, owned by its conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique within the conversation; derived from creation time
    pub id: i64,
    pub conversation_id: u32,
    pub sender_id: u32,
    pub text: String,
    /// Display-formatted time, e.g. `2:15 PM`
    pub timestamp: String,
    pub is_own: bool,
}

/// Per-conversation settings; absence means defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatSetting {
    #[serde(default)]
    pub muted: bool,
}
