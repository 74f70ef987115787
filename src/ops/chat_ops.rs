use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::chat::{ChatSetting, Conversation, ConversationKind, Message};
use crate::model::roommate::Roster;
use crate::util::unicode::truncate_chars;

/// Longest message prefix kept in a conversation preview
pub const PREVIEW_CHARS: usize = 30;

/// One row of the conversation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRow {
    pub id: u32,
    pub name: String,
    pub kind: ConversationKind,
    pub preview: String,
    pub activity: String,
    pub muted: bool,
    /// Hidden when muted or nothing is unread
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_badge: Option<u32>,
}

/// A message with its sender resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRow {
    pub id: i64,
    pub sender_name: String,
    pub sender_initials: String,
    pub text: String,
    pub time: String,
    pub is_own: bool,
}

/// A roommate the current user could open a direct chat with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectCandidate {
    pub roommate_id: u32,
    pub name: String,
    pub chat_exists: bool,
}

pub fn is_muted(settings: &BTreeMap<u32, ChatSetting>, conversation_id: u32) -> bool {
    settings.get(&conversation_id).is_some_and(|s| s.muted)
}

/// Existing direct conversation between `a` and `b`, if any
pub fn find_direct(conversations: &[Conversation], a: u32, b: u32) -> Option<&Conversation> {
    conversations.iter().find(|c| c.is_direct_between(a, b))
}

/// Preview line for a newly sent message: "You: ..." for the current user,
/// "<first name>: ..." for anyone else.
pub fn preview_for(text: &str, sender_id: u32, current_user: u32, roster: &Roster) -> String {
    let speaker = if sender_id == current_user {
        "You".to_string()
    } else {
        roster
            .by_id(sender_id)
            .map(|r| r.first_name().to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    };
    format!("{}: {}", speaker, truncate_chars(text, PREVIEW_CHARS, "..."))
}

/// Creation-time message id, bumped past the newest id so rapid sends in
/// the same millisecond stay unique. `None` once the newest id is `i64::MAX`.
pub fn next_message_id(existing: &[Message], now_millis: i64) -> Option<i64> {
    let newest = existing.iter().map(|m| m.id).max().unwrap_or(i64::MIN);
    if now_millis > newest {
        Some(now_millis)
    } else {
        newest.checked_add(1)
    }
}

pub fn conversation_rows(
    conversations: &[Conversation],
    settings: &BTreeMap<u32, ChatSetting>,
) -> Vec<ConversationRow> {
    conversations
        .iter()
        .map(|c| {
            let muted = is_muted(settings, c.id);
            ConversationRow {
                id: c.id,
                name: c.name.clone(),
                kind: c.kind,
                preview: c.last_message_preview.clone(),
                activity: c.last_activity_label.clone(),
                muted,
                unread_badge: (c.unread_count > 0 && !muted).then_some(c.unread_count),
            }
        })
        .collect()
}

pub fn message_rows(messages: &[Message], roster: &Roster) -> Vec<MessageRow> {
    messages
        .iter()
        .map(|m| {
            let sender = roster.by_id(m.sender_id);
            MessageRow {
                id: m.id,
                sender_name: sender.map_or_else(|| "Unknown".to_string(), |r| r.name.clone()),
                sender_initials: sender.map_or_else(|| "??".to_string(), |r| r.initials.clone()),
                text: m.text.clone(),
                time: m.timestamp.clone(),
                is_own: m.is_own,
            }
        })
        .collect()
}

/// Everyone except the current user, flagged when a direct chat exists
pub fn direct_candidates(
    roster: &Roster,
    conversations: &[Conversation],
    current_user: u32,
) -> Vec<DirectCandidate> {
    roster
        .members()
        .iter()
        .filter(|r| r.id != current_user)
        .map(|r| DirectCandidate {
            roommate_id: r.id,
            name: r.name.clone(),
            chat_exists: find_direct(conversations, current_user, r.id).is_some(),
        })
        .collect()
}
