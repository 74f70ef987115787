use chrono::NaiveDateTime;

use super::{
    CHAT_SETTINGS_KEY, CONVERSATIONS_KEY, EntityKind, EntityStore, MESSAGES_KEY, StoreError,
    ValidationError, commit, next_id,
};
use crate::io::kv;
use crate::model::chat::{
    ChatSetting, Conversation, ConversationKind, JUST_NOW, Message, NO_MESSAGES_PREVIEW,
};
use crate::ops::chat_ops;
use crate::util::dates::format_clock;

impl EntityStore {
    /// Reuse the direct conversation with `roommate_id` if there is one,
    /// otherwise create it. The flag is true when a conversation was created.
    pub fn open_direct_chat(&mut self, roommate_id: u32) -> Result<(Conversation, bool), StoreError> {
        if roommate_id == self.current_user {
            return Err(ValidationError::new("participants", "Cannot start a chat with yourself").into());
        }
        let Some(roommate) = self.roster.by_id(roommate_id) else {
            return Err(StoreError::missing(EntityKind::Roommate, roommate_id));
        };
        if let Some(existing) = chat_ops::find_direct(&self.conversations, self.current_user, roommate_id) {
            tracing::debug!(id = existing.id, "reusing direct conversation");
            return Ok((existing.clone(), false));
        }

        let name = roommate.name.clone();
        let conversation = self.add_conversation(name, ConversationKind::Direct, vec![self.current_user, roommate_id])?;
        Ok((conversation, true))
    }

    /// New group conversation. The current user is always a participant.
    pub fn create_group_chat(&mut self, name: &str, participant_ids: &[u32]) -> Result<Conversation, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("group chat rejected: empty name");
            return Err(ValidationError::new("name", "Please enter a group name").into());
        }

        let mut participants = vec![self.current_user];
        for &id in participant_ids {
            if id == self.current_user || participants.contains(&id) {
                continue;
            }
            if !self.roster.contains_id(id) {
                return Err(ValidationError::new("participants", format!("Unknown roommate: {}", id)).into());
            }
            participants.push(id);
        }
        if participants.len() < 2 {
            tracing::warn!("group chat rejected: no participants");
            return Err(ValidationError::new("participants", "Please select at least one participant").into());
        }

        self.add_conversation(name.to_string(), ConversationKind::Group, participants)
    }

    /// Prepend a fresh conversation with an empty message list.
    pub fn add_conversation(
        &mut self,
        name: String,
        kind: ConversationKind,
        participants: Vec<u32>,
    ) -> Result<Conversation, StoreError> {
        let conversation = Conversation {
            id: next_id("conversation", self.conversations.iter().map(|c| c.id))?,
            name,
            kind,
            participants,
            last_message_preview: NO_MESSAGES_PREVIEW.to_string(),
            last_activity_label: JUST_NOW.to_string(),
            unread_count: 0,
        };

        let mut conversations = self.conversations.clone();
        conversations.insert(0, conversation.clone());
        let mut messages = self.messages.clone();
        messages.insert(conversation.id, Vec::new());

        self.commit_chat(conversations, messages)?;
        tracing::info!(id = conversation.id, kind = kind.as_str(), "conversation created");
        Ok(conversation)
    }

    /// Append `text` from `sender_id` and refresh the conversation summary.
    pub fn append_message(
        &mut self,
        conversation_id: u32,
        sender_id: u32,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<Message, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::new("text", "Message cannot be empty").into());
        }
        let Some(index) = self.conversations.iter().position(|c| c.id == conversation_id) else {
            tracing::warn!(conversation_id, "message to unknown conversation");
            return Err(StoreError::InvalidConversation(conversation_id));
        };
        if !self.roster.contains_id(sender_id) {
            return Err(ValidationError::new("sender", format!("Unknown roommate: {}", sender_id)).into());
        }

        let mut messages = self.messages.clone();
        let thread = messages.entry(conversation_id).or_default();
        let message = Message {
            id: chat_ops::next_message_id(thread, now.and_utc().timestamp_millis())
                .ok_or(StoreError::IdsExhausted("message"))?,
            conversation_id,
            sender_id,
            text: text.to_string(),
            timestamp: format_clock(now),
            is_own: sender_id == self.current_user,
        };
        thread.push(message.clone());

        let mut conversations = self.conversations.clone();
        let conversation = &mut conversations[index];
        conversation.last_message_preview =
            chat_ops::preview_for(text, sender_id, self.current_user, &self.roster);
        conversation.last_activity_label = JUST_NOW.to_string();

        self.commit_chat(conversations, messages)?;
        tracing::info!(conversation_id, id = message.id, "message sent");
        Ok(message)
    }

    /// Flip the mute flag, returning the new value.
    pub fn toggle_mute(&mut self, conversation_id: u32) -> Result<bool, StoreError> {
        let muted = !chat_ops::is_muted(&self.chat_settings, conversation_id);
        self.set_mute(conversation_id, muted)
    }

    pub fn set_mute(&mut self, conversation_id: u32, muted: bool) -> Result<bool, StoreError> {
        if self.conversation(conversation_id).is_none() {
            return Err(StoreError::InvalidConversation(conversation_id));
        }
        let mut next = self.chat_settings.clone();
        next.entry(conversation_id).or_insert_with(ChatSetting::default).muted = muted;
        commit(self.kv.as_mut(), CHAT_SETTINGS_KEY, &mut self.chat_settings, next)?;
        tracing::info!(conversation_id, muted, "mute changed");
        Ok(muted)
    }

    /// Persist messages then conversations, and swap both in. If the second
    /// write fails the first document is restored.
    fn commit_chat(
        &mut self,
        conversations: Vec<Conversation>,
        messages: indexmap::IndexMap<u32, Vec<Message>>,
    ) -> Result<(), StoreError> {
        kv::persist_json(self.kv.as_mut(), MESSAGES_KEY, &messages)?;
        if let Err(e) = kv::persist_json(self.kv.as_mut(), CONVERSATIONS_KEY, &conversations) {
            if let Err(restore) = kv::persist_json(self.kv.as_mut(), MESSAGES_KEY, &self.messages) {
                tracing::warn!(error = %restore, "could not restore messages document");
            }
            return Err(e.into());
        }
        self.messages = messages;
        self.conversations = conversations;
        Ok(())
    }
}
