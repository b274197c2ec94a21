use chrono::Utc;
use tracing::debug;

use divine_shared::{ChatTurn, MatchId, MessageId, Role, SenderId};

use crate::error::{Result, StoreError};
use crate::models::Message;
use crate::store::ConversationStore;

impl ConversationStore {
    /// Append a message to a match's conversation.
    ///
    /// Updates the match's last-message summary and ordering key. A message
    /// from the counterpart bumps `unread_count` unless the conversation is
    /// in the foreground; a message from the session user clears it.
    ///
    /// Fails with [`StoreError::MatchNotFound`] when the match has been
    /// removed, which callers delivering late replies treat as a silent drop.
    pub fn append_message(
        &mut self,
        match_id: MatchId,
        sender: SenderId,
        text: impl Into<String>,
        in_foreground: bool,
    ) -> Result<Message> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(StoreError::EmptyMessage);
        }

        let conversation = self
            .conversations
            .get_mut(&match_id)
            .ok_or(StoreError::MatchNotFound(match_id))?;

        // Clamp so the log stays non-decreasing even if the wall clock steps back.
        let mut timestamp = Utc::now();
        if let Some(last) = conversation.last() {
            timestamp = timestamp.max(last.timestamp);
        }

        let message = Message {
            id: MessageId::new(),
            match_id,
            sender,
            text,
            timestamp,
        };
        conversation.push(message.clone());

        let m = self.get_match_mut(match_id)?;
        m.last_message = Some(message.text.clone());
        m.updated_at = timestamp;
        if message.sender.is_session_user() {
            m.unread_count = 0;
        } else if !in_foreground {
            m.unread_count = m.unread_count.saturating_add(1);
        }

        debug!(
            match_id = %match_id,
            msg_id = %message.id,
            sender = %message.sender,
            unread = m.unread_count,
            "Message appended"
        );
        Ok(message)
    }

    /// The conversation as provider-neutral turns: `user` for the session
    /// user, `model` for the counterpart.
    pub fn history(&self, match_id: MatchId) -> Option<Vec<ChatTurn>> {
        let conversation = self.conversations.get(&match_id)?;
        Some(
            conversation
                .iter()
                .map(|m| {
                    let role = if m.sender.is_session_user() {
                        Role::User
                    } else {
                        Role::Model
                    };
                    ChatTurn::new(role, m.text.clone())
                })
                .collect(),
        )
    }

    /// Count one more outstanding responder call for a match.
    ///
    /// Returns `true` if the composing indicator turned on. Ignored for a
    /// removed match.
    pub fn begin_composing(&mut self, match_id: MatchId) -> bool {
        if !self.contains(match_id) {
            return false;
        }
        let outstanding = self.composing.entry(match_id).or_insert(0);
        *outstanding += 1;
        *outstanding == 1
    }

    /// Settle one outstanding responder call, whether it replied or failed.
    ///
    /// Returns `true` if that was the last one and the indicator turned off.
    pub fn end_composing(&mut self, match_id: MatchId) -> bool {
        match self.composing.get_mut(&match_id) {
            Some(outstanding) if *outstanding > 1 => {
                *outstanding -= 1;
                false
            }
            Some(_) => {
                self.composing.remove(&match_id);
                true
            }
            None => false,
        }
    }

    pub fn is_composing(&self, match_id: MatchId) -> bool {
        self.composing.contains_key(&match_id)
    }
}
