use crate::db::{joke::JokeId, user::UserId};
use std::collections::HashMap;

/// Per-conversation memory of the joke last shown to a user, so the vote
/// callback knows which joke it applies to. One entry per conversation, no
/// expiry; a vote or a cancellation consumes it.
#[derive(Default)]
pub struct ConversationManager {
    last_shown: HashMap<UserId, JokeId>,
}

impl ConversationManager {
    pub fn remember(&mut self, user: UserId, joke: JokeId) {
        self.last_shown.insert(user, joke);
    }

    /// Removes and returns the remembered joke. A second take returns `None`
    /// until another joke is shown.
    pub fn take(&mut self, user: UserId) -> Option<JokeId> {
        self.last_shown.remove(&user)
    }

    pub fn clear(&mut self, user: UserId) {
        self.last_shown.remove(&user);
    }
}
