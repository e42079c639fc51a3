use crate::db::{joke::JokeId, user::UserId};
use crate::managers::conversation::ConversationManager;
use actix::prelude::*;
use tracing::{debug, info};

// Messages

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct RememberJoke {
    pub user: UserId,
    pub joke: JokeId,
}

/// Consume the last joke shown in this conversation, if any. The vote
/// callback hands the result to `VoteService`.
#[derive(Message, Clone)]
#[rtype(result = "Option<JokeId>")]
pub struct TakeJoke(pub UserId);

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct ClearConversation(pub UserId);

// Actor

#[derive(Default)]
pub struct ConversationActor {
    manager: ConversationManager,
}

impl Actor for ConversationActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Conversation actor started");
    }
}

impl Handler<RememberJoke> for ConversationActor {
    type Result = ();

    fn handle(&mut self, msg: RememberJoke, _ctx: &mut Context<Self>) -> Self::Result {
        debug!(user = msg.user.0, joke = msg.joke.0, "Remembering last shown joke");
        self.manager.remember(msg.user, msg.joke);
    }
}

impl Handler<TakeJoke> for ConversationActor {
    type Result = MessageResult<TakeJoke>;

    fn handle(&mut self, msg: TakeJoke, _ctx: &mut Context<Self>) -> Self::Result {
        let TakeJoke(user) = msg;
        debug!(user = user.0, "Taking last shown joke");
        MessageResult(self.manager.take(user))
    }
}

impl Handler<ClearConversation> for ConversationActor {
    type Result = ();

    fn handle(&mut self, msg: ClearConversation, _ctx: &mut Context<Self>) -> Self::Result {
        let ClearConversation(user) = msg;
        debug!(user = user.0, "Clearing conversation");
        self.manager.clear(user);
    }
}

impl SystemService for ConversationActor {}
impl Supervised for ConversationActor {}
