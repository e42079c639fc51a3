use crate::db::{
    self,
    joke::JokeId,
    user::UserId,
    vote::InternalVote,
    DbExecutor,
};
use crate::async_message_handler_with_span;
use crate::error::CoreResult;
use crate::span::{AsyncSpanHandler, SpanMessage};
use actix::prelude::*;
use actix_interop::FutureInterop;
use tracing::{debug, info};
use tracing_futures::Instrument;

// Messages

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<InternalVote>")]
pub struct IncomingVote {
    pub voter: UserId,
    pub joke: JokeId,
    pub positive: bool,
}

// Actor

#[derive(Default)]
pub struct VoteService;

impl Actor for VoteService {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Vote service started");
    }
}

async_message_handler_with_span!({
    impl AsyncSpanHandler<IncomingVote> for VoteService {
        async fn handle(msg: IncomingVote) -> CoreResult<InternalVote> {
            debug!(voter = msg.voter.0, joke = msg.joke.0, "Handling incoming vote");
            let vote = DbExecutor::from_registry()
                .send(SpanMessage::new(db::vote::CastVote {
                    voter: msg.voter,
                    joke: msg.joke,
                    positive: msg.positive,
                }))
                .await??;

            info!(
                voter = vote.user_id.0,
                joke = vote.joke_id.0,
                positive = vote.positive,
                "Vote registered"
            );
            Ok(vote)
        }
    }
});

impl SystemService for VoteService {}
impl Supervised for VoteService {}
