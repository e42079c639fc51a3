use crate::db::{
    self,
    joke::{InternalJoke, JokeId},
    user::UserId,
    DbExecutor,
};
use crate::error::CoreResult;
use crate::span::{AsyncSpanHandler, SpanMessage};
use crate::{async_message_handler_with_span, validate};
use actix::prelude::*;
use actix_interop::FutureInterop;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_futures::Instrument;

// Types

/// Which jokes a selection draws from.
///
/// `Random` and `Best` exclude jokes the user authored or already voted on;
/// `Favorites` replays the user's own positive votes, so it does not.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub enum SelectionPool {
    /// Approved jokes, uniform random pick.
    Random,
    /// Jokes the user voted for positively, uniform random pick.
    Favorites,
    /// Lowest vote count first, pending jokes included (approval queue).
    Best,
}

// Messages

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<InternalJoke>")]
pub struct IncomingJokeSubmission {
    pub author: UserId,
    pub body: String,
}

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Option<InternalJoke>>")]
pub struct NextJoke {
    pub user: UserId,
    pub pool: SelectionPool,
}

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<()>")]
pub struct Approve(pub JokeId);

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<()>")]
pub struct Remove(pub JokeId);

// Actor

#[derive(Default)]
pub struct JokeService;

impl Actor for JokeService {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Joke service started");
    }
}

async_message_handler_with_span!({
    impl AsyncSpanHandler<IncomingJokeSubmission> for JokeService {
        async fn handle(msg: IncomingJokeSubmission) -> CoreResult<InternalJoke> {
            debug!(author = msg.author.0, "Handling joke submission");
            validate::joke_body(&msg.body)?;

            let joke = DbExecutor::from_registry()
                .send(SpanMessage::new(db::joke::InsertJoke {
                    author: msg.author,
                    body: msg.body,
                }))
                .await??;

            info!(id = joke.id.0, "New joke submitted");
            Ok(joke)
        }
    }
});

async_message_handler_with_span!({
    impl AsyncSpanHandler<NextJoke> for JokeService {
        async fn handle(msg: NextJoke) -> CoreResult<Option<InternalJoke>> {
            let NextJoke { user, pool } = msg;
            debug!(user = user.0, ?pool, "Selecting joke");
            let joke = match pool {
                SelectionPool::Random => {
                    let mut eligible = DbExecutor::from_registry()
                        .send(SpanMessage::new(db::joke::EligibleJokes(user)))
                        .await??;
                    // Shuffle the whole eligible set and take the head, so
                    // every eligible joke is equally likely.
                    let mut rng = rand::thread_rng();
                    eligible.shuffle(&mut rng);
                    eligible.into_iter().next()
                }
                SelectionPool::Favorites => {
                    let favorites = DbExecutor::from_registry()
                        .send(SpanMessage::new(db::joke::FavoriteJokes(user)))
                        .await??;
                    let mut rng = rand::thread_rng();
                    favorites.choose(&mut rng).cloned()
                }
                SelectionPool::Best => {
                    DbExecutor::from_registry()
                        .send(SpanMessage::new(db::joke::NextByVoteCount(user)))
                        .await??
                }
            };

            // An empty pool means "no new jokes", not a failure.
            Ok(joke)
        }
    }
});

async_message_handler_with_span!({
    impl AsyncSpanHandler<Approve> for JokeService {
        async fn handle(msg: Approve) -> CoreResult<()> {
            let Approve(joke_id) = msg;
            DbExecutor::from_registry()
                .send(SpanMessage::new(db::joke::SetApproved(joke_id)))
                .await??;

            info!(id = joke_id.0, "Joke approved");
            Ok(())
        }
    }
});

async_message_handler_with_span!({
    impl AsyncSpanHandler<Remove> for JokeService {
        async fn handle(msg: Remove) -> CoreResult<()> {
            let Remove(joke_id) = msg;
            DbExecutor::from_registry()
                .send(SpanMessage::new(db::joke::DeleteJoke(joke_id)))
                .await??;

            info!(id = joke_id.0, "Joke removed");
            Ok(())
        }
    }
});

impl SystemService for JokeService {}
impl Supervised for JokeService {}
