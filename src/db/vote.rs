use super::{joke::JokeId, user::UserId, DbExecutor};
use crate::async_message_handler_with_span;
use crate::error::{CoreError, CoreResult};
use crate::span::AsyncSpanHandler;
use actix::prelude::*;
use actix_interop::{with_ctx, FutureInterop};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::debug;
use tracing_futures::Instrument;

/// One voter/joke edge. Append-only; polarity never changes once cast.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct InternalVote {
    pub user_id: UserId,
    pub joke_id: JokeId,
    pub positive: bool,
}

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<InternalVote>")]
pub struct CastVote {
    pub voter: UserId,
    pub joke: JokeId,
    pub positive: bool,
}

async_message_handler_with_span!({
    impl AsyncSpanHandler<CastVote> for DbExecutor {
        async fn handle(msg: CastVote) -> CoreResult<InternalVote> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let CastVote { voter, joke, positive } = msg;
            debug!(voter = voter.0, joke = joke.0, positive, "Casting vote");
            let delta: i32 = if positive { 1 } else { -1 };

            let mut tx = pool.begin().await?;

            // The row lock serializes concurrent votes on the same joke, so
            // the duplicate check below always sees committed votes.
            let row = sqlx::query("SELECT author_id FROM jokes WHERE id = $1 FOR UPDATE")
                .bind(joke.0)
                .fetch_one(&mut tx)
                .await?;
            let author_id: i64 = row.try_get("author_id")?;
            if author_id == voter.0 {
                return Err(CoreError::SelfVote);
            }

            let existing = sqlx::query("SELECT 1 FROM votes WHERE user_id = $1 AND joke_id = $2")
                .bind(voter.0)
                .bind(joke.0)
                .fetch_optional(&mut tx)
                .await?;
            if existing.is_some() {
                return Err(CoreError::DuplicateVote);
            }

            // All three mutations commit together or not at all.
            sqlx::query("INSERT INTO votes (user_id, joke_id, positive) VALUES ($1, $2, $3)")
                .bind(voter.0)
                .bind(joke.0)
                .bind(positive)
                .execute(&mut tx)
                .await?;
            sqlx::query("UPDATE users SET score = score + $2 WHERE id = $1")
                .bind(voter.0)
                .bind(delta)
                .execute(&mut tx)
                .await?;
            sqlx::query("UPDATE jokes SET vote_count = vote_count + $2 WHERE id = $1")
                .bind(joke.0)
                .bind(delta)
                .execute(&mut tx)
                .await?;

            tx.commit().await?;
            Ok(InternalVote {
                user_id: voter,
                joke_id: joke,
                positive,
            })
        }
    }
});
