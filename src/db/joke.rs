use super::{user::UserId, DbExecutor};
use crate::async_message_handler_with_span;
use crate::error::CoreResult;
use crate::span::AsyncSpanHandler;
use actix::prelude::*;
use actix_interop::{with_ctx, FutureInterop};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::debug;
use tracing_futures::Instrument;

// Advisory lock key guarding joke id assignment. Ids are max + 1 rather than
// a sequence so deleted ids leave gaps and are never reused.
const JOKE_ID_LOCK: i64 = 0x6a6f6b65;

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct JokeId(pub i64);

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct InternalJoke {
    pub id: JokeId,
    pub body: String,
    pub vote_count: i32,
    pub author_id: UserId,
    pub approved: bool,
}

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Option<InternalJoke>>")]
pub struct JokeById(pub JokeId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<JokeById> for DbExecutor {
        async fn handle(msg: JokeById) -> CoreResult<Option<InternalJoke>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let JokeById(joke_id) = msg;
            debug!(id = joke_id.0, "Retrieving joke by id");
            let joke = sqlx::query_as::<_, InternalJoke>(
                "SELECT id, body, vote_count, author_id, approved FROM jokes WHERE id = $1",
            )
            .bind(joke_id.0)
            .fetch_optional(&pool)
            .await?;

            Ok(joke)
        }
    }
});

// Create joke

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<InternalJoke>")]
pub struct InsertJoke {
    pub author: UserId,
    pub body: String,
}

async_message_handler_with_span!({
    impl AsyncSpanHandler<InsertJoke> for DbExecutor {
        async fn handle(msg: InsertJoke) -> CoreResult<InternalJoke> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            debug!(author = msg.author.0, "Inserting new joke");
            let mut tx = pool.begin().await?;

            // The advisory lock serializes id assignment across concurrent
            // submissions; it is released with the transaction.
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(JOKE_ID_LOCK)
                .execute(&mut tx)
                .await?;

            let row = sqlx::query("SELECT COALESCE(MAX(id) + 1, 0) AS next_id FROM jokes")
                .fetch_one(&mut tx)
                .await?;
            let next_id: i64 = row.try_get("next_id")?;

            let joke = sqlx::query_as::<_, InternalJoke>(
                "INSERT INTO jokes (id, body, vote_count, author_id, approved) \
                 VALUES ($1, $2, 0, $3, FALSE) \
                 RETURNING id, body, vote_count, author_id, approved",
            )
            .bind(next_id)
            .bind(msg.body)
            .bind(msg.author.0)
            .fetch_one(&mut tx)
            .await?;

            tx.commit().await?;
            Ok(joke)
        }
    }
});

// Selection pools. Eligibility means: not authored by the requesting user
// and not yet voted on by them.

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Vec<InternalJoke>>")]
pub struct EligibleJokes(pub UserId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<EligibleJokes> for DbExecutor {
        async fn handle(msg: EligibleJokes) -> CoreResult<Vec<InternalJoke>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let EligibleJokes(user_id) = msg;
            debug!(user = user_id.0, "Retrieving eligible jokes");
            let jokes = sqlx::query_as::<_, InternalJoke>(
                "SELECT id, body, vote_count, author_id, approved FROM jokes j \
                 WHERE j.approved \
                   AND j.author_id <> $1 \
                   AND NOT EXISTS (SELECT 1 FROM votes v \
                                   WHERE v.joke_id = j.id AND v.user_id = $1)",
            )
            .bind(user_id.0)
            .fetch_all(&pool)
            .await?;

            Ok(jokes)
        }
    }
});

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Vec<InternalJoke>>")]
pub struct FavoriteJokes(pub UserId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<FavoriteJokes> for DbExecutor {
        async fn handle(msg: FavoriteJokes) -> CoreResult<Vec<InternalJoke>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let FavoriteJokes(user_id) = msg;
            debug!(user = user_id.0, "Retrieving favorite jokes");
            let jokes = sqlx::query_as::<_, InternalJoke>(
                "SELECT j.id, j.body, j.vote_count, j.author_id, j.approved \
                 FROM jokes j \
                 JOIN votes v ON v.joke_id = j.id \
                 WHERE v.user_id = $1 AND v.positive",
            )
            .bind(user_id.0)
            .fetch_all(&pool)
            .await?;

            Ok(jokes)
        }
    }
});

/// Lowest-vote-count unseen joke, pending ones included; ids are
/// insertion-ordered so `id ASC` settles ties deterministically.
#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Option<InternalJoke>>")]
pub struct NextByVoteCount(pub UserId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<NextByVoteCount> for DbExecutor {
        async fn handle(msg: NextByVoteCount) -> CoreResult<Option<InternalJoke>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let NextByVoteCount(user_id) = msg;
            debug!(user = user_id.0, "Retrieving next joke by vote count");
            let joke = sqlx::query_as::<_, InternalJoke>(
                "SELECT id, body, vote_count, author_id, approved FROM jokes j \
                 WHERE j.author_id <> $1 \
                   AND NOT EXISTS (SELECT 1 FROM votes v \
                                   WHERE v.joke_id = j.id AND v.user_id = $1) \
                 ORDER BY j.vote_count ASC, j.id ASC \
                 LIMIT 1",
            )
            .bind(user_id.0)
            .fetch_optional(&pool)
            .await?;

            Ok(joke)
        }
    }
});

// Moderation

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<()>")]
pub struct SetApproved(pub JokeId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<SetApproved> for DbExecutor {
        async fn handle(msg: SetApproved) -> CoreResult<()> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let SetApproved(joke_id) = msg;
            debug!(id = joke_id.0, "Approving joke");
            // Idempotent: re-approving an approved joke changes nothing.
            sqlx::query("UPDATE jokes SET approved = TRUE WHERE id = $1")
                .bind(joke_id.0)
                .execute(&pool)
                .await?;

            Ok(())
        }
    }
});

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<()>")]
pub struct DeleteJoke(pub JokeId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<DeleteJoke> for DbExecutor {
        async fn handle(msg: DeleteJoke) -> CoreResult<()> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let DeleteJoke(joke_id) = msg;
            debug!(id = joke_id.0, "Deleting joke");
            // Vote edges go with the row (ON DELETE CASCADE), which clears
            // the joke from every voter's seen and favorite sets. Scores are
            // history and stay untouched.
            sqlx::query("DELETE FROM jokes WHERE id = $1")
                .bind(joke_id.0)
                .execute(&pool)
                .await?;

            Ok(())
        }
    }
});
