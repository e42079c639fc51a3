use super::DbExecutor;
use crate::async_message_handler_with_span;
use crate::error::{CoreError, CoreResult};
use crate::span::AsyncSpanHandler;
use actix::prelude::*;
use actix_interop::{with_ctx, FutureInterop};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::debug;
use tracing_futures::Instrument;

/// External chat identity, assigned by the messaging platform. Never minted
/// by the core.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct InternalUser {
    pub id: UserId,
    pub username: String,
    pub score: i32,
}

// Find user

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Option<InternalUser>>")]
pub struct UserById(pub UserId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<UserById> for DbExecutor {
        async fn handle(msg: UserById) -> CoreResult<Option<InternalUser>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let UserById(user_id) = msg;
            debug!(id = user_id.0, "Retrieving user by id");
            let user = sqlx::query_as::<_, InternalUser>(
                "SELECT id, username, score FROM users WHERE id = $1",
            )
            .bind(user_id.0)
            .fetch_optional(&pool)
            .await?;

            Ok(user)
        }
    }
});

// Create user

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<InternalUser>")]
pub struct InsertUser {
    pub id: UserId,
    pub username: String,
}

async_message_handler_with_span!({
    impl AsyncSpanHandler<InsertUser> for DbExecutor {
        async fn handle(msg: InsertUser) -> CoreResult<InternalUser> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            debug!(id = msg.id.0, "Inserting new user");
            // ON CONFLICT closes the race between the existence check in the
            // service layer and this insert.
            let user = sqlx::query_as::<_, InternalUser>(
                "INSERT INTO users (id, username, score) VALUES ($1, $2, 0) \
                 ON CONFLICT (id) DO NOTHING \
                 RETURNING id, username, score",
            )
            .bind(msg.id.0)
            .bind(msg.username)
            .fetch_optional(&pool)
            .await?;

            user.ok_or(CoreError::AlreadyRegistered)
        }
    }
});

// Ranking queries. Ordering is ascending by score with id as the stable tie
// breaker, everywhere, so rank and leaderboard never disagree.

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Vec<InternalUser>>")]
pub struct UsersByScore(pub i64);

async_message_handler_with_span!({
    impl AsyncSpanHandler<UsersByScore> for DbExecutor {
        async fn handle(msg: UsersByScore) -> CoreResult<Vec<InternalUser>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let UsersByScore(limit) = msg;
            debug!(limit, "Retrieving users ordered by score");
            let users = sqlx::query_as::<_, InternalUser>(
                "SELECT id, username, score FROM users ORDER BY score ASC, id ASC LIMIT $1",
            )
            .bind(limit)
            .fetch_all(&pool)
            .await?;

            Ok(users)
        }
    }
});

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Option<i64>>")]
pub struct UserRank(pub UserId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<UserRank> for DbExecutor {
        async fn handle(msg: UserRank) -> CoreResult<Option<i64>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let UserRank(user_id) = msg;
            debug!(id = user_id.0, "Computing user rank");
            let row = sqlx::query(
                "SELECT (SELECT COUNT(*) FROM users u2 \
                         WHERE (u2.score, u2.id) < (u.score, u.id)) + 1 AS rank \
                 FROM users u WHERE u.id = $1",
            )
            .bind(user_id.0)
            .fetch_optional(&pool)
            .await?;

            match row {
                Some(row) => {
                    let rank: i64 = row.try_get("rank")?;
                    Ok(Some(rank))
                }
                None => Ok(None),
            }
        }
    }
});

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Option<(i32, i64)>>")]
pub struct SubmissionStats(pub UserId);

async_message_handler_with_span!({
    impl AsyncSpanHandler<SubmissionStats> for DbExecutor {
        async fn handle(msg: SubmissionStats) -> CoreResult<Option<(i32, i64)>> {
            let pool = with_ctx(|a: &mut DbExecutor, _| a.pool());
            let SubmissionStats(user_id) = msg;
            debug!(id = user_id.0, "Retrieving submission stats");
            let row = sqlx::query(
                "SELECT u.score AS score, COUNT(j.id) AS jokes_submitted \
                 FROM users u LEFT JOIN jokes j ON j.author_id = u.id \
                 WHERE u.id = $1 \
                 GROUP BY u.id, u.score",
            )
            .bind(user_id.0)
            .fetch_optional(&pool)
            .await?;

            match row {
                Some(row) => {
                    let score: i32 = row.try_get("score")?;
                    let submitted: i64 = row.try_get("jokes_submitted")?;
                    Ok(Some((score, submitted)))
                }
                None => Ok(None),
            }
        }
    }
});
