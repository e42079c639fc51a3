use crate::async_message_handler_with_span;
use crate::db::{self, user::UserId, DbExecutor};
use crate::error::{CoreError, CoreResult};
use crate::span::{AsyncSpanHandler, SpanMessage};
use actix::prelude::*;
use actix_interop::FutureInterop;
use serde::Serialize;
use tracing::{debug, info};
use tracing_futures::Instrument;

// Types

#[derive(Clone, Debug, Serialize)]
pub struct RankedUser {
    pub rank: i64,
    pub username: String,
    pub score: i32,
}

/// Everything the profile view shows about one user.
#[derive(Clone, Debug, Serialize)]
pub struct ProfileData {
    pub username: String,
    pub rank: i64,
    pub score: i32,
    pub jokes_submitted: i64,
    pub average_score: f64,
}

// Messages

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<i64>")]
pub struct RankOf(pub UserId);

/// First `n` users ordered ascending by score. The ordering is kept exactly
/// as the bot always computed it, even though it reads like a leaderboard
/// and almost certainly should be descending.
#[derive(Message, Clone)]
#[rtype(result = "CoreResult<Vec<RankedUser>>")]
pub struct TopUsers(pub i64);

/// Submitted-count divided by score (zero when score is zero). Kept with the
/// historical operand order; flag before "fixing".
#[derive(Message, Clone)]
#[rtype(result = "CoreResult<f64>")]
pub struct AverageScore(pub UserId);

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<ProfileData>")]
pub struct Profile(pub UserId);

// Actor

#[derive(Default)]
pub struct RankingService;

impl Actor for RankingService {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Ranking service started");
    }
}

fn average(score: i32, jokes_submitted: i64) -> f64 {
    if score == 0 {
        0.0
    } else {
        jokes_submitted as f64 / f64::from(score)
    }
}

async_message_handler_with_span!({
    impl AsyncSpanHandler<RankOf> for RankingService {
        async fn handle(msg: RankOf) -> CoreResult<i64> {
            let RankOf(user_id) = msg;
            debug!(id = user_id.0, "Handling rank request");
            let rank = DbExecutor::from_registry()
                .send(SpanMessage::new(db::user::UserRank(user_id)))
                .await??;

            rank.ok_or(CoreError::NotRegistered)
        }
    }
});

async_message_handler_with_span!({
    impl AsyncSpanHandler<TopUsers> for RankingService {
        async fn handle(msg: TopUsers) -> CoreResult<Vec<RankedUser>> {
            let TopUsers(limit) = msg;
            debug!(limit, "Handling leaderboard request");
            let users = DbExecutor::from_registry()
                .send(SpanMessage::new(db::user::UsersByScore(limit)))
                .await??;

            let ranked = users
                .into_iter()
                .enumerate()
                .map(|(index, user)| RankedUser {
                    rank: index as i64 + 1,
                    username: user.username,
                    score: user.score,
                })
                .collect();
            Ok(ranked)
        }
    }
});

async_message_handler_with_span!({
    impl AsyncSpanHandler<AverageScore> for RankingService {
        async fn handle(msg: AverageScore) -> CoreResult<f64> {
            let AverageScore(user_id) = msg;
            debug!(id = user_id.0, "Handling average score request");
            let stats = DbExecutor::from_registry()
                .send(SpanMessage::new(db::user::SubmissionStats(user_id)))
                .await??;

            let (score, jokes_submitted) = stats.ok_or(CoreError::NotRegistered)?;
            Ok(average(score, jokes_submitted))
        }
    }
});

async_message_handler_with_span!({
    impl AsyncSpanHandler<Profile> for RankingService {
        async fn handle(msg: Profile) -> CoreResult<ProfileData> {
            let Profile(user_id) = msg;
            debug!(id = user_id.0, "Handling profile request");
            let (user, rank, stats) = futures::try_join!(
                DbExecutor::from_registry().send(SpanMessage::new(db::user::UserById(user_id))),
                DbExecutor::from_registry().send(SpanMessage::new(db::user::UserRank(user_id))),
                DbExecutor::from_registry()
                    .send(SpanMessage::new(db::user::SubmissionStats(user_id))),
            )?;

            let user = user?.ok_or(CoreError::NotRegistered)?;
            let rank = rank?.ok_or(CoreError::NotRegistered)?;
            let (score, jokes_submitted) = stats?.ok_or(CoreError::NotRegistered)?;

            Ok(ProfileData {
                username: user.username,
                rank,
                score,
                jokes_submitted,
                average_score: average(score, jokes_submitted),
            })
        }
    }
});

impl SystemService for RankingService {}
impl Supervised for RankingService {}
