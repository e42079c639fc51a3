use crate::db::DbExecutor;
use crate::services::{
    conversation::ConversationActor, joke::JokeService, ranking::RankingService,
    user::UserService, vote::VoteService,
};
use actix::prelude::*;
use actix::registry::SystemRegistry;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub fn register_db_actor(pool: PgPool) {
    SystemRegistry::set(DbExecutor(pool).start());
}

pub fn register_system_actors() {
    SystemRegistry::set(UserService::default().start());
    SystemRegistry::set(JokeService::default().start());
    SystemRegistry::set(VoteService::default().start());
    SystemRegistry::set(RankingService::default().start());
    SystemRegistry::set(ConversationActor::default().start());
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// The only HTTP surface the core exposes: a liveness probe for the
/// deployment. Chat transport lives in the dispatcher, not here.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").to(health));
}
