use crate::db::{
    self,
    user::{InternalUser, UserId},
    DbExecutor,
};
use crate::error::{CoreError, CoreResult};
use crate::span::{AsyncSpanHandler, SpanMessage};
use crate::{async_message_handler_with_span, validate};
use actix::prelude::*;
use actix_interop::FutureInterop;
use tracing::{debug, info};
use tracing_futures::Instrument;

// Messages

/// Resolve an external chat id to a registered user, or fail.
#[derive(Message, Clone)]
#[rtype(result = "CoreResult<InternalUser>")]
pub struct RequireUser(pub UserId);

#[derive(Message, Clone)]
#[rtype(result = "CoreResult<InternalUser>")]
pub struct IncomingRegister {
    pub id: UserId,
    pub username: String,
}

// Actor

#[derive(Default)]
pub struct UserService;

impl Actor for UserService {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("User service started");
    }
}

async_message_handler_with_span!({
    impl AsyncSpanHandler<RequireUser> for UserService {
        async fn handle(msg: RequireUser) -> CoreResult<InternalUser> {
            let RequireUser(user_id) = msg;
            debug!(id = user_id.0, "Resolving user");
            let user = DbExecutor::from_registry()
                .send(SpanMessage::new(db::user::UserById(user_id)))
                .await??;

            user.ok_or(CoreError::NotRegistered)
        }
    }
});

async_message_handler_with_span!({
    impl AsyncSpanHandler<IncomingRegister> for UserService {
        async fn handle(msg: IncomingRegister) -> CoreResult<InternalUser> {
            debug!(id = msg.id.0, "Handling registration");
            // Registration state is reported ahead of username problems, so
            // an already-registered user is never prompted to fix a name.
            let existing = DbExecutor::from_registry()
                .send(SpanMessage::new(db::user::UserById(msg.id)))
                .await??;
            if existing.is_some() {
                return Err(CoreError::AlreadyRegistered);
            }

            validate::username(&msg.username)?;

            let user = DbExecutor::from_registry()
                .send(SpanMessage::new(db::user::InsertUser {
                    id: msg.id,
                    username: msg.username,
                }))
                .await??;

            info!(id = user.id.0, "Registered new user");
            Ok(user)
        }
    }
});

impl SystemService for UserService {}
impl Supervised for UserService {}
