use actix::prelude::*;
use tracing::Span;

/// Message wrapper carrying the sender's span so trace context follows a
/// request across actor mailboxes.
pub struct SpanMessage<I> {
    pub msg: I,
    pub span: Span,
}

impl<M> SpanMessage<M> {
    pub fn new(msg: M) -> Self {
        Self {
            msg,
            span: Span::current(),
        }
    }
}

impl<M, R: 'static> Message for SpanMessage<M>
where
    M: Message<Result = R>,
{
    type Result = R;
}

/// Async handler invoked inside the sender's span. Handlers are associated
/// functions; actor state is reached through `actix_interop::with_ctx`.
#[async_trait::async_trait]
pub trait AsyncSpanHandler<M>
where
    Self: Actor,
    M: Message,
{
    async fn handle(msg: M) -> <M as Message>::Result;
}

// Invoking modules must have `AsyncSpanHandler`, `actix_interop::FutureInterop`
// and `tracing_futures::Instrument` in scope.
#[macro_export]
macro_rules! span_message_async_impl {
    ($message_type:ident, $actor:ident) => {
        impl Handler<$crate::span::SpanMessage<$message_type>> for $actor {
            type Result = ResponseActFuture<Self, <$message_type as Message>::Result>;
            fn handle(
                &mut self,
                msg: $crate::span::SpanMessage<$message_type>,
                _ctx: &mut Context<Self>,
            ) -> Self::Result {
                let $crate::span::SpanMessage { span, msg } = msg;
                let _enter = span.enter();
                <Self as AsyncSpanHandler<$message_type>>::handle(msg)
                    .in_current_span()
                    .interop_actor_boxed(self)
            }
        }
    };
}

#[macro_export]
macro_rules! async_message_handler_with_span {
    ({ impl AsyncSpanHandler<$M:ident> for $A:ident $t:tt }) => {
        $crate::span_message_async_impl!($M, $A);
        #[async_trait::async_trait]
        impl AsyncSpanHandler<$M> for $A $t
    };
}
