use std::{any::Any, future::Future, panic::AssertUnwindSafe, sync::Arc};

use bot_commons::useful_methods::{send_text_with_flood_retry, ReplySink};
use futures::{future::BoxFuture, FutureExt};
use teloxide::{
    dispatching::UpdateHandler, error_handlers::ErrorHandler, prelude::*, types::MessageId,
    RequestError,
};

use crate::{MessageShape, SALE_MESSAGE};

async fn send_sale_message<S: ReplySink>(sink: &S, chat: ChatId) -> Result<(), RequestError> {
    send_text_with_flood_retry(sink, chat, SALE_MESSAGE).await
}

/// Someone opened the bot with `/start`.
pub async fn handle_start<S: ReplySink>(sink: &S, chat: ChatId) -> Result<(), RequestError> {
    send_sale_message(sink, chat).await
}

/// Any command that isn't `/start`.
pub async fn handle_other_command<S: ReplySink>(
    sink: &S,
    chat: ChatId,
) -> Result<(), RequestError> {
    send_sale_message(sink, chat).await
}

pub async fn handle_plain_text<S: ReplySink>(sink: &S, chat: ChatId) -> Result<(), RequestError> {
    send_sale_message(sink, chat).await
}

/// Answer a message with text `text` that came from chat `chat`.
///
/// Returns the shape of the message if it got an answer, or `None` if
/// there was nothing to answer to.
pub async fn respond<S: ReplySink>(
    sink: &S,
    chat: ChatId,
    text: Option<&str>,
) -> Result<Option<MessageShape>, RequestError> {
    let Some(shape) = MessageShape::of(text) else {
        return Ok(None);
    };

    match shape {
        MessageShape::StartCommand => handle_start(sink, chat).await?,
        MessageShape::OtherCommand => handle_other_command(sink, chat).await?,
        MessageShape::PlainText => handle_plain_text(sink, chat).await?,
    }

    Ok(Some(shape))
}

/// What went wrong while replying.
#[derive(Debug)]
pub enum ReplyFault {
    Request(RequestError),
    /// The handler panicked, with this message.
    Panic(String),
}

/// A message the bot wanted to reply to, but couldn't.
#[derive(Debug)]
pub struct ReplyFailed {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub fault: ReplyFault,
}

impl std::fmt::Display for ReplyFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to reply to message {} in chat {}: ",
            self.message_id.0, self.chat_id.0
        )?;
        match &self.fault {
            ReplyFault::Request(e) => write!(f, "{e}"),
            ReplyFault::Panic(e) => write!(f, "handler panicked: {e}"),
        }
    }
}

impl std::error::Error for ReplyFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.fault {
            ReplyFault::Request(e) => Some(e),
            ReplyFault::Panic(_) => None,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("<non-string panic payload>")
    }
}

/// Run the reply to one message, turning both errors and panics into
/// a [`ReplyFailed`] that says which message it was about.
async fn guard_reply(
    chat_id: ChatId,
    message_id: MessageId,
    reply: impl Future<Output = Result<Option<MessageShape>, RequestError>>,
) -> Result<(), ReplyFailed> {
    let fault = match AssertUnwindSafe(reply).catch_unwind().await {
        Ok(Ok(Some(shape))) => {
            let answered = if shape.is_command() { "command" } else { "message" };
            log::debug!(
                "Answered a {answered} in chat {} with the sale message ({shape})",
                chat_id.0
            );
            return Ok(());
        }
        Ok(Ok(None)) => return Ok(()),
        Ok(Err(e)) => ReplyFault::Request(e),
        Err(payload) => ReplyFault::Panic(panic_message(&*payload)),
    };

    Err(ReplyFailed {
        chat_id,
        message_id,
        fault,
    })
}

pub async fn handle_message_new_or_edit(bot: Bot, message: Message) -> Result<(), ReplyFailed> {
    let chat_id = message.chat.id;
    guard_reply(chat_id, message.id, respond(&bot, chat_id, message.text())).await
}

/// The update handler tree. Only new and edited messages get through to
/// the replying code; everything else falls off the end.
pub fn handler_tree() -> UpdateHandler<ReplyFailed> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message_new_or_edit))
        .branch(Update::filter_edited_message().endpoint(handle_message_new_or_edit))
}

/// Writes every failed reply into the log, so the dispatcher can carry on.
pub struct ReplyFailureLogger;

impl ErrorHandler<ReplyFailed> for ReplyFailureLogger {
    fn handle_error(self: Arc<Self>, error: ReplyFailed) -> BoxFuture<'static, ()> {
        log::error!("{error}");
        Box::pin(async {})
    }
}
