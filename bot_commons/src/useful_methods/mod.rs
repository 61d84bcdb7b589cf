mod flood_retry;
pub use flood_retry::*;

#[cfg(any(test, feature = "test-utils"))]
mod scripted;
#[cfg(any(test, feature = "test-utils"))]
pub use scripted::*;

use futures::Future;
use teloxide::{requests::Requester, types::ChatId, Bot, RequestError};

/// Something that can deliver a plain text message into a chat.
///
/// This is the one thing the bots need from the Telegram client when
/// replying, pulled out so the reply logic can be driven without a network.
pub trait ReplySink {
    fn send_text(
        &self,
        to_where: ChatId,
        text: &str,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;
}

impl ReplySink for Bot {
    async fn send_text(&self, to_where: ChatId, text: &str) -> Result<(), RequestError> {
        self.send_message(to_where, text).await?;
        Ok(())
    }
}
