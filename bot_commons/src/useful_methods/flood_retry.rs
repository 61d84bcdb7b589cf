use teloxide::{types::ChatId, RequestError};

use super::ReplySink;

/// Send a message, and if Telegram tells us to slow down, wait exactly as
/// long as it asks and try one more time.
///
/// Only a flood wait gets a second attempt. Whatever the second attempt
/// returns is returned as is, and any other error from the first attempt
/// is returned right away.
pub async fn send_text_with_flood_retry<S: ReplySink>(
    sink: &S,
    to_where: ChatId,
    text: &str,
) -> Result<(), RequestError> {
    match sink.send_text(to_where, text).await {
        Err(RequestError::RetryAfter(wait)) => {
            log::warn!(
                "Rate limit exceeded in chat {}, retrying after {} seconds",
                to_where.0,
                wait.seconds()
            );
            tokio::time::sleep(wait.duration()).await;
            sink.send_text(to_where, text).await
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use teloxide::{types::Seconds, ApiError};
    use tokio::time::Instant;

    use super::*;
    use crate::useful_methods::ScriptedSink;

    const CHAT: ChatId = ChatId(1234);

    fn flood(secs: u32) -> RequestError {
        RequestError::RetryAfter(Seconds::from_seconds(secs))
    }

    #[tokio::test(start_paused = true)]
    async fn plain_success_sends_once() {
        let sink = ScriptedSink::new();
        let start = Instant::now();

        send_text_with_flood_retry(&sink, CHAT, "hi").await.unwrap();

        assert_eq!(sink.sent_count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn flood_wait_then_one_retry() {
        let sink = ScriptedSink::new();
        sink.push_result(Err(flood(3)));
        let start = Instant::now();

        send_text_with_flood_retry(&sink, CHAT, "hi").await.unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].at, start);
        let waited = sent[1].at - sent[0].at;
        assert!(waited >= Duration::from_secs(3), "{waited:?}");
        assert!(waited < Duration::from_secs(4), "{waited:?}");
        assert!(sent.iter().all(|s| s.to_where == CHAT && s.text == "hi"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_retry_is_returned_without_a_third_try() {
        let sink = ScriptedSink::new();
        sink.push_result(Err(flood(3)));
        sink.push_result(Err(flood(5)));

        let result = send_text_with_flood_retry(&sink, CHAT, "hi").await;

        assert!(matches!(result, Err(RequestError::RetryAfter(s)) if s.seconds() == 5));
        assert_eq!(sink.sent_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn other_errors_are_not_retried() {
        let sink = ScriptedSink::new();
        sink.push_result(Err(RequestError::Api(ApiError::BotBlocked)));
        let start = Instant::now();

        let result = send_text_with_flood_retry(&sink, CHAT, "hi").await;

        assert!(matches!(result, Err(RequestError::Api(ApiError::BotBlocked))));
        assert_eq!(sink.sent_count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_does_not_block_other_chats() {
        let sink = ScriptedSink::new();
        sink.push_result(Err(flood(10)));
        let start = Instant::now();

        let (slow, fast) = tokio::join!(
            send_text_with_flood_retry(&sink, ChatId(1), "slow"),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                send_text_with_flood_retry(&sink, ChatId(2), "fast").await
            }
        );
        slow.unwrap();
        fast.unwrap();

        let sent = sink.sent();
        let fast_sent = sent.iter().find(|s| s.to_where == ChatId(2)).unwrap();
        assert!(fast_sent.at - start < Duration::from_secs(10));
        assert_eq!(sent.last().unwrap().to_where, ChatId(1));
    }
}
