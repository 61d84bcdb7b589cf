use std::{collections::VecDeque, sync::Mutex};

use teloxide::{types::ChatId, RequestError};
use tokio::time::Instant;

use super::ReplySink;

/// One message a [`ScriptedSink`] was asked to send.
#[derive(Clone, Debug)]
pub struct SentText {
    pub to_where: ChatId,
    pub text: String,
    pub at: Instant,
}

/// In-memory [`ReplySink`] for tests. Records every send attempt and answers
/// them with queued results, or with `Ok(())` once the queue runs dry.
#[derive(Default)]
pub struct ScriptedSink {
    results: Mutex<VecDeque<Result<(), RequestError>>>,
    sent: Mutex<Vec<SentText>>,
}

impl ScriptedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue up the result of a future send attempt.
    pub fn push_result(&self, result: Result<(), RequestError>) {
        self.results.lock().unwrap().push_back(result);
    }

    pub fn sent(&self) -> Vec<SentText> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl ReplySink for ScriptedSink {
    async fn send_text(&self, to_where: ChatId, text: &str) -> Result<(), RequestError> {
        self.sent.lock().unwrap().push(SentText {
            to_where,
            text: text.to_string(),
            at: Instant::now(),
        });
        let result = self.results.lock().unwrap().pop_front();
        result.unwrap_or(Ok(()))
    }
}
