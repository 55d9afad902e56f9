use std::sync::Arc;

use dictionary::DictionaryApi;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::message::{LookupOutcome, Message};
use crate::state::RequestId;

/// Runs lookups off the main task and reports each outcome as a
/// [`Message::LookupFinished`]. Starting a lookup aborts the previous one.
pub struct FetchCoordinator {
    api: Arc<dyn DictionaryApi>,
    messages: UnboundedSender<Message>,
    in_flight: Option<(RequestId, JoinHandle<()>)>,
}

impl FetchCoordinator {
    pub fn new(api: Arc<dyn DictionaryApi>, messages: UnboundedSender<Message>) -> Self {
        Self {
            api,
            messages,
            in_flight: None,
        }
    }

    pub fn start(&mut self, id: RequestId, word: String) {
        self.cancel();

        let api = Arc::clone(&self.api);
        let messages = self.messages.clone();
        let handle = tokio::spawn(async move {
            let outcome = LookupOutcome::from(api.lookup(&word).await);
            if messages
                .send(Message::LookupFinished { id, outcome })
                .is_err()
            {
                tracing::debug!(%id, "widget closed before the lookup finished");
            }
        });
        self.in_flight = Some((id, handle));
    }

    pub fn cancel(&mut self) {
        if let Some((id, handle)) = self.in_flight.take() {
            if !handle.is_finished() {
                tracing::debug!(%id, "aborting in-flight lookup");
                handle.abort();
            }
        }
    }
}

impl Drop for FetchCoordinator {
    fn drop(&mut self) {
        self.cancel();
    }
}
