use std::sync::Arc;

use client_logging::{client_debug, client_warn};
use msgboard_core::{classify, postable_content, AsyncCell, AsyncState, Message, Subscription};

use crate::transport::MessageApi;

/// Fallback greeting used when the health probe replies without a message.
const DEFAULT_GREETING: &str = "Hello world";

/// Reactive store for the message collection.
///
/// Constructed with its API handle (dependency injection) so each test gets
/// an isolated instance against a stub. Every operation follows the same
/// lifecycle: `begin` (loading on, error cleared), await the transport,
/// record the outcome, `settle` (loading off). The settle runs on every
/// non-panic exit path.
pub struct MessageStore {
    api: Arc<dyn MessageApi>,
    state: AsyncCell<Vec<Message>>,
}

impl MessageStore {
    pub fn new(api: Arc<dyn MessageApi>) -> Self {
        Self {
            api,
            state: AsyncCell::new(Vec::new()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AsyncState<Vec<Message>> {
        self.state.get()
    }

    pub fn subscribe(
        &self,
        observer: impl Fn(&AsyncState<Vec<Message>>) + Send + Sync + 'static,
    ) -> Subscription {
        self.state.subscribe(observer)
    }

    /// Number of messages currently held. Derived from the value, never
    /// tracked independently.
    pub fn count(&self) -> usize {
        self.state.get().value.len()
    }

    pub fn has_messages(&self) -> bool {
        self.count() > 0
    }

    /// Fetches the authoritative message list.
    ///
    /// Overlapping loads are not serialized: the response that resolves
    /// last wins, even when it answers an older trigger.
    pub async fn load(&self) {
        self.state.begin();
        match self.api.list_messages().await {
            Ok(messages) => {
                client_debug!("loaded {} messages", messages.len());
                self.state.resolve(messages);
            }
            Err(err) => {
                client_warn!("list messages failed: {err}");
                self.state.reject(classify(&err, "Load messages"));
            }
        }
        self.state.settle();
    }

    /// Posts a new message, then reloads the list on success.
    ///
    /// Input that is empty after trimming or over [`msgboard_core::CONTENT_LIMIT`]
    /// is a precondition rejection, not a failure: the transport is never
    /// contacted and the state is left untouched.
    pub async fn create(&self, input: &str) {
        let Some(content) = postable_content(input) else {
            return;
        };

        self.state.begin();
        let outcome = self.api.create_message(content).await;
        match &outcome {
            Ok(message) => client_debug!("created message id={}", message.id),
            Err(err) => {
                client_warn!("create message failed: {err}");
                self.state.reject(classify(err, "Post message"));
            }
        }
        self.state.settle();

        if outcome.is_ok() {
            // No optimistic append: the server owns the ordering.
            self.load().await;
        }
    }

    /// Deletes a message by id, then reloads the list on success.
    pub async fn remove(&self, id: u64) {
        self.state.begin();
        let outcome = self.api.delete_message(id).await;
        match &outcome {
            Ok(()) => client_debug!("deleted message id={id}"),
            Err(err) => {
                client_warn!("delete message failed: {err}");
                self.state.reject(classify(err, "Delete message"));
            }
        }
        self.state.settle();

        if outcome.is_ok() {
            self.load().await;
        }
    }
}

/// Simplified store for the `/hello` health probe value.
pub struct HelloStore {
    api: Arc<dyn MessageApi>,
    state: AsyncCell<String>,
}

impl HelloStore {
    pub fn new(api: Arc<dyn MessageApi>) -> Self {
        Self {
            api,
            state: AsyncCell::new(String::new()),
        }
    }

    pub fn state(&self) -> AsyncState<String> {
        self.state.get()
    }

    pub fn subscribe(
        &self,
        observer: impl Fn(&AsyncState<String>) + Send + Sync + 'static,
    ) -> Subscription {
        self.state.subscribe(observer)
    }

    pub async fn load(&self) {
        self.state.begin();
        match self.api.hello().await {
            Ok(hello) => {
                let greeting = hello
                    .message
                    .unwrap_or_else(|| DEFAULT_GREETING.to_string());
                self.state.resolve(greeting);
            }
            Err(err) => {
                client_warn!("health probe failed: {err}");
                self.state.reject(classify(&err, "Load greeting"));
            }
        }
        self.state.settle();
    }
}
