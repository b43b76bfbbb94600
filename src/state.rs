//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It owns the tutorial store (ordered records plus the selection pointer)
//! and the LLM client. The store is mutated only through its operations;
//! handlers and the generation task take the lock briefly and never hold it
//! across a network call.
//!
//! Records are reconciled by id, not by list position, so a settlement always
//! lands on the record it was started for.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use time::{OffsetDateTime, UtcOffset};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::llm::LlmChat;

// =============================================================================
// TUTORIAL RECORD
// =============================================================================

/// Generation outcome of a tutorial. Exactly one holds at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorialStatus {
    Pending,
    Ready { content: String },
    Failed { error: String },
}

/// One user-requested topic and its generation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tutorial {
    pub id: Uuid,
    pub topic: String,
    /// Creation time, formatted for display (`10/18/2026, 3:04:05 PM`).
    pub timestamp: String,
    pub status: TutorialStatus,
}

impl Tutorial {
    fn pending(topic: String, offset: UtcOffset) -> Self {
        let created = OffsetDateTime::now_utc().to_offset(offset);
        Self { id: Uuid::new_v4(), topic, timestamp: format_timestamp(created), status: TutorialStatus::Pending }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == TutorialStatus::Pending
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.status {
            TutorialStatus::Ready { content } => Some(content),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            TutorialStatus::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Wire shape of a record: flat optional fields plus `isLoading`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TutorialView<'a> {
    id: Uuid,
    topic: &'a str,
    timestamp: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    is_loading: bool,
}

impl Serialize for Tutorial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TutorialView {
            id: self.id,
            topic: &self.topic,
            timestamp: &self.timestamp,
            content: self.content(),
            error: self.error(),
            is_loading: self.is_loading(),
        }
        .serialize(serializer)
    }
}

pub(crate) fn format_timestamp(at: OffsetDateTime) -> String {
    let format = time::macros::format_description!(
        "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
    );
    at.format(format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

// =============================================================================
// TUTORIAL STORE
// =============================================================================

/// Reasons a submission is ignored. The store is unchanged in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("a tutorial is already being generated")]
    InFlight,
}

impl ErrorCode for SubmitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTopic => "E_EMPTY_TOPIC",
            Self::InFlight => "E_GENERATION_IN_FLIGHT",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}

/// Ordered tutorial records (newest first) and the selection pointer.
///
/// Timestamps are rendered in `offset`, which the caller resolves up front:
/// the local offset cannot be read safely once the runtime has spawned
/// worker threads.
#[derive(Debug)]
pub struct TutorialStore {
    tutorials: Vec<Tutorial>,
    selected: Option<Uuid>,
    offset: UtcOffset,
}

impl Default for TutorialStore {
    fn default() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }
}

impl TutorialStore {
    /// A store stamping records in UTC.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { tutorials: Vec::new(), selected: None, offset }
    }

    /// Prepend a pending record for `topic` and return its id.
    ///
    /// # Errors
    ///
    /// Rejects blank topics and any submission while another is pending.
    pub fn submit(&mut self, topic: &str) -> Result<Uuid, SubmitError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SubmitError::EmptyTopic);
        }
        if self.is_busy() {
            return Err(SubmitError::InFlight);
        }
        let tutorial = Tutorial::pending(topic.to_owned(), self.offset);
        let id = tutorial.id;
        self.tutorials.insert(0, tutorial);
        Ok(id)
    }

    /// Settle pending record `id` with generated markdown and select it.
    ///
    /// Returns `false` if `id` is unknown or already settled.
    pub fn on_success(&mut self, id: Uuid, content: String) -> bool {
        self.settle(id, TutorialStatus::Ready { content })
    }

    /// Settle pending record `id` with an error message and select it.
    ///
    /// Returns `false` if `id` is unknown or already settled.
    pub fn on_failure(&mut self, id: Uuid, error: String) -> bool {
        self.settle(id, TutorialStatus::Failed { error })
    }

    fn settle(&mut self, id: Uuid, status: TutorialStatus) -> bool {
        let Some(tutorial) = self
            .tutorials
            .iter_mut()
            .find(|t| t.id == id && t.is_loading())
        else {
            return false;
        };
        tutorial.status = status;
        self.selected = Some(id);
        true
    }

    /// Point the selection at an existing record. The list is untouched.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    #[must_use]
    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Tutorial> {
        self.tutorials.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Tutorial> {
        self.selected.and_then(|id| self.get(id))
    }

    /// `true` while a submission is waiting on the generator.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.tutorials.iter().any(Tutorial::is_loading)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tutorials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tutorials.is_empty()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub tutorials: Arc<RwLock<TutorialStore>>,
    pub llm: Arc<dyn LlmChat>,
}

impl AppState {
    /// `offset` is the zone record timestamps are displayed in.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, offset: UtcOffset) -> Self {
        Self { tutorials: Arc::new(RwLock::new(TutorialStore::with_offset(offset))), llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::sync::Notify;

    use crate::llm::types::{ChatParams, ChatResponse, LlmError, Message};

    /// One recorded call to [`MockLlm::chat`].
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub params: ChatParams,
        pub system: String,
        pub messages: Vec<Message>,
    }

    /// Scripted `LlmChat` double. Replies are consumed in order; once empty
    /// it answers with a short markdown text.
    pub struct MockLlm {
        replies: Mutex<VecDeque<Result<ChatResponse, LlmError>>>,
        calls: Mutex<Vec<RecordedCall>>,
        gate: Option<Arc<Notify>>,
    }

    impl MockLlm {
        #[must_use]
        pub fn new(replies: Vec<Result<ChatResponse, LlmError>>) -> Self {
            Self { replies: Mutex::new(replies.into()), calls: Mutex::new(Vec::new()), gate: None }
        }

        /// A mock that waits on `gate` before answering.
        #[must_use]
        pub fn gated(replies: Vec<Result<ChatResponse, LlmError>>, gate: Arc<Notify>) -> Self {
            Self { gate: Some(gate), ..Self::new(replies) }
        }

        #[must_use]
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl LlmChat for MockLlm {
        async fn chat(
            &self,
            params: ChatParams,
            system: &str,
            messages: &[Message],
        ) -> Result<ChatResponse, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push(RecordedCall { params, system: system.to_owned(), messages: messages.to_vec() });
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let next = self.replies.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(text_response("# Mock\n\ndone")))
        }
    }

    /// Build a successful chat response carrying `text`.
    #[must_use]
    pub fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            content: Some(text.to_owned()),
            model: "mock".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 0,
            output_tokens: 0,
        }
    }

    /// Build a response with no content.
    #[must_use]
    pub fn empty_response() -> ChatResponse {
        ChatResponse { content: None, ..text_response("") }
    }

    /// Build a provider rate-limit error.
    #[must_use]
    pub fn rate_limit_error() -> LlmError {
        LlmError::ApiResponse {
            status: 429,
            body: serde_json::json!({ "error": { "message": "Rate limit reached for requests" } }).to_string(),
        }
    }

    /// Create a test `AppState` backed by `llm`.
    #[must_use]
    pub fn test_app_state_with_llm(llm: Arc<dyn LlmChat>) -> AppState {
        AppState::new(llm, UtcOffset::UTC)
    }

    /// Create a test `AppState` whose mock answers with default text.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(Arc::new(MockLlm::new(Vec::new())), UtcOffset::UTC)
    }

    /// Wait until no record is pending. Panics after two seconds.
    pub async fn wait_until_settled(state: &AppState) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while state.tutorials.read().await.is_busy() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("generation did not settle");
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
