//! Tutorial service: submission → background generation → settlement.
//!
//! DESIGN
//! ======
//! `submit` records a pending tutorial under the store lock, releases it,
//! and spawns the generation on the runtime. `run_generation` awaits the
//! LLM without holding the lock and then settles the record by id. Errors
//! stop here: they become the record's error text and are logged.

use tracing::{info, warn};
use uuid::Uuid;

use super::generation;
use crate::error::ErrorCode;
use crate::state::{AppState, SubmitError, Tutorial};

/// Record a pending tutorial for `topic` and start generating it.
///
/// Returns a snapshot of the pending record.
///
/// # Errors
///
/// Returns [`SubmitError`] for a blank topic or while another generation is
/// in flight; the store is left unchanged.
pub async fn submit(state: &AppState, topic: &str) -> Result<Tutorial, SubmitError> {
    let (tutorial, total) = {
        let mut store = state.tutorials.write().await;
        store.submit(topic)?;
        // A successful submit always prepends.
        (store.tutorials()[0].clone(), store.len())
    };
    info!(id = %tutorial.id, topic = %tutorial.topic, total, "tutorial: submitted");

    let task_state = state.clone();
    let (id, topic) = (tutorial.id, tutorial.topic.clone());
    tokio::spawn(async move {
        run_generation(&task_state, id, &topic).await;
    });

    Ok(tutorial)
}

/// Generate the tutorial for record `id` and settle it.
pub async fn run_generation(state: &AppState, id: Uuid, topic: &str) {
    let outcome = generation::generate_tutorial(state.llm.as_ref(), topic).await;

    let mut store = state.tutorials.write().await;
    let applied = match outcome {
        Ok(content) => {
            info!(%id, content_len = content.len(), "tutorial: generated");
            store.on_success(id, content)
        }
        Err(e) => {
            warn!(%id, code = e.error_code(), retryable = e.retryable(), error = %e, "tutorial: generation failed");
            store.on_failure(id, e.to_string())
        }
    };
    if !applied {
        warn!(%id, "tutorial: record was not pending at settlement");
    }
}

#[cfg(test)]
#[path = "tutorial_test.rs"]
mod tests;
