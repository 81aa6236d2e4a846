//! Handoff store accessor.
//!
//! An upstream analysis step leaves two strings in a key/value store: the JSON
//! review result under [`REVIEW_RESULT_KEY`] and the submitted source under
//! [`ORIGINAL_CODE_KEY`]. This module reads them exactly once into a typed
//! [`ReviewSession`] that the view then owns. Nothing here writes back.

use std::collections::HashMap;

use crate::error::LoadError;
use crate::model::ReviewResult;

/// Slot holding the JSON review result.
pub const REVIEW_RESULT_KEY: &str = "codeReviewResult";
/// Slot holding the code as originally submitted.
pub const ORIGINAL_CODE_KEY: &str = "originalCode";

/// Read access to a key/value handoff store.
pub trait HandoffStore {
    /// Returns the value stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> Option<String>;
}

/// Handoff store held entirely in memory.
///
/// The host fills one from files given on the command line, and the SQLite
/// backend snapshots its slots into one (see [`crate::db::snapshot`]).
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.slots.insert(key.into(), value.into())
    }

    /// Builder form of [`MemoryStore::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl HandoffStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }
}

/// Everything one mounted report needs: the parsed result and the original code.
///
/// Created once at view entry and dropped when the view is left.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    pub result: ReviewResult,
    /// Empty when the producer did not leave the original source.
    pub original_code: String,
}

/// Reads and parses the handoff payload.
///
/// # Errors
///
/// [`LoadError::NotFound`] when the review slot is empty, [`LoadError::Parse`]
/// when it does not hold a valid review result. A missing original-code slot
/// is not an error; the session gets an empty string.
pub fn load<S>(store: &S) -> Result<ReviewSession, LoadError>
where
    S: HandoffStore + ?Sized,
{
    let raw = store
        .get(REVIEW_RESULT_KEY)
        .ok_or(LoadError::NotFound { key: REVIEW_RESULT_KEY })?;
    let result: ReviewResult = serde_json::from_str(&raw)?;

    let original_code = store.get(ORIGINAL_CODE_KEY).unwrap_or_else(|| {
        tracing::debug!(key = ORIGINAL_CODE_KEY, "original source slot empty");
        String::new()
    });

    tracing::debug!(
        metrics = result.metrics.len(),
        has_corrections = result.available_corrections().is_some(),
        "review result loaded"
    );
    Ok(ReviewSession { result, original_code })
}

/// Navigation requests the report view can make of its host.
pub trait Navigator {
    /// Leave the report and return to the view where code is submitted.
    fn navigate_to_entry(&mut self);
}

/// Mounts the report view: loads the session, or sends the host back to the
/// entry view.
///
/// On failure the error is logged, `navigator` is asked to navigate exactly
/// once, and `None` is returned so nothing is rendered.
pub fn mount<S, N>(store: &S, navigator: &mut N) -> Option<ReviewSession>
where
    S: HandoffStore + ?Sized,
    N: Navigator + ?Sized,
{
    match load(store) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(error = %err, "cannot show review result, returning to entry view");
            navigator.navigate_to_entry();
            None
        }
    }
}
