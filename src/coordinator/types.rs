//! Coordinator Types
//!
//! The observable state of the request coordinator: what a renderer needs to
//! draw the search box, the suggestion dropdown and the result list.

use crate::results::types::{SearchResult, SuggestionList};
use std::time::Duration;

/// Quiet window after the last keystroke before suggestions are requested.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Identity of an issued request. Strictly increasing per coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Lifecycle of the suggestion stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestPhase {
    Idle,
    /// A debounce timer is pending.
    Debouncing,
    /// The latest suggest request is in flight.
    AwaitingSuggestResponse,
}

/// Lifecycle of explicit searches, independent of [`SuggestPhase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    AwaitingSearchResponse,
    /// The last search failed. The previous results stay visible.
    Failed { message: String, retryable: bool },
}

/// Snapshot published after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorView {
    pub query: String,
    pub suggest_phase: SuggestPhase,
    pub suggestions: SuggestionList,
    pub search_phase: SearchPhase,
    /// Last successful search result, if any.
    pub results: Option<SearchResult>,
}

impl Default for CoordinatorView {
    fn default() -> Self {
        Self {
            query: String::new(),
            suggest_phase: SuggestPhase::Idle,
            suggestions: Vec::new(),
            search_phase: SearchPhase::Idle,
            results: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub debounce: Duration,
    /// Abort superseded in-flight requests instead of only discarding their results.
    pub abort_superseded: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_WINDOW,
            abort_superseded: true,
        }
    }
}
