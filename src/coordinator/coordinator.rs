//! Request Coordinator
//!
//! Owns the current query text and the lifecycle of suggestion and search
//! requests for one input box.
//!
//! ## Rules
//! - **Debounce**: every keystroke restarts a single timer; only the last one fires.
//! - **Supersession**: a suggest response is applied only if it belongs to the most
//!   recently issued suggest request and its text is still the current text.
//! - **Submission**: cancels the timer, clears suggestions, invalidates the pending
//!   suggest request and issues a search. A newer search supersedes an older one.
//! - **Fail-soft**: a failed suggest leaves suggestions as they were; a failed search
//!   keeps the previous results and flags the failure. Nothing is retried automatically.
//!
//! All state lives behind one mutex that is never held across a backend call.
//! Timer and request tasks re-check their identity when they take the lock.

use super::backend::SearchBackend;
use super::types::*;
use crate::error::ClientError;
use crate::results::types::{SearchResult, SuggestionList};

use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

pub struct RequestCoordinator {
    backend: Arc<dyn SearchBackend>,
    config: CoordinatorConfig,
    state: Mutex<CoordinatorState>,
    view_tx: watch::Sender<CoordinatorView>,
}

#[derive(Default)]
struct CoordinatorState {
    view: CoordinatorView,
    /// Pending debounce timer; at most one.
    debounce_timer: Option<JoinHandle<()>>,
    /// Bumped whenever a timer is started or cancelled.
    timer_generation: u64,
    next_request_id: u64,
    /// The only suggest request whose response may be applied, with its text.
    live_suggest: Option<(RequestId, String)>,
    suggest_task: Option<JoinHandle<()>>,
    /// The only search request whose response may be applied.
    live_search: Option<RequestId>,
    search_task: Option<JoinHandle<()>>,
    last_submitted: Option<String>,
}

impl CoordinatorState {
    fn next_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        RequestId(self.next_request_id)
    }

    fn cancel_debounce(&mut self) {
        if let Some(timer) = self.debounce_timer.take() {
            timer.abort();
        }
        self.timer_generation += 1;
    }
}

impl RequestCoordinator {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Arc<Self> {
        Self::with_config(backend, CoordinatorConfig::default())
    }

    pub fn with_config(backend: Arc<dyn SearchBackend>, config: CoordinatorConfig) -> Arc<Self> {
        let (view_tx, _) = watch::channel(CoordinatorView::default());
        Arc::new(Self {
            backend,
            config,
            state: Mutex::new(CoordinatorState::default()),
            view_tx,
        })
    }

    /// Receives a new [`CoordinatorView`] after every state change.
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorView> {
        self.view_tx.subscribe()
    }

    /// The latest published view.
    pub fn view(&self) -> CoordinatorView {
        self.view_tx.borrow().clone()
    }

    /// Waits until the published view satisfies `predicate`.
    pub async fn wait_for<F>(&self, mut predicate: F) -> CoordinatorView
    where
        F: FnMut(&CoordinatorView) -> bool,
    {
        let mut rx = self.view_tx.subscribe();
        let view = match rx.wait_for(|view| predicate(view)).await {
            Ok(view) => view.clone(),
            // The sender lives as long as `self`
            Err(_) => self.view(),
        };
        view
    }

    fn publish(&self, state: &CoordinatorState) {
        self.view_tx.send_replace(state.view.clone());
    }

    /// Records a keystroke: stores `text` and restarts the debounce timer.
    pub async fn input(self: &Arc<Self>, text: impl Into<String>) {
        let mut state = self.state.lock().await;

        state.view.query = text.into();
        state.cancel_debounce();
        let generation = state.timer_generation;

        let coordinator = self.clone();
        let debounce = self.config.debounce;
        state.debounce_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            coordinator.on_debounce_elapsed(generation).await;
        }));
        state.view.suggest_phase = SuggestPhase::Debouncing;

        self.publish(&state);
    }

    /// Explicit submission (enter key, search button) of the current text.
    pub async fn submit(self: &Arc<Self>) {
        let mut state = self.state.lock().await;
        let text = state.view.query.clone();
        self.start_search(&mut state, text);
        self.publish(&state);
    }

    /// Picks a suggestion: it becomes the current text and is searched at once.
    pub async fn select_suggestion(self: &Arc<Self>, name: impl Into<String>) {
        let mut state = self.state.lock().await;
        let text = name.into();
        state.view.query = text.clone();
        self.start_search(&mut state, text);
        self.publish(&state);
    }

    /// Re-issues the last submitted search after a failure.
    ///
    /// Returns `false` when there is no failed search to retry.
    pub async fn retry(self: &Arc<Self>) -> bool {
        let mut state = self.state.lock().await;

        let failed = matches!(state.view.search_phase, SearchPhase::Failed { .. });
        let Some(text) = state.last_submitted.clone().filter(|_| failed) else {
            return false;
        };

        tracing::info!("Retrying search for {:?}", text);
        self.start_search(&mut state, text);
        self.publish(&state);
        true
    }

    fn start_search(self: &Arc<Self>, state: &mut CoordinatorState, text: String) {
        // Nothing from the suggestion stream may land after a submission
        state.cancel_debounce();
        state.live_suggest = None;
        if let Some(task) = state.suggest_task.take() {
            if self.config.abort_superseded {
                task.abort();
            }
        }
        state.view.suggestions.clear();
        state.view.suggest_phase = SuggestPhase::Idle;

        let id = state.next_request();
        state.live_search = Some(id);
        state.last_submitted = Some(text.clone());
        state.view.search_phase = SearchPhase::AwaitingSearchResponse;

        if let Some(previous) = state.search_task.take() {
            if self.config.abort_superseded {
                previous.abort();
            }
        }

        tracing::debug!("Issuing search #{} for {:?}", id.0, text);
        let coordinator = self.clone();
        state.search_task = Some(tokio::spawn(async move {
            let result = coordinator.backend.search(&text).await;
            coordinator.on_search_complete(id, result).await;
        }));
    }

    async fn on_debounce_elapsed(self: &Arc<Self>, generation: u64) {
        let mut state = self.state.lock().await;

        if generation != state.timer_generation {
            // A newer keystroke or a submission replaced this timer
            return;
        }
        state.debounce_timer = None;

        let text = state.view.query.clone();
        if text.is_empty() {
            state.live_suggest = None;
            state.view.suggestions.clear();
            state.view.suggest_phase = SuggestPhase::Idle;
            self.publish(&state);
            return;
        }

        let id = state.next_request();
        state.live_suggest = Some((id, text.clone()));
        state.view.suggest_phase = SuggestPhase::AwaitingSuggestResponse;

        if let Some(previous) = state.suggest_task.take() {
            if self.config.abort_superseded {
                previous.abort();
            }
        }

        tracing::debug!("Issuing suggest #{} for {:?}", id.0, text);
        let coordinator = self.clone();
        state.suggest_task = Some(tokio::spawn(async move {
            let result = coordinator.backend.suggest(&text).await;
            coordinator.on_suggest_complete(id, text, result).await;
        }));

        self.publish(&state);
    }

    async fn on_suggest_complete(
        &self,
        id: RequestId,
        text: String,
        result: Result<SuggestionList, ClientError>,
    ) {
        let mut state = self.state.lock().await;

        let is_live = matches!(&state.live_suggest, Some((live, _)) if *live == id);
        if !is_live || state.view.query != text {
            tracing::debug!("Discarding stale suggest #{} for {:?}", id.0, text);
            return;
        }

        state.live_suggest = None;
        state.suggest_task = None;
        if state.view.suggest_phase == SuggestPhase::AwaitingSuggestResponse {
            state.view.suggest_phase = SuggestPhase::Idle;
        }

        match result {
            Ok(suggestions) => state.view.suggestions = suggestions,
            Err(e) => tracing::warn!("Suggest for {:?} failed: {}", text, e),
        }

        self.publish(&state);
    }

    async fn on_search_complete(&self, id: RequestId, result: Result<SearchResult, ClientError>) {
        let mut state = self.state.lock().await;

        if state.live_search != Some(id) {
            tracing::debug!("Discarding superseded search #{}", id.0);
            return;
        }
        state.live_search = None;
        state.search_task = None;

        match result {
            Ok(results) => {
                state.view.results = Some(results);
                state.view.search_phase = SearchPhase::Idle;
            }
            Err(e) => {
                tracing::warn!("Search failed, keeping previous results: {}", e);
                state.view.search_phase = SearchPhase::Failed {
                    message: e.to_string(),
                    retryable: e.is_retryable(),
                };
            }
        }

        self.publish(&state);
    }
}
