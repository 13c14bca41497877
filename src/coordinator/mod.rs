//! Request Coordinator Module
//!
//! The client-side half of the system: turns a stream of keystrokes and
//! explicit submissions into suggestion and search requests.
//!
//! ## Submodules
//! - **`coordinator`**: The debounce / supersession state machine.
//! - **`backend`**: Where requests go (`HttpSearchClient`, `LocalBackend`).
//! - **`types`**: Phases, the published view and tuning knobs.

pub mod backend;
pub mod coordinator;
pub mod types;
