//! Search Service Module
//!
//! Serves `GET /search` and `GET /suggest` on top of the query builder, the
//! index gateway and the result assembler.
//!
//! ## Submodules
//! - **`service`**: The build -> execute -> assemble pipeline.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Endpoint paths and request parameters.

pub mod handlers;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
