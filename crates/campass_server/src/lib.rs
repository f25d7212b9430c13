//! HTTP surface for the Campass record stores.
//!
//! # Responsibility
//! - Map REST verbs/paths onto core record services.
//! - Load process configuration and own the shared database handle.
//!
//! # Invariants
//! - Handlers hold no state between requests beyond the shared connection.
//! - Every handler runs exactly one store operation per request.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Settings;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
