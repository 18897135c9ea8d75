//! JSON-over-HTTP API.
//!
//! The router is composable: `api_router()` returns a `Router` that can be
//! mounted on any axum server instance. `server` wraps it with a
//! bind/shutdown lifecycle.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::{api_router, route_table, Route};
pub use server::{start_server_on, ApiServer, ServerError};
pub use types::ApiContext;
