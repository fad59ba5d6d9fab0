//! Screen API.
//!
//! Exposes the predictor, home and profile screens as HTTP endpoints for
//! the web view. Routes are nested under `/api/` behind an access-log
//! middleware and a CORS layer.
//!
//! The router is composable: `screen_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::screen_api_router;
pub use server::{start_screen_api_server, ScreenApiServer, ServerError, ServerInfo};
pub use types::ApiContext;
