//! Web server module
//!
//! Exposes the JSON search, engine listing and health endpoints.

mod handlers;
mod routes;
mod state;

pub use handlers::client_ip;
pub use routes::create_router;
pub use state::AppState;
