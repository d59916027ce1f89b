//! Web server module
//!
//! Provides the question API and a minimal web page for WikiAgent.

mod handlers;
mod routes;
mod state;
mod templates;

pub use handlers::AskResponse;
pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
