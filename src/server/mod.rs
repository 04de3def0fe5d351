//! The HTTP surface: router, shared state, session auth, and the export and
//! bulk-update handlers.

mod export;
mod routes;
mod session;
mod state;
mod update;

pub use routes::build_router;
pub use state::AppState;
