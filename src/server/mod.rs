pub mod handlers;
pub mod router;

pub use router::{AppState, app_router};
