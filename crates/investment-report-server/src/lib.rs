pub mod error;
pub mod routes;
mod server;

pub use error::{ApiError, ApiResult};
pub use routes::{build_router, AppState};
pub use server::Server;
