//! drillpad-api — request handlers for the quiz backend.
//!
//! Framework-free: each handler is an async fn over [`handlers::AppState`]
//! returning `Result<_, error::ApiError>`. An HTTP binding would translate
//! these one-to-one (the error type already carries the status code), but
//! the routing layer itself lives outside this workspace.

pub mod error;
pub mod handlers;
pub mod types;

pub use error::ApiError;
pub use handlers::AppState;
