//! HTTP server for Scribe.
//!
//! Serves authors, blogposts and comments as JSON over REST. Handlers are thin:
//! all consistency rules live in [`scribe_sdk::Scribe`].

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, StorageConfig};
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use extract::{ApiJson, ApiPath};
pub use handler::AppState;
pub use router::build_router;
pub use server::ScribeServer;
