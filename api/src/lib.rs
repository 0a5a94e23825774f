// Comment Sentiment API Service

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::{ApiError, Result};
pub use server::{router, ApiServer, AppState};
