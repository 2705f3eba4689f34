pub mod api_handlers;
pub mod client;
pub mod error;
pub mod server;
pub mod storage;

pub use client::{ApiClient, FileLink, UploadOutcome};
pub use error::{Error, Result};
pub use storage::Storage;
