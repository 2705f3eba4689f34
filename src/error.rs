use thiserror::Error;

// The client distinguishes exactly two failure kinds: transport failures
// (the request never completed) and local I/O problems. Everything the
// server says in a completed response is data, not an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    // The upload was invoked without an existing file to send.
    #[error("no file selected")]
    NoFileSelected,

    #[error("file not stored on server: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
