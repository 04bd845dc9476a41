//! Unified error type.

use thiserror::Error;

/// Any error a handler or middleware may hand back.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by michi's fallible operations.
///
/// Expected failures (400, 404, ...) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type covers
/// infrastructure failures and whatever a handler could not deal with; the
/// latter never reaches the client beyond a bare 500.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("handler: {0}")]
    Handler(#[source] BoxError),

    #[error("panic: {0}")]
    Panic(String),
}

impl Error {
    /// Wraps an arbitrary error raised inside a handler or middleware.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }
}
