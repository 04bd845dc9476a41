//! Last-resort error responder.
//!
//! Whatever escapes the middleware chain (an `Err` or a panic) ends up here
//! and becomes the same fixed `500`. The cause goes to the log, never to the
//! client.

use std::any::Any;

use tracing::error;

use crate::error::Error;
use crate::response::Response;
use crate::status::Status;

pub(crate) const BODY: &str = "Something broke!\n";

pub(crate) fn respond(err: &Error) -> Response {
    error!(error = %err, "unhandled error");
    Response::builder()
        .status(Status::InternalServerError)
        .text(BODY)
}

/// Turns a caught panic payload into an [`Error`].
pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Error {
    let message = payload.downcast_ref::<&str>().map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned());
    Error::Panic(message)
}
