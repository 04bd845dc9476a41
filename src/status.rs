//! HTTP status codes used by michi responses.
//!
//! ```rust
//! use michi::{Response, Status};
//!
//! Response::status(Status::MethodNotAllowed);
//!
//! Response::builder()
//!     .status(Status::NotFound)
//!     .text("Article not found\n");
//! ```

/// The status codes the framework and its handlers speak.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    PayloadTooLarge,     // 413

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::BadRequest           => 400,
            Status::NotFound             => 404,
            Status::MethodNotAllowed     => 405,
            Status::PayloadTooLarge      => 413,
            Status::InternalServerError  => 500,
        }
    }
}
