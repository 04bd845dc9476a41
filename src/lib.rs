//! # michi
//!
//! A small HTTP routing and middleware framework, plus the demo service it
//! was written for.
//!
//! - Ordered routing: routes are tried in registration order, first match wins
//! - `:name` path captures, decoded query strings and form bodies
//! - Middleware chain with request-scoped [`Locals`]
//! - One fallback responder: any error or panic becomes `500 Something broke!`
//! - hyper + tokio underneath, graceful shutdown on SIGTERM / Ctrl-C
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use michi::{Error, Next, Request, Response, Router, Server};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let app = Router::new()
//!         .middleware(share_data)
//!         .get("/hey/:name", hey)
//!         .get("/mdtest", mdtest);
//!
//!     Server::bind(([0, 0, 0, 0], 3333)).serve(app).await
//! }
//!
//! async fn share_data(mut req: Request, next: Next) -> Result<Response, Error> {
//!     req.locals_mut().insert("data", json!({"value": 42}));
//!     next.run(req).await
//! }
//!
//! async fn hey(req: Request) -> String {
//!     format!("Hello {}\n", req.param("name").unwrap_or_default())
//! }
//!
//! async fn mdtest(req: Request) -> String {
//!     format!("Data from middleware: {}\n", req.locals().get("data").map(|v| v.to_string()).unwrap_or_default())
//! }
//! ```

mod error;
mod fallback;
mod handler;
mod locals;
mod method;
mod params;
mod pattern;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod demo;
pub mod middleware;

pub use error::{BoxError, Error};
pub use handler::Handler;
pub use locals::Locals;
pub use method::Method;
pub use middleware::{Middleware, Next};
pub use params::Params;
pub use pattern::{PatternError, RoutePattern};
pub use request::Request;
pub use response::{IntoOutcome, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_BODY_LIMIT, Server};
pub use status::Status;
