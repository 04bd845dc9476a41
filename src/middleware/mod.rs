//! Middleware layer.
//!
//! Middleware intercepts every request before routing and is the right place
//! for cross-cutting concerns: tracing, request-scoped data, header checks.
//!
//! A middleware is any async function (or closure) shaped like
//!
//! ```text
//! async fn name(req: Request, next: Next) -> impl IntoOutcome
//! ```
//!
//! It may mutate the request (most usefully its [`Locals`](crate::Locals))
//! and call [`Next::run`] to continue, or return a response of its own to
//! stop the chain there. Middleware run in the order they were registered,
//! all of them before the matched handler.
//!
//! ```rust,no_run
//! use michi::{Error, Next, Request, Response, Router, Status};
//!
//! async fn require_token(req: Request, next: Next) -> Result<Response, Error> {
//!     if req.header("x-token").is_none() {
//!         return Ok(Response::status(Status::BadRequest));
//!     }
//!     next.run(req).await
//! }
//!
//! let app = Router::new().middleware(require_token);
//! ```
//!
//! Built-in middleware:
//! - [`trace`]: one log line per request (method, path, status, latency)

mod trace;

pub use trace::trace;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::{IntoOutcome, Response};
use crate::router::Router;

#[doc(hidden)]
pub trait ErasedMiddleware {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedMiddleware = Arc<dyn ErasedMiddleware + Send + Sync + 'static>;

/// Implemented for every valid middleware function. Sealed, like
/// [`Handler`](crate::Handler).
pub trait Middleware: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_middleware(self) -> BoxedMiddleware;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
}

impl<F, Fut, R> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn into_boxed_middleware(self) -> BoxedMiddleware {
        Arc::new(FnMiddleware(self))
    }
}

struct FnMiddleware<F>(F);

impl<F, Fut, R> ErasedMiddleware for FnMiddleware<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let fut = (self.0)(req, next);
        Box::pin(async move { fut.await.into_outcome() })
    }
}

// ── Next ──────────────────────────────────────────────────────────────────────

/// The rest of the chain.
///
/// [`run`](Next::run) consumes the `Next`, so a middleware can continue the
/// chain at most once. Dropping it without calling `run` ends the chain.
pub struct Next {
    router: Arc<Router>,
    index: usize,
}

impl Next {
    pub(crate) fn new(router: Arc<Router>) -> Self {
        Self { router, index: 0 }
    }

    /// Runs the remaining middleware, then the matched route.
    pub fn run(self, req: Request) -> Pin<Box<dyn Future<Output = Result<Response, Error>> + Send>> {
        let stage = self.router.middleware.get(self.index).cloned();
        match stage {
            Some(mw) => {
                let next = Next { router: self.router, index: self.index + 1 };
                mw.call(req, next)
            }
            None => Box::pin(async move { self.router.route(req).await }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, Status};
    use serde_json::json;

    fn get(path: &str) -> Request {
        Request::from_parts(Method::Get, path, vec![], bytes::Bytes::new())
    }

    async fn stamp_first(mut req: Request, next: Next) -> Result<Response, Error> {
        req.locals_mut().insert("order", json!(["first"]));
        next.run(req).await
    }

    async fn stamp_second(mut req: Request, next: Next) -> Result<Response, Error> {
        let mut order = req.locals_mut().remove("order").unwrap_or_else(|| json!([]));
        if let Some(seen) = order.as_array_mut() {
            seen.push(json!("second"));
        }
        req.locals_mut().insert("order", order);
        next.run(req).await
    }

    async fn show_order(req: Request) -> String {
        req.locals().get("order").map(|v| v.to_string()).unwrap_or_default()
    }

    async fn refuse(_req: Request, _next: Next) -> Response {
        Response::builder().status(Status::BadRequest).text("refused\n")
    }

    async fn unreachable_handler(_req: Request) -> Response {
        panic!("handler must not run when middleware short-circuits");
    }

    async fn fail(_req: Request, _next: Next) -> Result<Response, Error> {
        Err(Error::handler("middleware failure"))
    }

    #[tokio::test]
    async fn runs_in_registration_order_and_shares_locals() {
        let app = Arc::new(
            Router::new()
                .middleware(stamp_first)
                .middleware(stamp_second)
                .get("/order", show_order),
        );
        let res = app.handle(get("/order")).await;
        assert_eq!(res.body(), br#"["first","second"]"#);
    }

    #[tokio::test]
    async fn middleware_can_stop_the_chain() {
        let app = Arc::new(Router::new().middleware(refuse).get("/x", unreachable_handler));
        let res = app.handle(get("/x")).await;
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.body(), b"refused\n");
    }

    #[tokio::test]
    async fn middleware_errors_reach_the_fallback() {
        let app = Arc::new(Router::new().middleware(fail).get("/x", show_order));
        let res = app.handle(get("/x")).await;
        assert_eq!(res.status_code(), 500);
        assert_eq!(res.body(), b"Something broke!\n");
    }

    #[tokio::test]
    async fn middleware_runs_for_unmatched_paths_too() {
        let app = Arc::new(Router::new().middleware(refuse));
        let res = app.handle(get("/nowhere")).await;
        assert_eq!(res.status_code(), 400);
    }
}
