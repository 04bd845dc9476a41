//! Ordered request router.
//!
//! Routes live in one list and are tried in the order they were registered.
//! The first route whose method and pattern both match wins. There is no
//! specificity ranking: a catch-all such as `/:greeting` registered before
//! `/hello` will answer for `/hello`. Register the generic routes last.

use std::sync::Arc;

use futures_util::FutureExt;

use crate::error::Error;
use crate::fallback;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{BoxedMiddleware, Middleware, Next};
use crate::params::Params;
use crate::pattern::RoutePattern;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

struct Route {
    method: Method,
    pattern: RoutePattern,
    handler: BoxedHandler,
}

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: Vec<Route>,
    pub(crate) middleware: Vec<BoxedMiddleware>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new(), middleware: Vec::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `:name` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use michi::{Method, Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn delete_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Delete, "/users/:id", delete_user)
    ///     .on(Method::Get,    "/users/:id", get_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern (see [`RoutePattern::parse`]).
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let pattern = RoutePattern::parse(path)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self.routes.push(Route { method, pattern, handler: handler.into_boxed_handler() });
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Append a middleware to the chain. Middleware run in registration
    /// order, for every request, before route lookup.
    pub fn middleware(mut self, mw: impl Middleware) -> Self {
        self.middleware.push(mw.into_boxed_middleware());
        self
    }

    /// Runs one request through the middleware chain and the matched route.
    ///
    /// Never fails: errors and panics from any stage are logged and turned
    /// into `500 Something broke!`.
    pub async fn handle(self: Arc<Self>, req: Request) -> Response {
        // The chain is built inside the guarded future so that a panic in a
        // middleware's synchronous prologue is caught too.
        let outcome = std::panic::AssertUnwindSafe(async move { Next::new(self).run(req).await })
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(fallback::from_panic(payload)));

        outcome.unwrap_or_else(|err| fallback::respond(&err))
    }

    /// The end of the chain: first matching route, or `404`.
    pub(crate) async fn route(&self, mut req: Request) -> Result<Response, Error> {
        match self.lookup(req.method, &req.path) {
            Some((handler, params)) => {
                req.params = params;
                handler.call(req).await
            }
            None => Ok(Response::status(Status::NotFound)),
        }
    }

    /// `HEAD` also matches `GET` routes; hyper drops the body on the wire.
    pub(crate) fn lookup(&self, method: Method, path: &str) -> Option<(BoxedHandler, Params)> {
        self.routes.iter()
            .filter(|route| serves(route.method, method))
            .find_map(|route| {
                let params = route.pattern.matches(path)?;
                Some((Arc::clone(&route.handler), params))
            })
    }
}

fn serves(registered: Method, requested: Method) -> bool {
    registered == requested || (requested == Method::Head && registered == Method::Get)
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
