//! The articles demo service.
//!
//! Shows route captures, query strings, form bodies and middleware locals on
//! top of an in-memory [`ArticleStore`].
//!
//! ```text
//! curl http://localhost:3333/hey/Keiko                          Hello Keiko
//! curl 'http://localhost:3333/hello?name=keiko'                 Hello keiko
//! curl 'http://localhost:3333/Good?tuduki=morning'              Good morning
//! curl -X POST -d "publicKey=keiko&password=akih" http://localhost:3333/submit
//! curl -X PUT -d "key_a=value_b" http://localhost:3333/articles/1
//! curl -X PATCH -d "title=Updated Title" http://localhost:3333/articles_update/1
//! curl -X DELETE http://localhost:3333/delete-article/1
//! ```

pub mod handlers;
pub mod middleware;
pub mod store;

use std::future::Future;
use std::sync::Arc;

pub use store::{Article, ArticleStore, StoreError};

use crate::handler::Handler;
use crate::request::Request;
use crate::response::IntoOutcome;
use crate::router::Router;

/// Builds the demo router over `store`.
///
/// Routes are registered in a fixed order. `/:aisatsu` matches any
/// one-segment path, so it goes last or it would swallow `/mdtest`,
/// `/pass`, `/hello` and friends.
pub fn router(store: Arc<ArticleStore>) -> Router {
    Router::new()
        .middleware(crate::middleware::trace)
        .middleware(middleware::share_data)
        .delete("/delete-article/:id",   with_store(Arc::clone(&store), handlers::delete_article))
        .patch("/articles_update/:id",   with_store(Arc::clone(&store), handlers::update_article))
        .put("/articles/:id",            with_store(store, handlers::replace_article))
        .get("/mdtest",                  handlers::mdtest)
        .get("/getData/:publicKey",      handlers::get_data)
        .get("/pass",                    handlers::pass)
        .post("/submit",                 handlers::submit)
        .get("/hey/:name",               handlers::hey)
        .get("/hello",                   handlers::hello)
        .get("/:aisatsu",                handlers::aisatsu)
}

/// Adapts a handler that needs the store into a plain [`Handler`].
fn with_store<F, Fut, R>(store: Arc<ArticleStore>, handler: F) -> impl Handler
where
    F: Fn(Arc<ArticleStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    move |req: Request| handler(Arc::clone(&store), req)
}
