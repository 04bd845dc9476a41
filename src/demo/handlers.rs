//! Demo endpoints.
//!
//! Each one echoes some part of the request back as plain text. Values the
//! client did not send are rendered as `undefined`.

use std::sync::Arc;

use crate::demo::middleware::DATA_KEY;
use crate::demo::store::{Article, ArticleStore, StoreError};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

const UNDEFINED: &str = "undefined";
const NOT_FOUND: &str = "Article not found\n";
const INVALID: &str = "Invalid request data\n";

fn or_undefined(value: Option<&str>) -> &str {
    value.unwrap_or(UNDEFINED)
}

/// A single value as JSON text (`"akih"`), or `undefined` when absent.
fn json_or_undefined(value: Option<&str>) -> String {
    value
        .and_then(|v| serde_json::to_string(v).ok())
        .unwrap_or_else(|| UNDEFINED.to_owned())
}

fn not_found() -> Response {
    Response::builder().status(Status::NotFound).text(NOT_FOUND)
}

// ── Request echoes ────────────────────────────────────────────────────────────

/// `GET /mdtest`
pub async fn mdtest(req: Request) -> String {
    let data = req.locals()
        .get(DATA_KEY)
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNDEFINED.to_owned());
    format!("Data from middleware: {data}\n")
}

/// `GET /getData/:publicKey`
pub async fn get_data(req: Request) -> String {
    format!("publicKey is {}\n", or_undefined(req.param("publicKey")))
}

/// `GET /pass?password=`
pub async fn pass(req: Request) -> String {
    format!("password is {} \n", or_undefined(req.query("password")))
}

/// `POST /submit`
pub async fn submit(req: Request) -> String {
    let form = req.form();
    format!(
        "Received data: {}\nReceived data2: {}\nReceived data3: {}\n",
        form.to_json(),
        json_or_undefined(form.get("password")),
        json_or_undefined(form.get("publicKey")),
    )
}

/// `GET /hey/:name`
pub async fn hey(req: Request) -> String {
    format!("Hello {}\n", or_undefined(req.param("name")))
}

/// `GET /hello?name=`
pub async fn hello(req: Request) -> String {
    format!("Hello {}\n", or_undefined(req.query("name")))
}

/// `GET /:aisatsu?tuduki=`, the catch-all. Must be registered last.
pub async fn aisatsu(req: Request) -> String {
    format!(
        "{} {} \n",
        or_undefined(req.param("aisatsu")),
        or_undefined(req.query("tuduki")),
    )
}

// ── Articles ──────────────────────────────────────────────────────────────────

/// `DELETE /delete-article/:id`
pub async fn delete_article(store: Arc<ArticleStore>, req: Request) -> Result<Response, StoreError> {
    let id = req.param("id").unwrap_or_default();
    match store.remove(id)? {
        Some(_) => Ok(Response::text(format!("Deleted article {id}\n"))),
        None => Ok(not_found()),
    }
}

/// `PATCH /articles_update/:id`: merges the form fields into the article.
pub async fn update_article(store: Arc<ArticleStore>, req: Request) -> Result<Response, StoreError> {
    let id = req.param("id").unwrap_or_default();
    if !store.merge(id, req.form())? {
        return Ok(not_found());
    }
    Ok(Response::text(format!("Partially updated article {id}: {}\n", req.form().to_json())))
}

/// `PUT /articles/:id`: replaces the article with the form fields.
///
/// An empty body is rejected before the id is looked at.
pub async fn replace_article(store: Arc<ArticleStore>, req: Request) -> Result<Response, StoreError> {
    let id = req.param("id").unwrap_or_default();
    let form = req.form();
    if form.is_empty() {
        return Ok(Response::builder().status(Status::BadRequest).text(INVALID));
    }
    if !store.replace(id, Article::from(form.clone()))? {
        return Ok(not_found());
    }
    Ok(Response::text(format!("Updated article {id}: {}\n", form.to_json())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    fn get(target: &str) -> Request {
        Request::from_parts(Method::Get, target, vec![], bytes::Bytes::new())
    }

    #[test]
    fn json_or_undefined_quotes_present_values() {
        assert_eq!(json_or_undefined(Some("akih")), r#""akih""#);
        assert_eq!(json_or_undefined(Some("say \"hi\"")), r#""say \"hi\"""#);
        assert_eq!(json_or_undefined(None), "undefined");
    }

    #[tokio::test]
    async fn mdtest_without_middleware_is_undefined() {
        assert_eq!(mdtest(get("/mdtest")).await, "Data from middleware: undefined\n");
    }

    #[tokio::test]
    async fn query_echoes_default_to_undefined() {
        assert_eq!(hello(get("/hello")).await, "Hello undefined\n");
        assert_eq!(pass(get("/pass")).await, "password is undefined \n");
        assert_eq!(pass(get("/pass?password=akih")).await, "password is akih \n");
    }

    #[tokio::test]
    async fn submit_without_body_echoes_empty_object() {
        let req = Request::from_parts(Method::Post, "/submit", vec![], bytes::Bytes::new());
        assert_eq!(
            submit(req).await,
            "Received data: {}\nReceived data2: undefined\nReceived data3: undefined\n",
        );
    }
}
