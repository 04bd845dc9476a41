use std::sync::Arc;

use michi::demo::{self, ArticleStore};
use michi::{Method, Request, Router};

struct Demo {
    app: Arc<Router>,
    store: Arc<ArticleStore>,
}

impl Demo {
    fn new() -> Self {
        let store = Arc::new(ArticleStore::seeded());
        let app = Arc::new(demo::router(Arc::clone(&store)));
        Self { app, store }
    }

    async fn send(&self, method: Method, target: &str, form: &str) -> (u16, String) {
        let headers = if form.is_empty() {
            vec![]
        } else {
            vec![("content-type".to_owned(), "application/x-www-form-urlencoded".to_owned())]
        };
        let req = Request::from_parts(method, target, headers, form.to_owned());
        let res = Arc::clone(&self.app).handle(req).await;
        (res.status_code(), String::from_utf8(res.body().to_vec()).unwrap())
    }

    async fn get(&self, target: &str) -> (u16, String) {
        self.send(Method::Get, target, "").await
    }
}

fn ok(body: &str) -> (u16, String) {
    (200, body.to_owned())
}

#[tokio::test]
async fn path_captures() {
    let demo = Demo::new();
    assert_eq!(demo.get("/hey/Keiko").await, ok("Hello Keiko\n"));
    assert_eq!(demo.get("/getData/keiko").await, ok("publicKey is keiko\n"));
}

#[tokio::test]
async fn query_strings() {
    let demo = Demo::new();
    assert_eq!(demo.get("/hello?name=keiko").await, ok("Hello keiko\n"));
    assert_eq!(demo.get("/hello").await, ok("Hello undefined\n"));
    assert_eq!(demo.get("/pass?password=akih").await, ok("password is akih \n"));
}

#[tokio::test]
async fn repeated_query_keys_take_the_last_value() {
    let demo = Demo::new();
    assert_eq!(demo.get("/hello?name=a&name=b").await, ok("Hello b\n"));
}

#[tokio::test]
async fn head_is_answered_by_get_routes() {
    let demo = Demo::new();
    assert_eq!(demo.send(Method::Head, "/hey/Keiko", "").await, ok("Hello Keiko\n"));
    assert_eq!(demo.send(Method::Head, "/hey/a/b", "").await, (404, String::new()));
}

#[tokio::test]
async fn catch_all_greets() {
    let demo = Demo::new();
    assert_eq!(demo.get("/Good?tuduki=morning").await, ok("Good morning \n"));
    assert_eq!(demo.get("/Good").await, ok("Good undefined \n"));
}

#[tokio::test]
async fn specific_routes_are_not_shadowed_by_the_catch_all() {
    let demo = Demo::new();
    assert_eq!(demo.get("/hello?name=a").await, ok("Hello a\n"));
    assert_eq!(demo.get("/pass?password=b").await, ok("password is b \n"));
    assert!(demo.get("/mdtest").await.1.starts_with("Data from middleware: "));
}

#[tokio::test]
async fn segment_count_mismatch_never_matches() {
    let demo = Demo::new();
    assert_eq!(demo.get("/hey").await, ok("hey undefined \n"));
    assert_eq!(demo.get("/hey/a/b").await, (404, String::new()));
    assert_eq!(demo.get("/").await, (404, String::new()));
}

#[tokio::test]
async fn submit_echoes_form() {
    let demo = Demo::new();
    let res = demo.send(Method::Post, "/submit", "publicKey=keiko&password=akih").await;
    assert_eq!(res, ok(concat!(
        "Received data: {\"publicKey\":\"keiko\",\"password\":\"akih\"}\n",
        "Received data2: \"akih\"\n",
        "Received data3: \"keiko\"\n",
    )));
}

#[tokio::test]
async fn middleware_data_is_identical_per_request() {
    let demo = Demo::new();
    let expected = ok("Data from middleware: {\"message\":\"This is the data we want to share\",\"value\":42}\n");

    let (first, second) = tokio::join!(demo.get("/mdtest"), demo.get("/mdtest"));
    assert_eq!(first, expected);
    assert_eq!(second, expected);
    assert_eq!(demo.get("/mdtest").await, expected);
}

#[tokio::test]
async fn delete_twice_is_404_the_second_time() {
    let demo = Demo::new();
    assert_eq!(demo.send(Method::Delete, "/delete-article/1", "").await, ok("Deleted article 1\n"));
    assert_eq!(
        demo.send(Method::Delete, "/delete-article/1", "").await,
        (404, "Article not found\n".to_owned()),
    );
}

#[tokio::test]
async fn put_validates_body_before_existence() {
    let demo = Demo::new();
    assert_eq!(
        demo.send(Method::Put, "/articles/1", "").await,
        (400, "Invalid request data\n".to_owned()),
    );
    assert_eq!(
        demo.send(Method::Put, "/articles/999", "").await,
        (400, "Invalid request data\n".to_owned()),
    );
    assert_eq!(
        demo.send(Method::Put, "/articles/999", "key_a=value_b").await,
        (404, "Article not found\n".to_owned()),
    );
}

#[tokio::test]
async fn put_replaces_the_article() {
    let demo = Demo::new();
    assert_eq!(
        demo.send(Method::Put, "/articles/1", "key_a=value_b").await,
        ok("Updated article 1: {\"key_a\":\"value_b\"}\n"),
    );
    let article = demo.store.get("1").unwrap().unwrap();
    assert_eq!(article.fields().to_json(), r#"{"key_a":"value_b"}"#);
}

#[tokio::test]
async fn patch_merges_without_dropping_fields() {
    let demo = Demo::new();
    assert_eq!(
        demo.send(Method::Patch, "/articles_update/1", "title=Updated+Title").await,
        ok("Partially updated article 1: {\"title\":\"Updated Title\"}\n"),
    );
    let article = demo.store.get("1").unwrap().unwrap();
    assert_eq!(article.title(), Some("Updated Title"));
    assert_eq!(article.content(), Some("This is a sample article."));

    assert_eq!(
        demo.send(Method::Patch, "/articles_update/2", "title=x").await,
        (404, "Article not found\n".to_owned()),
    );
}

#[tokio::test]
async fn patch_after_delete_is_404() {
    let demo = Demo::new();
    demo.send(Method::Delete, "/delete-article/1", "").await;
    assert_eq!(
        demo.send(Method::Patch, "/articles_update/1", "title=x").await,
        (404, "Article not found\n".to_owned()),
    );
}
