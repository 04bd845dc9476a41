//! Demo middleware that shares data with later handlers through locals.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::middleware::Next;
use crate::request::Request;
use crate::response::Response;

/// Key under which [`share_data`] leaves its payload in the request locals.
pub const DATA_KEY: &str = "data";

/// Puts a fixed payload into `locals.data` for everything downstream.
///
/// Logs the slot before and after writing it; on a fresh request the first
/// line always shows it empty.
pub async fn share_data(mut req: Request, next: Next) -> Result<Response, Error> {
    debug!(data = ?req.locals().get(DATA_KEY), "locals before");

    req.locals_mut().insert(DATA_KEY, json!({
        "message": "This is the data we want to share",
        "value": 42,
    }));

    debug!(data = ?req.locals().get(DATA_KEY), "locals after");
    next.run(req).await
}
