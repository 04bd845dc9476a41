//! Request tracing middleware: one `info` line per completed request.

use std::time::Instant;

use tracing::{info, warn};

use crate::error::Error;
use crate::middleware::Next;
use crate::request::Request;
use crate::response::Response;

/// Logs one line per request: method, path, status and latency.
///
/// Failures are logged and passed through untouched so the fallback
/// responder still decides what the client sees.
pub async fn trace(req: Request, next: Next) -> Result<Response, Error> {
    let method = req.method();
    let path = req.path().to_owned();
    let started = Instant::now();

    let result = next.run(req).await;
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(res) => info!(%method, %path, status = res.status_code(), latency_ms, "request"),
        Err(e) => warn!(%method, %path, latency_ms, error = %e, "request failed"),
    }
    result
}
