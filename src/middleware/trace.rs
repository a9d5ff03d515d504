//! Per-request tracing span.

use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use super::{Middleware, Next, from_fn};
use crate::request::Request;

/// Opens one `request` span per call with the method, path and matched
/// pattern, and logs the status and latency when the inner chain returns.
///
/// Register it first in a route's key list so its span covers the rest of
/// the chain.
pub fn trace() -> Middleware {
    from_fn(|req: Request, next: Next| async move {
        let span = info_span!(
            "request",
            method = %req.method(),
            path = %req.path(),
            pattern = %req.pattern(),
        );

        async move {
            let start = Instant::now();
            let result = next.run(req).await;
            let latency_us = start.elapsed().as_micros() as u64;

            match &result {
                Ok(res) => info!(status = res.status_code(), latency_us, "request completed"),
                Err(e)  => warn!(error = %e, latency_us, "request failed"),
            }
            result
        }
        .instrument(span)
        .await
    })
}
