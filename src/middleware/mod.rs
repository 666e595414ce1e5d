//! Layers wrapped around the whole router.

mod fault;
mod request_log;

pub use fault::{FaultSignal, PanicResponder};
pub use request_log::{log_api_requests, truncate_preview};

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Request bodies above this are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Body limit, panic recovery, and the request log (outermost, so recovered 500s are logged too).
/// `fault` is `Some` when fail-fast is on.
pub fn apply(router: Router, fault: Option<FaultSignal>) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(PanicResponder::new(fault)))
        .layer(axum::middleware::from_fn(log_api_requests))
}
