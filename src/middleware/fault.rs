//! Last-resort fault handling: a panicking handler still gets a JSON 500, then the process is
//! told to stop so its supervisor can restart it.

use crate::error::ErrorBody;
use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::catch_panic::ResponseForPanic;

#[derive(Default)]
struct FaultInner {
    notify: Notify,
    tripped: AtomicBool,
}

/// Raised once a request has faulted; the server's shutdown future waits on it.
#[derive(Clone, Default)]
pub struct FaultSignal {
    inner: Arc<FaultInner>,
}

impl FaultSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self) {
        self.inner.tripped.store(true, Ordering::SeqCst);
        // notify_one keeps a permit, so a waiter that arrives late still wakes.
        self.inner.notify.notify_one();
    }

    pub fn is_tripped(&self) -> bool {
        self.inner.tripped.load(Ordering::SeqCst)
    }

    pub async fn tripped(&self) {
        self.inner.notify.notified().await;
    }
}

fn panic_message(err: &(dyn Any + Send)) -> &str {
    if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    }
}

/// Answers panics with `{"message": "Internal Server Error"}` and, when fail-fast is on, trips the signal.
#[derive(Clone, Default)]
pub struct PanicResponder {
    signal: Option<FaultSignal>,
}

impl PanicResponder {
    pub fn new(signal: Option<FaultSignal>) -> Self {
        Self { signal }
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Self::ResponseBody> {
        tracing::error!(panic = panic_message(err.as_ref()), "request handler panicked");
        if let Some(signal) = &self.signal {
            tracing::error!("fail-fast: shutting down after faulted request");
            signal.trip();
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::message("Internal Server Error")),
        )
            .into_response()
    }
}
