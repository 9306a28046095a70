//! Panic recovery.
//!
//! A route handler the library does not control must not take the
//! connection down with it. A panic anywhere below this stage is caught and
//! turned into a bare `500 Internal Server Error`. The panic message goes to
//! the operator log only; the client never sees it. Location and backtrace
//! still come from the process's panic hook (`RUST_BACKTRACE=1`).

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use http::StatusCode;
use tracing::error;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

pub(crate) struct Recover;

impl Middleware for Recover {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let method = req.method().clone();
        let url = req.url().to_owned();

        // `next.run` is called inside the future so a panic while building
        // the handler's future is caught as well.
        let downstream = AssertUnwindSafe(async move { next.run(req).await });

        Box::pin(async move {
            match downstream.catch_unwind().await {
                Ok(res) => res,
                Err(payload) => {
                    error!(
                        method = %method,
                        url = %url,
                        panic = panic_message(payload.as_ref()),
                        "recovered from panic in request handler"
                    );
                    Response::status(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
