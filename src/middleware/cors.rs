//! CORS negotiation.
//!
//! The platform's clients call addons from a browser context, so every
//! response must allow any origin. The allow-lists are fixed: addons only
//! ever serve reads.
//!
//! A preflight (`OPTIONS`) is answered here and never reaches the route.
//! A preflight asking for a method or header outside the lists still gets
//! `200 OK`, just without that method or header in the answer; the browser
//! then refuses to send the real request.

use std::future;

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, HeaderValue,
};
use http::Method;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// Request headers a preflight may ask for.
///
/// The content-negotiation basics, plus what the platform's desktop and web
/// clients actually send.
pub const ALLOWED_HEADERS: &[&str] = &[
    "Accept",
    "Accept-Language",
    "Content-Type",
    "Origin",
    "Accept-Encoding",
    "Content-Language",
    "X-Requested-With",
];

/// Methods a preflight may ask for.
pub const ALLOWED_METHODS: &[&str] = &["GET"];

const ANY_ORIGIN: HeaderValue = HeaderValue::from_static("*");

pub(crate) struct Cors;

impl Middleware for Cors {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        if req.method() == Method::OPTIONS {
            return Box::pin(future::ready(preflight(&req)));
        }

        let fut = next.run(req);
        Box::pin(async move {
            let mut res = fut.await;
            res.headers_mut().insert(ACCESS_CONTROL_ALLOW_ORIGIN, ANY_ORIGIN);
            res
        })
    }
}

fn preflight(req: &Request) -> Response {
    let mut res = Response::builder().no_body();
    let headers = res.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, ANY_ORIGIN);

    let method = req.header(ACCESS_CONTROL_REQUEST_METHOD.as_str()).unwrap_or_default();
    if let Some(allowed) = ALLOWED_METHODS.iter().copied().find(|m| *m == method) {
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(allowed));
    }

    let granted: Vec<&str> = req
        .headers()
        .get_all(ACCESS_CONTROL_REQUEST_HEADERS)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter_map(|name| ALLOWED_HEADERS.iter().find(|a| a.eq_ignore_ascii_case(name)))
        .copied()
        .collect();
    if !granted.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&granted.join(", ")) {
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use http::StatusCode;

    use super::*;
    use crate::handler::{BoxedHandler, Handler};
    use crate::request::tests::request;

    fn next(called: Arc<AtomicBool>) -> Next {
        let endpoint: BoxedHandler = (move |_req: Request| {
            let called = Arc::clone(&called);
            async move {
                called.store(true, Ordering::SeqCst);
                Response::builder().header("x-route", "catalog").json(&b"{}"[..])
            }
        })
        .into_boxed_handler();
        Next::endpoint(endpoint)
    }

    fn preflight_request(method: &str, headers: &str) -> Request {
        request(
            Method::OPTIONS,
            "/catalog/movie/top.json",
            &[
                ("origin", "https://app.strem.io"),
                ("access-control-request-method", method),
                ("access-control-request-headers", headers),
            ],
        )
    }

    #[tokio::test]
    async fn actual_request_gets_origin_header() {
        let called = Arc::new(AtomicBool::new(false));
        let req = request(Method::GET, "/catalog/movie/top.json", &[("origin", "https://web.strem.io")]);
        let res = Cors.call(req, next(Arc::clone(&called))).await;

        assert!(called.load(Ordering::SeqCst));
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(res.headers()["x-route"], "catalog");
    }

    #[tokio::test]
    async fn request_without_origin_still_gets_origin_header() {
        let called = Arc::new(AtomicBool::new(false));
        let req = request(Method::GET, "/manifest.json", &[]);
        let res = Cors.call(req, next(Arc::clone(&called))).await;
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn preflight_grants_allowed_method_and_headers() {
        let called = Arc::new(AtomicBool::new(false));
        let req = preflight_request("GET", "accept-language, x-requested-with");
        let res = Cors.call(req, next(Arc::clone(&called))).await;

        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(res.status_code(), StatusCode::OK);
        assert!(res.body().is_empty());
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_METHODS], "GET");
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_HEADERS], "Accept-Language, X-Requested-With");
    }

    #[tokio::test]
    async fn preflight_for_write_method_omits_methods() {
        let called = Arc::new(AtomicBool::new(false));
        let req = preflight_request("POST", "content-type");
        let res = Cors.call(req, next(Arc::clone(&called))).await;

        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(res.status_code(), StatusCode::OK);
        assert!(!res.headers().contains_key(ACCESS_CONTROL_ALLOW_METHODS));
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }

    #[tokio::test]
    async fn preflight_drops_unknown_headers() {
        let called = Arc::new(AtomicBool::new(false));
        let req = preflight_request("GET", "authorization, x-custom");
        let res = Cors.call(req, next(Arc::clone(&called))).await;

        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_METHODS], "GET");
        assert!(!res.headers().contains_key(ACCESS_CONTROL_ALLOW_HEADERS));
    }

    #[tokio::test]
    async fn bare_options_is_answered_without_handler() {
        let called = Arc::new(AtomicBool::new(false));
        let req = request(Method::OPTIONS, "/manifest.json", &[]);
        let res = Cors.call(req, next(Arc::clone(&called))).await;

        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(!res.headers().contains_key(ACCESS_CONTROL_ALLOW_METHODS));
    }
}
