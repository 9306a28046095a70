//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Every handler is wrapped
//! in the router's [`Pipeline`] when it is registered, so the finished chain
//! for each route is built once, at startup.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Pipeline;

/// The application router.
///
/// ```rust,no_run
/// # use stremio_addon::{Request, Response, Router};
/// # async fn manifest(_: Request) -> Response { Response::text("") }
/// # async fn streams(_: Request) -> Response { Response::text("") }
/// Router::new()
///     .get("/manifest.json",      manifest)
///     .get("/stream/{type}/{id}", streams);
/// ```
pub struct Router {
    pipeline: Pipeline,
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    /// A router whose routes run through the default pipeline (request
    /// logging on).
    pub fn new() -> Self {
        Self::with_pipeline(Pipeline::default())
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline, routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route.
    /// Routes are registered at startup, so this surfaces immediately.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.on_boxed(method, path, handler.into_boxed_handler())
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Registers an already type-erased handler, so one handler can serve
    /// several paths.
    pub(crate) fn on_boxed(mut self, method: Method, path: &str, handler: BoxedHandler) -> Self {
        let finished = self.pipeline.wrap(handler);
        self.routes
            .entry(method)
            .or_default()
            .insert(path, finished)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Finds the finished handler for a request.
    ///
    /// An `OPTIONS` request with no route of its own is served by the `GET`
    /// route at the same path: its pipeline answers the preflight before the
    /// handler could run.
    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let found = self.find(method, path);
        if found.is_none() && method == Method::OPTIONS {
            return self.find(&Method::GET, path);
        }
        found
    }

    fn find(&self, method: &Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;
    use crate::request::Request;
    use crate::request::tests::request_with_params;

    async fn echo_type(req: Request) -> String {
        req.param("type").unwrap_or("none").to_owned()
    }

    #[test]
    fn lookup_extracts_params() {
        let router = Router::new().get("/meta/{type}/{id}", echo_type);
        let (_, params) = router.lookup(&Method::GET, "/meta/series/tt0944947.json").unwrap();
        assert_eq!(params["type"], "series");
        assert_eq!(params["id"], "tt0944947.json");
    }

    #[test]
    fn unknown_path_or_method_misses() {
        let router = Router::new().get("/manifest.json", echo_type);
        assert!(router.lookup(&Method::GET, "/nope").is_none());
        assert!(router.lookup(&Method::POST, "/manifest.json").is_none());
    }

    #[test]
    fn options_falls_back_to_get_route() {
        let router = Router::new().get("/manifest.json", echo_type);
        assert!(router.lookup(&Method::OPTIONS, "/manifest.json").is_some());
        assert!(router.lookup(&Method::OPTIONS, "/other.json").is_none());
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new()
            .get("/catalog/{type}/{id}", echo_type)
            .get("/catalog/{type}/{id}", echo_type);
    }

    #[tokio::test]
    async fn registered_handler_runs_inside_pipeline() {
        let router = Router::new().get("/meta/{type}/{id}", echo_type);
        let (handler, _) = router.lookup(&Method::GET, "/meta/movie/tt1.json").unwrap();
        let req = request_with_params(
            Method::GET,
            "/meta/movie/tt1.json",
            &[],
            &[("type", "movie"), ("id", "tt1.json")],
        );
        let res = handler.call(req).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"movie");
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
    }
}
