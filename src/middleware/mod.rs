//! Middleware pipeline.
//!
//! Middleware intercepts requests and responses. It is where the
//! cross-cutting concerns live: request timing, CORS, panic recovery and the
//! access log.
//!
//! # Order
//!
//! The stages run in a fixed order, outermost first:
//!
//! ```text
//! Timing      stamps a fresh RequestContext
//! AccessLog   runs the rest, then logs with the stamp   (only if enabled)
//! Cors        answers OPTIONS itself, decorates everything else
//! Recover     turns a downstream panic into 500
//! handler     the route's own handler
//! ```
//!
//! The access log sits directly inside timing so it sees the stamp before
//! anything else runs, and its "after" hook is the last thing to happen. Its
//! duration therefore covers CORS and recovery too. Moving a stage changes
//! what is measured and what is logged; the order is not configurable.
//!
//! # Sharing
//!
//! A [`Pipeline`] is built once at startup. Its stage list is an
//! `Arc<[..]>` shared by every route and every request; stages hold no
//! mutable state, so concurrent requests traverse the same instances without
//! coordination.

mod access_log;
mod cors;
mod recover;
mod timing;

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::options::Options;
use crate::request::Request;

pub use cors::{ALLOWED_HEADERS, ALLOWED_METHODS};

use access_log::AccessLog;
use cors::Cors;
use recover::Recover;
use timing::Timing;

// ── Stage interface ───────────────────────────────────────────────────────────

/// One stage of the pipeline.
///
/// A stage either answers the request itself or hands it to `next` and
/// post-processes whatever comes back.
pub(crate) trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

type Stages = Arc<[Arc<dyn Middleware>]>;

/// The remainder of the chain after the current stage.
pub(crate) struct Next {
    stages: Stages,
    index: usize,
    endpoint: BoxedHandler,
}

impl Next {
    /// Runs the next stage, or the route handler once every stage has run.
    pub(crate) fn run(self, req: Request) -> BoxFuture {
        match self.stages.get(self.index).cloned() {
            Some(stage) => {
                let next = Next { index: self.index + 1, ..self };
                stage.call(req, next)
            }
            None => self.endpoint.call(req),
        }
    }

    /// A chain with no stages left, only `endpoint`.
    #[cfg(test)]
    pub(crate) fn endpoint(endpoint: BoxedHandler) -> Self {
        Self { stages: Stages::from(Vec::new()), index: 0, endpoint }
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// The ordered list of stages every route is wrapped in.
#[derive(Clone)]
pub struct Pipeline {
    stages: Stages,
}

impl Pipeline {
    /// Builds the standard chain. The access log is only part of it when
    /// `options.log_requests` is set; otherwise it costs nothing at all.
    pub fn new(options: &Options) -> Self {
        let mut stages: Vec<Arc<dyn Middleware>> = vec![Arc::new(Timing)];
        if options.log_requests {
            stages.push(Arc::new(AccessLog));
        }
        stages.push(Arc::new(Cors));
        stages.push(Arc::new(Recover));
        Self { stages: stages.into() }
    }

    /// Wraps a route handler, producing the finished handler the router
    /// stores for that route.
    pub(crate) fn wrap(&self, endpoint: BoxedHandler) -> BoxedHandler {
        Arc::new(Chain { stages: Arc::clone(&self.stages), endpoint })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.stages.len()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

/// A route handler wrapped in the pipeline's stages.
struct Chain {
    stages: Stages,
    endpoint: BoxedHandler,
}

impl ErasedHandler for Chain {
    fn call(&self, req: Request) -> BoxFuture {
        let next = Next {
            stages: Arc::clone(&self.stages),
            index: 0,
            endpoint: Arc::clone(&self.endpoint),
        };
        next.run(req)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use http::{Method, StatusCode};
    use tracing::subscriber::DefaultGuard;

    use super::*;
    use crate::handler::Handler;
    use crate::request::tests::request;

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        /// Routes this thread's `tracing` events into the buffer until the
        /// guard is dropped.
        pub(crate) fn install(&self) -> DefaultGuard {
            let writer = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .without_time()
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf).lines().map(str::to_owned).collect()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn counting_handler(hits: Arc<AtomicUsize>) -> BoxedHandler {
        (move |_req: Request| {
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "ok"
            }
        })
        .into_boxed_handler()
    }

    #[test]
    fn logging_toggle_controls_stage_count() {
        assert_eq!(Pipeline::new(&Options::default()).len(), 4);
        assert_eq!(Pipeline::new(&Options::default().log_requests(false)).len(), 3);
    }

    #[tokio::test]
    async fn empty_chain_calls_endpoint() {
        let hits = Arc::new(AtomicUsize::new(0));
        let chain = Pipeline { stages: Stages::from(Vec::new()) }.wrap(counting_handler(Arc::clone(&hits)));
        let res = chain.call(request(Method::GET, "/", &[])).await;
        assert_eq!(res.body(), b"ok");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn full_chain_reaches_handler_and_adds_cors() {
        let hits = Arc::new(AtomicUsize::new(0));
        let chain = Pipeline::default().wrap(counting_handler(Arc::clone(&hits)));
        let res = chain.call(request(Method::GET, "/manifest.json", &[])).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn preflight_never_reaches_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let chain = Pipeline::default().wrap(counting_handler(Arc::clone(&hits)));
        let req = request(
            Method::OPTIONS,
            "/manifest.json",
            &[("origin", "https://app.strem.io"), ("access-control-request-method", "GET")],
        );
        let res = chain.call(req).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(res.headers()["access-control-allow-methods"], "GET");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn panic_inside_chain_is_logged_and_answered() {
        let captured = Captured::default();
        let _guard = captured.install();

        let boom = (|_req: Request| async move {
            if true {
                panic!("catalog backend exploded");
            }
            "unreachable"
        })
        .into_boxed_handler();
        let chain = Pipeline::default().wrap(boom);

        let res = chain.call(request(Method::GET, "/catalog/movie/top.json", &[])).await;
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");

        let lines = captured.lines();
        assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("catalog backend exploded")));
        let access = lines.iter().filter(|l| l.contains("Handled request")).count();
        assert_eq!(access, 1);
    }
}
