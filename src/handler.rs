//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* types in a single radix tree per
//! method. Rust collections can only hold one concrete type, so handlers are
//! hidden behind a trait object (`dyn ErasedHandler`).
//!
//! ```text
//! async fn streams(req: Request) -> Json<StreamResponse> { … }  ← user writes this
//!        ↓ router.get("/stream/{type}/{id}", streams)
//! streams.into_boxed_handler()                  ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(streams))                  ← heap-allocated wrapper
//!        ↓ pipeline.wrap(handler)
//! Arc::new(Chain { stages, endpoint })          ← finished route handler
//!        ↓ handler.call(req) at request time
//! Box::pin(async { … })                         ← BoxFuture
//! ```
//!
//! A finished route handler is itself an `ErasedHandler`, so the router never
//! knows whether it is calling a bare handler or a whole pipeline.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` let tokio move the future across worker threads.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Automatically satisfied for any `async fn` (or closure returning a
/// future) with the shape:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is sealed; only the blanket impl below satisfies it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// `Sealed` cannot be named outside this crate, so no other crate can
/// implement `Handler` for its own types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

/// Any `Fn(Request) -> Fut` qualifies: named `async fn` items, closures
/// returning an `async` block, and structs implementing `Fn`.
impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and exposes it as an [`ErasedHandler`], so
/// the router and the pipeline can store it next to handlers of other types.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // Typed future first, then erased to `Response` and boxed.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
