//! The addon facade: a validated manifest plus resource handlers on the
//! protocol's fixed paths.
//!
//! ```rust,no_run
//! use stremio_addon::model::{Manifest, StreamResponse};
//! use stremio_addon::{Addon, Json, Options, Request};
//!
//! # async fn run(manifest: Manifest) -> Result<(), stremio_addon::Error> {
//! Addon::new(manifest, Options::default())?
//!     .stream(streams)
//!     .run()
//!     .await
//! # }
//!
//! async fn streams(req: Request) -> Json<StreamResponse> {
//!     let _id = req.resource_id();
//!     Json(StreamResponse::default())
//! }
//! ```
//!
//! | Path | Served by |
//! |---|---|
//! | `/manifest.json` | the manifest, encoded once at startup |
//! | `/health` | `OK` |
//! | `/catalog/{type}/{id}.json` | [`Addon::catalog`] |
//! | `/catalog/{type}/{id}/{extra}.json` | [`Addon::catalog`] |
//! | `/meta/{type}/{id}.json` | [`Addon::meta`] |
//! | `/stream/{type}/{id}.json` | [`Addon::stream`] |

use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use tracing::warn;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Pipeline;
use crate::model::{Manifest, ResourceName};
use crate::options::Options;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::server::Server;

/// A runnable addon.
pub struct Addon {
    manifest: Manifest,
    options: Options,
    router: Router,
}

impl Addon {
    /// Validates `manifest` and registers the manifest and health routes.
    ///
    /// Fails if the manifest breaks a protocol invariant or cannot be
    /// encoded.
    pub fn new(manifest: Manifest, options: Options) -> Result<Self, Error> {
        manifest.validate()?;
        let body = Bytes::from(serde_json::to_vec(&manifest)?);

        let router = Router::with_pipeline(Pipeline::new(&options))
            .get("/manifest.json", move |_req: Request| {
                let body = body.clone();
                async move { Response::json(body) }
            })
            .get("/health", health);

        Ok(Self { manifest, options, router })
    }

    /// Serves catalog listings. `req.extra("skip")`, `req.extra("genre")`
    /// etc. read the optional extra segment.
    pub fn catalog(self, handler: impl Handler) -> Self {
        self.resource(
            ResourceName::Catalog,
            &["/catalog/{type}/{id}", "/catalog/{type}/{id}/{extra}"],
            handler.into_boxed_handler(),
        )
    }

    pub fn meta(self, handler: impl Handler) -> Self {
        self.resource(ResourceName::Meta, &["/meta/{type}/{id}"], handler.into_boxed_handler())
    }

    pub fn stream(self, handler: impl Handler) -> Self {
        self.resource(ResourceName::Stream, &["/stream/{type}/{id}"], handler.into_boxed_handler())
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Hands out the finished router, e.g. to serve it on a custom listener.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Binds per [`Options`] and serves until SIGTERM or Ctrl-C.
    pub async fn run(self) -> Result<(), Error> {
        Server::bind(self.options.socket_addr()).serve(self.router).await
    }

    fn resource(mut self, name: ResourceName, paths: &[&str], handler: BoxedHandler) -> Self {
        if !self.manifest.declares(name) {
            warn!(resource = name.as_str(), "handler registered for a resource the manifest does not declare");
        }
        for path in paths {
            self.router = self.router.on_boxed(Method::GET, path, Arc::clone(&handler));
        }
        self
    }
}

async fn health(_req: Request) -> Response {
    Response::text("OK")
}
