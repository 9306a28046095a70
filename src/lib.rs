//! # stremio-addon
//!
//! Serve a Stremio addon over HTTP: a manifest describing what the addon
//! can do, and catalog, meta and stream endpoints answering with typed
//! documents.
//!
//! Two things are guaranteed here and nowhere else:
//!
//! - **The pipeline.** Every route runs inside the same fixed chain: request
//!   timing, access log, CORS, panic recovery. See [`middleware`].
//! - **The wire contract.** The [`model`] types write exactly the keys the
//!   platform expects, omit every optional field that is unset, and make
//!   "exactly one of" fields impossible to get wrong when encoding.
//!
//! Fetching or computing catalogs and streams is up to you: write a handler.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use stremio_addon::model::*;
//! use stremio_addon::{Addon, Json, Options, Request};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), stremio_addon::Error> {
//!     let manifest = Manifest {
//!         id: "com.example.hello".into(),
//!         name: "Hello".into(),
//!         description: "Streams one public-domain movie".into(),
//!         version: "0.1.0".into(),
//!         resources: Resources::Names(vec![ResourceName::Stream]),
//!         types: vec!["movie".into()],
//!         catalogs: Vec::new(),
//!         id_prefixes: vec!["tt".into()],
//!         background: None,
//!         logo: None,
//!         contact_email: None,
//!         behavior_hints: BehaviorHints::default(),
//!     };
//!
//!     Addon::new(manifest, Options::default())?
//!         .stream(streams)
//!         .run()
//!         .await
//! }
//!
//! async fn streams(req: Request) -> Json<StreamResponse> {
//!     let streams = match req.resource_id() {
//!         Some("tt0032138") => vec![Stream::new(StreamSource::Url {
//!             url: "https://archive.org/download/wizard_of_oz_1939/wizard_of_oz_1939_512kb.mp4".into(),
//!         })],
//!         _ => Vec::new(),
//!     };
//!     Json(StreamResponse { streams })
//! }
//! ```
//!
//! Lower-level building blocks ([`Router`], [`Server`], [`Pipeline`]) are
//! public too, for hosts that want their own routes.

mod addon;
mod context;
mod error;
mod handler;
mod options;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;
pub mod model;

pub use addon::Addon;
pub use context::RequestContext;
pub use error::{Error, ValidationError};
pub use handler::Handler;
pub use middleware::Pipeline;
pub use options::Options;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
