//! Minimal addon: one catalog, one meta item, one stream.
//!
//! Run with:
//!   cargo run --example basic
//!
//! Try:
//!   curl http://localhost:8080/manifest.json
//!   curl http://localhost:8080/catalog/movie/public-domain.json
//!   curl http://localhost:8080/meta/movie/tt0032138.json
//!   curl http://localhost:8080/stream/movie/tt0032138.json
//!   curl -i -X OPTIONS http://localhost:8080/manifest.json \
//!        -H 'origin: https://app.strem.io' \
//!        -H 'access-control-request-method: GET'
//!
//! Install in the platform's client by pasting
//! `http://127.0.0.1:8080/manifest.json` into the addon search box.

use http::StatusCode;
use stremio_addon::model::{
    BehaviorHints, Catalog, CatalogResponse, ExtraProp, Manifest, MetaDetail, MetaPreview,
    MetaResponse, ResourceName, Resources, Stream, StreamResponse, StreamSource,
};
use stremio_addon::{Addon, IntoResponse, Json, Options, Request, Response};

const OZ: &str = "tt0032138";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let manifest = Manifest {
        id: "com.example.public-domain".into(),
        name: "Public Domain Movies".into(),
        description: "A tiny catalog of films in the public domain".into(),
        version: "0.1.0".into(),
        resources: Resources::Names(vec![ResourceName::Catalog, ResourceName::Meta, ResourceName::Stream]),
        types: vec!["movie".into()],
        catalogs: vec![Catalog {
            kind: "movie".into(),
            id: "public-domain".into(),
            name: "Public Domain".into(),
            extra: vec![ExtraProp {
                name: "genre".into(),
                is_required: false,
                options: vec!["Adventure".into(), "Family".into()],
                options_limit: 1,
            }],
        }],
        id_prefixes: vec!["tt".into()],
        background: None,
        logo: None,
        contact_email: None,
        behavior_hints: BehaviorHints::default(),
    };

    let addon = match Addon::new(manifest, Options::default()) {
        Ok(addon) => addon,
        Err(e) => {
            tracing::error!("cannot start addon: {e}");
            return;
        }
    };

    if let Err(e) = addon.catalog(catalog).meta(meta).stream(stream).run().await {
        tracing::error!("server error: {e}");
    }
}

// GET /catalog/movie/public-domain.json
// GET /catalog/movie/public-domain/genre=Family.json
async fn catalog(req: Request) -> Response {
    if req.resource_id() != Some("public-domain") {
        return StatusCode::NOT_FOUND.into_response();
    }
    let poster = format!("https://images.metahub.space/poster/medium/{OZ}/img");
    let mut oz = MetaPreview::new(OZ, "movie", "The Wizard of Oz", poster);
    oz.genres = vec!["Adventure".into(), "Family".into()];
    oz.release_info = Some("1939".into());

    let metas = match req.extra("genre") {
        Some(genre) if !oz.genres.iter().any(|g| g == genre) => Vec::new(),
        _ => vec![oz],
    };
    Json(CatalogResponse { metas }).into_response()
}

// GET /meta/movie/tt0032138.json
async fn meta(req: Request) -> Response {
    if req.resource_id() != Some(OZ) {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(MetaResponse {
        meta: MetaDetail {
            id: OZ.into(),
            kind: "movie".into(),
            name: "The Wizard of Oz".into(),
            released: Some("1939-08-25T00:00:00.000Z".into()),
            runtime: Some("102 min".into()),
            ..Default::default()
        },
    })
    .into_response()
}

// GET /stream/movie/tt0032138.json
async fn stream(req: Request) -> Json<StreamResponse> {
    let streams = match req.resource_id() {
        Some(OZ) => vec![
            Stream::new(StreamSource::Url {
                url: "https://archive.org/download/wizard_of_oz_1939/wizard_of_oz_1939_512kb.mp4".into(),
            })
            .with_title("512kb"),
        ],
        _ => Vec::new(),
    };
    Json(StreamResponse { streams })
}
