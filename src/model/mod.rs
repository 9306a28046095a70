//! The protocol's wire documents.
//!
//! Field names match the platform's published schema. Presence rules are
//! declared per field:
//!
//! - required fields are always written, even when empty;
//! - optional text is `Option<String>` and written only when it holds a
//!   non-empty string;
//! - optional lists are written only when non-empty;
//! - flags are written only when `true`, counts only when non-zero.
//!
//! Nothing is ever written as `null`. Fields where exactly one alternative
//! may be present ([`Resources`], [`StreamSource`]) are enums.

mod manifest;
mod meta;
mod stream;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use manifest::{
    BehaviorHints, Catalog, ExtraProp, Manifest, ResourceDescriptor, ResourceName, Resources,
};
pub use meta::{MetaDetail, MetaLink, MetaPreview, Video};
pub use stream::{Stream, StreamSource};

// ── Response envelopes ────────────────────────────────────────────────────────

/// Body of a catalog response: `{"metas": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
}

impl CatalogResponse {
    /// Rejects a listing that repeats an id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        match self.metas.iter().find(|m| !seen.insert(m.id.as_str())) {
            Some(dup) => Err(ValidationError::DuplicateMeta(dup.id.clone())),
            None => Ok(()),
        }
    }
}

/// Body of a meta response: `{"meta": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetaResponse {
    pub meta: MetaDetail,
}

/// Body of a stream response: `{"streams": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamResponse {
    pub streams: Vec<Stream>,
}

// ── Presence helpers ──────────────────────────────────────────────────────────

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

fn is_blank(s: &Option<String>) -> bool {
    s.as_deref().is_none_or(str::is_empty)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn catalog_envelope_writes_empty_list() {
        let body = serde_json::to_value(CatalogResponse::default()).unwrap();
        assert_eq!(body, json!({ "metas": [] }));
    }

    #[test]
    fn stream_envelope_shape() {
        let res = StreamResponse {
            streams: vec![Stream::new(StreamSource::Url { url: "https://cdn/a.mp4".into() }).with_title("4K")],
        };
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({ "streams": [{ "url": "https://cdn/a.mp4", "title": "4K" }] })
        );
    }

    #[test]
    fn meta_envelope_shape() {
        let res = MetaResponse {
            meta: MetaDetail { id: "tt1".into(), kind: "movie".into(), name: "One".into(), ..Default::default() },
        };
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({ "meta": { "id": "tt1", "type": "movie", "name": "One" } })
        );
    }

    #[test]
    fn empty_optional_text_is_omitted() {
        let meta = MetaDetail {
            id: "tt1".into(),
            kind: "movie".into(),
            name: "One".into(),
            poster: Some(String::new()),
            description: Some(String::new()),
            runtime: Some("90 min".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({ "id": "tt1", "type": "movie", "name": "One", "runtime": "90 min" })
        );

        let stream = Stream::new(StreamSource::Url { url: "https://x".into() }).with_title("");
        assert_eq!(serde_json::to_value(&stream).unwrap(), json!({ "url": "https://x" }));

        let mut preview = MetaPreview::new("tt2", "movie", "Two", "");
        preview.imdb_rating = Some(String::new());
        assert_eq!(
            serde_json::to_value(&preview).unwrap(),
            json!({ "id": "tt2", "type": "movie", "name": "Two", "poster": "" })
        );
    }

    #[test]
    fn catalog_ids_must_be_unique() {
        let mut res = CatalogResponse {
            metas: vec![
                MetaPreview::new("tt1", "movie", "One", ""),
                MetaPreview::new("tt2", "movie", "Two", ""),
            ],
        };
        assert_eq!(res.validate(), Ok(()));

        res.metas.push(MetaPreview::new("tt1", "movie", "One again", ""));
        assert_eq!(res.validate(), Err(ValidationError::DuplicateMeta("tt1".into())));
    }
}
