//! Media descriptions: catalog previews, full details, videos and links.

use serde::{Deserialize, Serialize};

use super::{is_blank, is_false};
use super::stream::Stream;

/// A summary item in a catalog listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// URL. Always written, even when empty.
    pub poster: String,

    /// `square`, `poster` or `landscape`.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub poster_shape: Option<String>,

    // Shown in the "Discover" sidebar. `genres`, `director` and `cast` are
    // being superseded by `links`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub director: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<MetaLink>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub imdb_rating: Option<String>,
    /// `"2000"` for a movie, `"2000-2014"` or `"2000-"` for a series.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub release_info: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,
}

impl MetaPreview {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            poster: poster.into(),
            poster_shape: None,
            genres: Vec::new(),
            director: Vec::new(),
            cast: Vec::new(),
            links: Vec::new(),
            imdb_rating: None,
            release_info: None,
            description: None,
        }
    }
}

/// Full details of one item, served by the meta resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDetail {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub director: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<MetaLink>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub poster_shape: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub release_info: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub imdb_rating: Option<String>,
    /// ISO 8601, e.g. `2010-12-06T05:00:00.000Z`.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub released: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub awards: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub website: Option<String>,
}

/// A link to a page inside the platform (genre, director, cast member...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetaLink {
    pub name: String,
    pub category: String,
    /// URL, usually a platform "meta link" (`stremio:///search?search=...`).
    pub url: String,
}

/// One episode or video of a [`MetaDetail`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    /// ISO 8601. Always written.
    pub released: String,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streams: Vec<Stream>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub episode: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub season: Option<String>,
    /// YouTube id.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub trailer: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub overview: Option<String>,
}
