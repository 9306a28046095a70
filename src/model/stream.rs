//! Playable sources.
//!
//! A stream has exactly one source. [`StreamSource`] makes that structural
//! when encoding; decoding counts the source keys and rejects a document
//! with none or several, instead of guessing which one the producer meant.

use serde::{Deserialize, Serialize};

use super::is_blank;
use crate::error::ValidationError;

/// A playable source for a video.
///
/// ```rust
/// use stremio_addon::model::{Stream, StreamSource};
///
/// let stream = Stream::new(StreamSource::Torrent {
///     info_hash: "abc123".into(),
///     file_idx: Some(2),
/// });
/// assert_eq!(
///     serde_json::to_string(&stream).unwrap(),
///     r#"{"infoHash":"abc123","fileIdx":2}"#,
/// );
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StreamDocument")]
pub struct Stream {
    #[serde(flatten)]
    pub source: StreamSource,
    /// Usually the quality, e.g. `"1080p"`.
    #[serde(skip_serializing_if = "is_blank")]
    pub title: Option<String>,
}

impl Stream {
    pub fn new(source: StreamSource) -> Self {
        Self { source, title: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Where the bytes come from. Each variant writes only its own keys.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StreamSource {
    /// Direct HTTP(S) URL.
    Url { url: String },
    YouTube {
        #[serde(rename = "ytId")]
        yt_id: String,
    },
    /// BitTorrent info hash, with the index of the file to play inside the
    /// torrent. `None` lets the player pick.
    Torrent {
        #[serde(rename = "infoHash")]
        info_hash: String,
        #[serde(rename = "fileIdx", skip_serializing_if = "Option::is_none")]
        file_idx: Option<u32>,
    },
    /// Opened outside the player, e.g. in a browser.
    External {
        #[serde(rename = "externalUrl")]
        external_url: String,
    },
}

impl StreamSource {
    /// The wire key that identifies this variant.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Url { .. }      => "url",
            Self::YouTube { .. }  => "ytId",
            Self::Torrent { .. }  => "infoHash",
            Self::External { .. } => "externalUrl",
        }
    }
}

/// The stream as it appears on the wire, every source optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamDocument {
    url: Option<String>,
    yt_id: Option<String>,
    info_hash: Option<String>,
    file_idx: Option<u32>,
    external_url: Option<String>,
    title: Option<String>,
}

impl TryFrom<StreamDocument> for Stream {
    type Error = ValidationError;

    fn try_from(doc: StreamDocument) -> Result<Self, Self::Error> {
        let mut sources = Vec::with_capacity(1);
        if let Some(url) = doc.url {
            sources.push(StreamSource::Url { url });
        }
        if let Some(yt_id) = doc.yt_id {
            sources.push(StreamSource::YouTube { yt_id });
        }
        if let Some(info_hash) = doc.info_hash {
            sources.push(StreamSource::Torrent { info_hash, file_idx: doc.file_idx });
        }
        if let Some(external_url) = doc.external_url {
            sources.push(StreamSource::External { external_url });
        }

        if sources.len() > 1 {
            let keys = sources.iter().map(StreamSource::key).collect::<Vec<_>>().join(", ");
            return Err(ValidationError::AmbiguousStream(keys));
        }
        match sources.pop() {
            Some(source) => Ok(Self { source, title: doc.title }),
            None => Err(ValidationError::StreamWithoutSource),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn torrent_writes_hash_and_index_only() {
        let stream = Stream::new(StreamSource::Torrent { info_hash: "abc123".into(), file_idx: Some(2) });
        let value = serde_json::to_value(&stream).unwrap();
        assert_eq!(value, json!({ "infoHash": "abc123", "fileIdx": 2 }));
        for absent in ["url", "ytId", "externalUrl", "title"] {
            assert!(value.get(absent).is_none(), "{absent} should be absent");
        }
    }

    #[test]
    fn title_is_written_when_set() {
        let stream = Stream::new(StreamSource::Torrent { info_hash: "abc123".into(), file_idx: Some(2) })
            .with_title("1080p");
        assert_eq!(
            serde_json::to_value(&stream).unwrap(),
            json!({ "infoHash": "abc123", "fileIdx": 2, "title": "1080p" })
        );
    }

    #[test]
    fn torrent_without_index_omits_it() {
        let stream = Stream::new(StreamSource::Torrent { info_hash: "abc123".into(), file_idx: None });
        assert_eq!(serde_json::to_value(&stream).unwrap(), json!({ "infoHash": "abc123" }));
    }

    #[test]
    fn each_variant_uses_its_wire_key() {
        let cases = [
            (StreamSource::Url { url: "https://cdn/x.mp4".into() }, json!({ "url": "https://cdn/x.mp4" })),
            (StreamSource::YouTube { yt_id: "aqz-KE-bpKQ".into() }, json!({ "ytId": "aqz-KE-bpKQ" })),
            (
                StreamSource::External { external_url: "https://example.com/watch".into() },
                json!({ "externalUrl": "https://example.com/watch" }),
            ),
        ];
        for (source, expected) in cases {
            assert_eq!(serde_json::to_value(Stream::new(source)).unwrap(), expected);
        }
    }

    #[test]
    fn decodes_single_source() {
        let stream: Stream =
            serde_json::from_value(json!({ "infoHash": "abc123", "fileIdx": 0, "title": "720p" })).unwrap();
        assert_eq!(stream.source, StreamSource::Torrent { info_hash: "abc123".into(), file_idx: Some(0) });
        assert_eq!(stream.title.as_deref(), Some("720p"));
    }

    #[test]
    fn stray_file_index_is_ignored() {
        let stream: Stream = serde_json::from_value(json!({ "url": "https://cdn/x.mp4", "fileIdx": 3 })).unwrap();
        assert_eq!(stream.source, StreamSource::Url { url: "https://cdn/x.mp4".into() });
    }

    #[test]
    fn rejects_two_sources() {
        let err = serde_json::from_value::<Stream>(json!({ "url": "https://cdn/x.mp4", "infoHash": "abc123" }))
            .unwrap_err();
        assert!(err.to_string().contains("url, infoHash"), "{err}");
    }

    #[test]
    fn rejects_missing_source() {
        let err = serde_json::from_value::<Stream>(json!({ "title": "nothing to play" })).unwrap_err();
        assert!(err.to_string().contains("no source"), "{err}");
    }

    #[test]
    fn nested_list_rejects_one_bad_entry() {
        let doc: Value = json!([{ "ytId": "a" }, { "ytId": "b", "externalUrl": "https://c" }]);
        assert!(serde_json::from_value::<Vec<Stream>>(doc).is_err());
    }
}
