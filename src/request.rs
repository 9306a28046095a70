//! Incoming HTTP request type.

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Uri};

use crate::context::RequestContext;

/// An incoming HTTP request plus the values the pipeline attached to it.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    remote_addr: SocketAddr,
    context: RequestContext,
}

impl Request {
    pub(crate) fn new(
        parts: Parts,
        body: Bytes,
        params: HashMap<String, String>,
        remote_addr: SocketAddr,
    ) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params,
            remote_addr,
            context: RequestContext::now(),
        }
    }

    /// Returns the same request carrying `context` instead of its current one.
    ///
    /// The request is consumed; stages downstream only ever see the derived
    /// value.
    pub fn with_context(self, context: RequestContext) -> Self {
        Self { context, ..self }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn remote_addr(&self) -> SocketAddr { self.remote_addr }
    pub fn context(&self) -> &RequestContext { &self.context }

    /// Path and query, as the client sent them.
    pub fn url(&self) -> &str {
        self.uri
            .path_and_query()
            .map_or_else(|| self.uri.path(), |pq| pq.as_str())
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `User-Agent` header, or `""` when the client sent none.
    pub fn user_agent(&self) -> &str {
        self.header("user-agent").unwrap_or_default()
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/meta/{type}/{id}`, `req.param("type")` on
    /// `/meta/movie/tt0032138.json` returns `Some("movie")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The resource id from the path, without the protocol's `.json` suffix.
    ///
    /// On `/stream/movie/tt0032138.json` this is `Some("tt0032138")`. Catalog
    /// requests carrying an extra segment keep their plain id:
    /// `/catalog/movie/top/skip=100.json` gives `Some("top")`.
    pub fn resource_id(&self) -> Option<&str> {
        self.param("id").map(strip_json)
    }

    /// Looks up `name` in the catalog extra segment (`genre=Drama&skip=100`).
    pub fn extra(&self, name: &str) -> Option<&str> {
        strip_json(self.param("extra")?)
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

fn strip_json(segment: &str) -> &str {
    segment.strip_suffix(".json").unwrap_or(segment)
}
