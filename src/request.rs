//! Incoming request handle.

use bytes::Bytes;
use http::request::Parts;
use http::{Method, Uri};

use crate::params::{PathParams, RouteContext};

/// An incoming request together with what routing learned about it.
///
/// The host builds one from an `http::Request<Bytes>`; the router fills in
/// the [`RouteContext`] before the handler chain runs.
pub struct Request {
    parts: Parts,
    body: Bytes,
    context: RouteContext,
}

impl Request {
    /// A bodiless request, mostly useful in tests.
    pub fn new(method: Method, uri: Uri) -> Self {
        let mut req = http::Request::new(Bytes::new());
        *req.method_mut() = method;
        *req.uri_mut() = uri;
        req.into()
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn path(&self) -> &str { self.parts.uri.path() }
    pub fn uri(&self) -> &Uri { &self.parts.uri }
    pub fn headers(&self) -> &http::HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    /// Header value as text. Missing and non-ASCII values are both `None`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.context.params.get(name)
    }

    pub fn params(&self) -> &PathParams {
        &self.context.params
    }

    /// The matched route template, e.g. `"GET /users/{id}"`. Empty until routed.
    pub fn pattern(&self) -> &str {
        &self.context.pattern
    }

    pub fn context(&self) -> &RouteContext {
        &self.context
    }

    pub(crate) fn set_context(&mut self, context: RouteContext) {
        self.context = context;
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self { parts, body, context: RouteContext::default() }
    }
}
