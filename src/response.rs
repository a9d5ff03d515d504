//! Outgoing response type and the [`IntoResponse`] conversion trait.
//!
//! The router does not care how bodies are produced. A handler hands back
//! bytes, a status and headers; the host writes them.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;

/// An outgoing response.
///
/// ```rust
/// use waymark::Response;
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(204);
/// Response::status(201).with_header("location", "/users/42");
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// `200 OK`, no body.
    pub fn empty() -> Self {
        Self { status: StatusCode::OK, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// `200 OK`, `application/json`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::with_type("application/json", body.into())
    }

    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_type("text/plain; charset=utf-8", Bytes::from(body.into()))
    }

    /// Response with no body. Codes outside 100..=999 become `500`.
    pub fn status(code: u16) -> Self {
        Self::empty().with_status(code)
    }

    pub fn with_status(mut self, code: u16) -> Self {
        self.status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self
    }

    /// Adds a header. Names or values that are not valid HTTP are dropped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.append(name, value);
        }
        self
    }

    pub fn status_code(&self) -> u16 { self.status.as_u16() }
    pub fn body(&self) -> &Bytes { &self.body }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub(crate) fn not_found() -> Self {
        Self::text("Not found.").with_status(404)
    }

    /// What the client sees when a handler fails. The cause stays server-side.
    pub(crate) fn internal_error() -> Self {
        Self::text("Internal server error.").with_status(500)
    }

    /// Converts into the `http` type the host writes out.
    pub fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }

    fn with_type(content_type: &'static str, body: Bytes) -> Self {
        let mut res = Self::empty();
        res.headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        res.body = body;
        res
    }
}

/// Conversion into a [`Response`].
///
/// Implement on your own types to return them from handlers.
///
/// ```rust,ignore
/// use serde::Serialize;
/// use waymark::{IntoResponse, Response};
///
/// struct Json<T: Serialize>(T);
///
/// impl<T: Serialize> IntoResponse for Json<T> {
///     fn into_response(self) -> Response {
///         match serde_json::to_vec(&self.0) {
///             Ok(bytes) => Response::json(bytes),
///             Err(_)    => Response::status(500),
///         }
///     }
/// }
/// ```
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a bare status from a handler: `Ok(StatusCode::NO_CONTENT)`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self.as_u16()) }
}

impl IntoResponse for () {
    fn into_response(self) -> Response { Response::empty() }
}
