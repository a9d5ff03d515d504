//! Middleware layer.
//!
//! A [`Middleware`] is a decorator: it takes the handler it wraps and returns
//! the wrapping handler. The router keeps a table of middleware by
//! [`MiddlewareKey`]; each route names the keys it wants, in order, and the
//! chain is composed once at registration.
//!
//! ```rust
//! use waymark::middleware::{self, Next};
//! use waymark::{Request, Response, Router, BoxError};
//!
//! let auth = middleware::from_fn(|req: Request, next: Next| async move {
//!     if req.header("authorization").is_none() {
//!         // Short-circuit: nothing inward of this runs.
//!         return Ok(Response::status(401));
//!     }
//!     next.run(req).await
//! });
//!
//! async fn admin(_req: Request) -> Result<Response, BoxError> {
//!     Ok(Response::text("welcome"))
//! }
//!
//! let app = Router::new()
//!     .middleware("auth", auth)
//!     .middleware("trace", middleware::trace())
//!     .route("GET", "/admin", admin, &["trace", "auth"]);
//! ```
//!
//! Listed order is execution order: the first key's pre-logic runs first and
//! its post-logic runs last.

mod trace;

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::BoxError;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;
use crate::response::Response;

pub use trace::trace;

/// Wraps a handler in another handler.
pub type Middleware = Arc<dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static>;

/// Name under which a [`Middleware`] is registered on the router.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MiddlewareKey(Cow<'static, str>);

impl From<&'static str> for MiddlewareKey {
    fn from(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }
}

impl From<String> for MiddlewareKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl Borrow<str> for MiddlewareKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MiddlewareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applies `chain` around `handler`, last entry innermost.
pub fn compose(chain: &[Middleware], handler: BoxedHandler) -> BoxedHandler {
    chain.iter().rev().fold(handler, |inner, mw| mw(inner))
}

/// The rest of the chain, handed to a [`from_fn`] middleware.
pub struct Next(BoxedHandler);

impl Next {
    /// Runs everything inward of the current middleware.
    pub async fn run(self, req: Request) -> Result<Response, BoxError> {
        self.0.call(req).await
    }
}

/// Builds a [`Middleware`] from an async function of the request and the
/// remaining chain.
///
/// Not calling [`Next::run`] short-circuits the chain.
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, BoxError>> + Send + 'static,
{
    let f = Arc::new(f);
    Arc::new(move |next: BoxedHandler| -> BoxedHandler {
        Arc::new(FromFn { f: Arc::clone(&f), next })
    })
}

struct FromFn<F> {
    f: Arc<F>,
    next: BoxedHandler,
}

impl<F, Fut> ErasedHandler for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, BoxError>> + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        Box::pin((self.f)(req, Next(Arc::clone(&self.next))))
    }
}
