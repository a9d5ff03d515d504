//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! Every route owns one handler, but handlers are different closure types and
//! middleware wraps them in further types still. The router stores all of
//! them behind one trait object:
//!
//! ```text
//! async fn get_user(req: Request) -> Result<Response, E>   ← user writes this
//!        ↓ router.get("/users/{id}", get_user)
//! get_user.into_boxed_handler()                            ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(get_user))                            ← BoxedHandler
//!        ↓ middleware::compose(&[a, b], handler)
//! a(b(handler))                                            ← still a BoxedHandler
//!        ↓ handler.call(req) at request time
//! Box::pin(async { get_user(req).await ... })              ← BoxFuture
//! ```
//!
//! A handler either produces a response or fails. Failures are reported as a
//! [`BoxError`]; the router logs them and answers with a generic 500.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::BoxError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Erased types ──────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased handler outcome.
pub type BoxFuture = Pin<Box<dyn Future<Output = Result<Response, BoxError>> + Send + 'static>>;

/// Object-safe form of a handler. Middleware receives and returns these.
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any function or closure with the shape:
///
/// ```text
/// async fn name(req: Request) -> Result<impl IntoResponse, impl Into<BoxError>>
/// ```
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

// Not reachable from outside the crate, so nobody else can implement Sealed.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R, E> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<BoxError>,
{
}

impl<F, Fut, R, E> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<BoxError>,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Bridges a concrete handler `F` to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R, E> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<BoxError>,
{
    fn call(&self, req: Request) -> BoxFuture {
        // Only the returned future is boxed, and it does not borrow `self`.
        let fut = (self.0)(req);
        Box::pin(async move {
            match fut.await {
                Ok(out) => Ok(out.into_response()),
                Err(e)  => Err(e.into()),
            }
        })
    }
}
