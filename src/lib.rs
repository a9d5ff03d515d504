//! # waymark
//!
//! A request router that maps `(method, path)` to a handler, captures named
//! path variables, and wraps each route in its own middleware chain.
//!
//! ## How a route is chosen
//!
//! Every route gets a specificity score: `10000` if it is bound to a method,
//! plus `1000` per literal segment and `1` per `{param}` segment. Dispatch
//! tries routes from the highest score down and takes the first match, so
//! `/users/me` wins over `/users/{id}` and a `GET` route wins over a route
//! that accepts any method. Equal scores resolve in registration order.
//!
//! Matching is linear: a path matches when it has exactly as many components
//! as the pattern has segments, and every literal segment is equal to its
//! component.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use waymark::{middleware, BoxError, Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .middleware("trace", middleware::trace())
//!         .route("GET", "/users/{id}", get_user, &["trace"])
//!         .post("/users", create_user);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn get_user(req: Request) -> Result<Response, BoxError> {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Ok(Response::json(format!(r#"{{"id":"{id}"}}"#)))
//! }
//!
//! async fn create_user(req: Request) -> Result<Response, BoxError> {
//!     if req.body().is_empty() {
//!         return Ok(Response::status(400));
//!     }
//!     Ok(Response::status(201).with_header("location", "/users/99"))
//! }
//! ```
//!
//! A handler that returns `Err` is answered with a generic `500`; the error
//! is logged with `tracing` and never reaches the client. A request no route
//! matches is answered with `404`.

mod error;
mod handler;
mod method;
mod params;
mod request;
mod response;
mod route;
mod router;
mod server;

pub mod matcher;
pub mod middleware;
pub mod pattern;

pub use error::{BoxError, Error};
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use matcher::TrailingSlash;
pub use method::Method;
pub use params::{PathParams, RouteContext};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use route::score;
pub use router::{Matched, Router};
pub use server::Server;
