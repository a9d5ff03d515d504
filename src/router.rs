//! Route registry and dispatch.
//!
//! Routes are kept in registration order. Dispatch walks them in
//! specificity order, which is computed lazily: the first dispatch after any
//! registration sorts once, and every dispatch after that reuses the result.
//!
//! The order lives in a [`OnceLock`]. Registration takes `&mut self` and
//! clears it; dispatch takes `&self` and fills it at most once, so callers
//! racing on the first dispatch all wait for the same finished sort and none
//! of them can see a half-sorted table.
//!
//! First match wins. Because routes are tried most-specific first, that is
//! the most specific match for genuinely overlapping patterns; routes with
//! equal scores are tried in registration order.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, error, trace, warn};

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::matcher::{TrailingSlash, match_path};
use crate::method::Method;
use crate::middleware::{self, Middleware, MiddlewareKey};
use crate::params::{PathParams, RouteContext};
use crate::pattern;
use crate::request::Request;
use crate::response::Response;
use crate::route::{Route, dispatch_order};

/// A successful dispatch: the composed handler and what the match captured.
pub struct Matched {
    pub handler: BoxedHandler,
    pub params: PathParams,
    pub pattern: Arc<str>,
}

/// The application router.
///
/// Build it once at startup, then share it (`Arc<Router>`) with whatever
/// dispatches requests. Builder methods return `self` so registrations chain.
///
/// ```rust
/// use waymark::{BoxError, Method, Request, Response, Router};
///
/// async fn get_user(req: Request) -> Result<Response, BoxError> {
///     Ok(Response::text(format!("user {}", req.param("id").unwrap_or("?"))))
/// }
///
/// let app = Router::new()
///     .get("/users/{id}", get_user)
///     .on(Method::Delete, "/users/{id}", get_user);
///
/// let hit = app.dispatch("GET", "/users/42").unwrap();
/// assert_eq!(hit.params.get("id"), Some("42"));
/// assert_eq!(&*hit.pattern, "GET /users/{id}");
/// assert!(app.dispatch("GET", "/users/42/extra").is_none());
/// ```
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
    middleware: HashMap<MiddlewareKey, Middleware>,
    /// Dispatch order as indices into `routes`. Unset until the next dispatch
    /// after a registration.
    order: OnceLock<Vec<usize>>,
    trailing_slash: TrailingSlash,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how a trailing `/` on request paths is treated. Default: strict.
    pub fn trailing_slash(mut self, policy: TrailingSlash) -> Self {
        self.trailing_slash = policy;
        self
    }

    /// Makes `mw` available to routes registered after this call under `key`.
    pub fn middleware(mut self, key: impl Into<MiddlewareKey>, mw: Middleware) -> Self {
        self.register_middleware(key, mw);
        self
    }

    pub fn register_middleware(&mut self, key: impl Into<MiddlewareKey>, mw: Middleware) {
        let key = key.into();
        debug!(%key, "middleware registered");
        if self.middleware.insert(key.clone(), mw).is_some() {
            debug!(%key, "middleware key replaced");
        }
    }

    /// Registers `handler` for `method` + `pattern`. Returns `self` for chaining.
    pub fn on(mut self, method: Method, pattern: &str, handler: impl Handler) -> Self {
        self.insert(Some(method), pattern, handler, &[]);
        self
    }

    /// Registers `handler` for every method.
    pub fn any(mut self, pattern: &str, handler: impl Handler) -> Self {
        self.insert(None, pattern, handler, &[]);
        self
    }

    pub fn get(self, pattern: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, pattern, handler)
    }

    pub fn post(self, pattern: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, pattern, handler)
    }

    pub fn put(self, pattern: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, pattern, handler)
    }

    pub fn patch(self, pattern: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, pattern, handler)
    }

    pub fn delete(self, pattern: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, pattern, handler)
    }

    /// Registers a route wrapped in the middleware named by `keys`.
    pub fn route(
        mut self,
        method: &str,
        pattern: &str,
        handler: impl Handler,
        keys: &[&str],
    ) -> Self {
        self.register(method, pattern, handler, keys);
        self
    }

    /// Registers a route. An empty `method` matches any method; any other
    /// string, standard or not, binds the route to exactly that method.
    ///
    /// Each key in `keys` is looked up in the middleware table; unknown keys
    /// are skipped. The chain runs in listed order around `handler`.
    /// Registration never fails: whatever `pattern` compiles to is what the
    /// route matches.
    pub fn register(&mut self, method: &str, pattern: &str, handler: impl Handler, keys: &[&str]) {
        let method = (!method.is_empty()).then(|| Method::from(method));
        self.insert(method, pattern, handler, keys);
    }

    fn insert(&mut self, method: Option<Method>, pattern: &str, handler: impl Handler, keys: &[&str]) {
        let chain: Vec<Middleware> = keys
            .iter()
            .filter_map(|&key| match self.middleware.get(key) {
                Some(mw) => Some(Arc::clone(mw)),
                None => {
                    warn!(key, pattern, "unknown middleware key skipped");
                    None
                }
            })
            .collect();

        let handler = middleware::compose(&chain, handler.into_boxed_handler());
        let route = Route::new(method, pattern, handler);

        for warning in pattern::validate(&route.segments) {
            warn!(pattern = %route.pattern, "{warning}");
        }
        debug!(pattern = %route.pattern, score = route.score, middleware = chain.len(), "route registered");

        self.routes.push(route);
        self.order = OnceLock::new();
    }

    /// Sorts the route table now rather than on the first dispatch.
    ///
    /// Idempotent. The server calls this before accepting connections.
    pub fn seal(&self) {
        self.order();
    }

    /// `(pattern, score)` for every route, in dispatch order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order()
            .iter()
            .map(|&i| (&*self.routes[i].pattern, self.routes[i].score))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the first route, in specificity order, that accepts `method`
    /// and matches `path`. `None` means no route matched.
    pub fn dispatch(&self, method: &str, path: &str) -> Option<Matched> {
        for &i in self.order() {
            let route = &self.routes[i];
            if !route.accepts(method) {
                continue;
            }
            if let Some(params) = match_path(&route.segments, path, self.trailing_slash) {
                trace!(method, path, pattern = %route.pattern, "route matched");
                return Some(Matched {
                    handler: Arc::clone(&route.handler),
                    params,
                    pattern: Arc::clone(&route.pattern),
                });
            }
        }

        trace!(method, path, "no route matched");
        None
    }

    /// Routes `req` and runs its handler chain.
    ///
    /// No match answers `404`. A failing handler answers `500` with a
    /// generic body; the cause is logged and not sent to the client.
    pub async fn call(&self, mut req: Request) -> Response {
        let Some(matched) = self.dispatch(req.method().as_str(), req.path()) else {
            return Response::not_found();
        };

        let pattern = Arc::clone(&matched.pattern);
        req.set_context(RouteContext { params: matched.params, pattern: matched.pattern });

        match matched.handler.call(req).await {
            Ok(res) => res,
            Err(e) => {
                let err = Error::Handler(e);
                error!(pattern = %pattern, error = %err, "handler failed");
                Response::internal_error()
            }
        }
    }

    fn order(&self) -> &[usize] {
        self.order.get_or_init(|| {
            debug!(routes = self.routes.len(), "sorting routes by specificity");
            dispatch_order(&self.routes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;

    async fn ok(_req: Request) -> Result<Response, BoxError> {
        Ok(Response::empty())
    }

    fn patterns(router: &Router) -> Vec<String> {
        router.routes().map(|(p, _)| p.to_owned()).collect()
    }

    #[test]
    fn literal_routes_sort_before_parameterized_ones() {
        let router = Router::new()
            .get("/users/{id}", ok)
            .get("/users/me", ok)
            .any("/users/admin", ok);

        assert_eq!(patterns(&router), ["GET /users/me", "GET /users/{id}", "/users/admin"]);
        assert_eq!(&*router.dispatch("GET", "/users/me").unwrap().pattern, "GET /users/me");
        assert_eq!(&*router.dispatch("GET", "/users/7").unwrap().pattern, "GET /users/{id}");
        // The method-bound parameter route outranks the wildcard literal.
        assert_eq!(&*router.dispatch("GET", "/users/admin").unwrap().pattern, "GET /users/{id}");
        assert_eq!(&*router.dispatch("POST", "/users/admin").unwrap().pattern, "/users/admin");
    }

    #[test]
    fn equal_scores_keep_registration_order() {
        let router = Router::new()
            .get("/{a}", ok)
            .get("/{b}", ok);

        for _ in 0..3 {
            let hit = router.dispatch("GET", "/x").unwrap();
            assert_eq!(&*hit.pattern, "GET /{a}");
            assert_eq!(hit.params.get("a"), Some("x"));
        }
    }

    #[test]
    fn registering_after_dispatch_resorts() {
        let mut router = Router::new().get("/{id}", ok);
        assert_eq!(&*router.dispatch("GET", "/me").unwrap().pattern, "GET /{id}");

        router.register("GET", "/me", ok, &[]);
        assert_eq!(&*router.dispatch("GET", "/me").unwrap().pattern, "GET /me");
    }

    #[test]
    fn method_filter_and_wildcard() {
        let router = Router::new()
            .post("/items", ok)
            .any("/ping", ok);

        assert!(router.dispatch("GET", "/items").is_none());
        assert!(router.dispatch("POST", "/items").is_some());
        assert!(router.dispatch("BREW", "/ping").is_some());
    }

    #[test]
    fn extension_methods_bind_without_becoming_wildcards() {
        let mut router = Router::new().on(Method::Purge, "/cache", ok);
        router.register("BREW", "/pot", ok, &[]);

        assert_eq!(&*router.dispatch("PURGE", "/cache").unwrap().pattern, "PURGE /cache");
        assert!(router.dispatch("GET", "/cache").is_none());
        assert_eq!(&*router.dispatch("BREW", "/pot").unwrap().pattern, "BREW /pot");
        assert!(router.dispatch("GET", "/pot").is_none());
        assert!(router.dispatch("brew", "/pot").is_none());
    }

    #[test]
    fn empty_method_string_registers_a_wildcard() {
        let mut router = Router::new();
        router.register("", "/ping", ok, &[]);

        let hit = router.dispatch("OPTIONS", "/ping").unwrap();
        assert_eq!(&*hit.pattern, "/ping");
        assert_eq!(router.routes().next(), Some(("/ping", 1_000)));
    }

    #[test]
    fn trailing_slash_policy_is_applied() {
        let strict = Router::new().get("/users/{id}", ok);
        assert!(strict.dispatch("GET", "/users/1/").is_none());

        let trim = Router::new().trailing_slash(TrailingSlash::Trim).get("/users/{id}", ok);
        assert!(trim.dispatch("GET", "/users/1/").is_some());
    }

    #[test]
    fn empty_router_matches_nothing() {
        let router = Router::new();
        assert!(router.is_empty());
        router.seal();
        assert!(router.dispatch("GET", "/").is_none());
    }
}
