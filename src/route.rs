//! Registered routes and their specificity score.

use std::sync::Arc;

use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::pattern::{self, Segment};

const METHOD_WEIGHT: u64 = 10_000;
const LITERAL_WEIGHT: u64 = 1_000;
const PARAM_WEIGHT: u64 = 1;

/// A compiled route. Built once at registration and never mutated.
pub(crate) struct Route {
    /// `None` accepts any method.
    pub(crate) method: Option<Method>,
    pub(crate) segments: Vec<Segment>,
    pub(crate) handler: BoxedHandler,
    /// Display form handed to handlers, e.g. `"GET /users/{id}"`.
    pub(crate) pattern: Arc<str>,
    pub(crate) score: u64,
}

impl Route {
    pub(crate) fn new(method: Option<Method>, raw: &str, handler: BoxedHandler) -> Self {
        let segments = pattern::compile(raw);
        let score = score(method.is_some(), &segments);
        let pattern: Arc<str> = match &method {
            Some(m) => format!("{m} {raw}").into(),
            None    => raw.into(),
        };
        Self { method, segments, handler, pattern, score }
    }

    pub(crate) fn accepts(&self, method: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m.as_str() == method)
    }
}

/// Ranks a route for ordering; higher is tried first.
///
/// A method-bound route always outranks a wildcard one. After that each
/// literal segment outweighs any realistic number of parameters, and the
/// parameter count only separates routes with equal literal counts.
///
/// ```rust
/// use waymark::pattern::compile;
/// use waymark::score;
///
/// assert_eq!(score(true, &compile("/users/{id}")), 11_001);
/// assert_eq!(score(false, &compile("/users")), 1_000);
/// ```
pub fn score(method_bound: bool, segments: &[Segment]) -> u64 {
    let base = if method_bound { METHOD_WEIGHT } else { 0 };
    segments.iter().fold(base, |acc, s| {
        acc.saturating_add(if s.is_param() { PARAM_WEIGHT } else { LITERAL_WEIGHT })
    })
}

/// Indices of `routes` in dispatch order: descending score, ties in
/// registration order.
pub(crate) fn dispatch_order(routes: &[Route]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..routes.len()).collect();
    // `sort_by_key` is stable.
    order.sort_by_key(|&i| std::cmp::Reverse(routes[i].score));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use crate::response::Response;

    async fn noop(_req: crate::Request) -> Result<Response, crate::BoxError> {
        Ok(Response::empty())
    }

    fn route(method: Option<Method>, raw: &str) -> Route {
        Route::new(method, raw, noop.into_boxed_handler())
    }

    #[test]
    fn score_counts_method_literals_and_params() {
        assert_eq!(route(Some(Method::Get), "/users/{id}").score, 11_001);
        assert_eq!(route(None, "/users/{id}").score, 1_001);
        assert_eq!(route(Some(Method::Post), "/").score, 10_000);
        assert_eq!(route(None, "/{a}/{b}/{c}").score, 3);
        assert_eq!(route(None, "/a/b/{c}").score, 2_001);
    }

    #[test]
    fn method_bound_outranks_any_wildcard_shape() {
        let bound = route(Some(Method::Get), "/{x}");
        let wildcard = route(None, "/a/b/c/d/e/f/g/h/i");
        assert!(bound.score > wildcard.score);
    }

    #[test]
    fn pattern_string_includes_the_method() {
        assert_eq!(&*route(Some(Method::Get), "/users/{id}").pattern, "GET /users/{id}");
        assert_eq!(&*route(None, "/health").pattern, "/health");
    }

    #[test]
    fn order_is_descending_and_stable() {
        let routes = vec![
            route(None, "/{a}"),                // 1
            route(Some(Method::Get), "/{id}"),  // 10001
            route(None, "/users"),              // 1000
            route(Some(Method::Get), "/{x}"),   // 10001, registered later
            route(None, "/users/{id}"),         // 1001
        ];
        assert_eq!(dispatch_order(&routes), vec![1, 3, 4, 2, 0]);
    }

    #[test]
    fn wildcard_route_accepts_every_method() {
        let any = route(None, "/");
        assert!(any.accepts("GET"));
        assert!(any.accepts("BREW"));

        let get = route(Some(Method::Get), "/");
        assert!(get.accepts("GET"));
        assert!(!get.accepts("POST"));
    }

    #[test]
    fn score_does_not_wrap_past_u32() {
        // Empty literals don't allocate; only the Vec itself does.
        let segments = vec![Segment::Literal("".into()); 4_300_000];
        assert_eq!(score(true, &segments), 10_000 + 4_300_000_000);
        assert!(score(true, &segments) > u64::from(u32::MAX));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::pattern::compile;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_score_is_weighted_sum(
            bound in any::<bool>(),
            kinds in prop::collection::vec(any::<bool>(), 0..12),
        ) {
            let raw: String = kinds
                .iter()
                .enumerate()
                .map(|(i, &param)| if param { format!("/{{p{i}}}") } else { format!("/lit{i}") })
                .collect();
            let params = kinds.iter().filter(|&&p| p).count() as u64;
            let literals = kinds.len() as u64 - params;

            let expected = 10_000 * u64::from(bound) + 1_000 * literals + params;
            prop_assert_eq!(score(bound, &compile(&raw)), expected);
        }
    }
}
