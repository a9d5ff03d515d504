//! Per-request match results.

use std::collections::HashMap;
use std::sync::Arc;

/// Path variables captured by a successful match, keyed by parameter name.
///
/// A pattern that repeats a name keeps the last capture.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_owned(), value.to_owned());
    }
}

/// What the router attaches to a request before calling its handler.
///
/// `pattern` is the route template as registered, prefixed with the method
/// for method-bound routes: `"GET /users/{id}"`, or `"/health"` for a route
/// that accepts any method.
#[derive(Clone, Debug, Default)]
pub struct RouteContext {
    pub params: PathParams,
    pub pattern: Arc<str>,
}
