//! Matching a concrete request path against compiled segments.
//!
//! Unlike the pattern compiler, the matcher keeps empty components: the
//! request path loses its single leading `/` and the rest is split as-is.
//!
//! | path | components |
//! |---|---|
//! | `/` or empty | none |
//! | `/users/42` | `users`, `42` |
//! | `/users/42/` | `users`, `42`, `""` |
//! | `/users//42` | `users`, `""`, `42` |
//!
//! So `/users/42/` does not match `/users/{id}` under
//! [`TrailingSlash::Strict`]. [`TrailingSlash::Trim`] drops one trailing
//! `/` first.

use crate::params::PathParams;
use crate::pattern::Segment;

/// How a trailing `/` on the request path is treated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TrailingSlash {
    /// The trailing slash is an extra empty component.
    #[default]
    Strict,
    /// One trailing slash is removed before splitting.
    Trim,
}

/// Matches `path` against `segments`, returning the captured variables.
///
/// Fails fast when the component count differs from the segment count.
pub fn match_path(segments: &[Segment], path: &str, trailing: TrailingSlash) -> Option<PathParams> {
    let mut rest = path.strip_prefix('/').unwrap_or(path);
    if trailing == TrailingSlash::Trim {
        rest = rest.strip_suffix('/').unwrap_or(rest);
    }

    let components: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    };

    if components.len() != segments.len() {
        return None;
    }

    let mut params = PathParams::new();
    for (segment, component) in segments.iter().zip(components) {
        match segment {
            Segment::Literal(value) if **value == *component => {}
            Segment::Literal(_)                             => return None,
            Segment::Param(name)                            => params.insert(name, component),
        }
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile;

    fn strict(pattern: &str, path: &str) -> Option<PathParams> {
        match_path(&compile(pattern), path, TrailingSlash::Strict)
    }

    #[test]
    fn literal_paths_match_themselves_with_no_params() {
        for pattern in ["/", "/users", "/api/v1/users", "/a/b/c/d"] {
            let params = strict(pattern, pattern).expect(pattern);
            assert!(params.is_empty());
        }
    }

    #[test]
    fn literal_mismatch_fails() {
        assert!(strict("/users", "/user").is_none());
        assert!(strict("/api/v1/users", "/api/v2/users").is_none());
        assert!(strict("/users", "/Users").is_none());
    }

    #[test]
    fn component_count_must_agree() {
        assert!(strict("/users/{id}", "/users").is_none());
        assert!(strict("/users/{id}", "/users/42/extra").is_none());
        assert!(strict("/", "/users").is_none());
    }

    #[test]
    fn params_capture_their_component() {
        let params = strict("/users/{id}/posts/{post}", "/users/42/posts/7").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("post"), Some("7"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn duplicate_names_keep_the_last_capture() {
        let params = strict("/{x}/{x}", "/first/second").unwrap();
        assert_eq!(params.get("x"), Some("second"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn empty_components_are_not_normalized() {
        assert!(strict("/users/{id}", "/users/42/").is_none());
        assert!(strict("/users/{id}", "/users//42").is_none());
        // An empty component can still be captured by a parameter.
        let params = strict("/users/{id}", "/users/").unwrap();
        assert_eq!(params.get("id"), Some(""));
    }

    #[test]
    fn trim_policy_ignores_one_trailing_slash() {
        let segments = compile("/users/{id}");
        let params = match_path(&segments, "/users/42/", TrailingSlash::Trim).unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert!(match_path(&segments, "/users/42//", TrailingSlash::Trim).is_none());
        assert!(match_path(&compile("/"), "/", TrailingSlash::Trim).is_some());
    }

    #[test]
    fn path_without_leading_slash_is_accepted() {
        assert!(strict("/users", "users").is_some());
        assert!(strict("/", "").is_some());
    }
}
