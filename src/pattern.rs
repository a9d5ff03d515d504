//! Pattern compilation.
//!
//! A pattern is a `/`-separated list of components. `{name}` captures one
//! path component under `name`; anything else must match verbatim.
//!
//! ```rust
//! use waymark::pattern::{compile, Segment};
//!
//! assert_eq!(
//!     compile("/users/{id}"),
//!     vec![Segment::Literal("users".into()), Segment::Param("id".into())],
//! );
//! // Empty components are dropped, so these all compile the same way.
//! assert_eq!(compile("/users/"), compile("users"));
//! ```
//!
//! The compiler never fails. Parameter names are taken as written: no
//! character-set or uniqueness checks happen here. [`validate`] reports the
//! suspicious cases for callers that want to hear about them.

use std::fmt;

/// One compiled component of a route pattern.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(Box<str>),
    /// Matches any single component and records it under this name.
    Param(Box<str>),
}

impl Segment {
    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Param(name)    => write!(f, "{{{name}}}"),
        }
    }
}

/// Compiles `pattern` into its segment sequence.
///
/// An empty or all-slash pattern compiles to no segments.
pub fn compile(pattern: &str) -> Vec<Segment> {
    pattern
        .split('/')
        .filter(|part| !part.is_empty())
        .map(|part| match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            Some(name) => Segment::Param(name.into()),
            None       => Segment::Literal(part.into()),
        })
        .collect()
}

/// Something odd about a compiled pattern. Never fatal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PatternWarning {
    /// `{}`: the capture is stored under the empty string.
    EmptyParamName { position: usize },
    /// The same name appears twice; the later capture overwrites the earlier.
    DuplicateParamName { name: Box<str> },
}

impl fmt::Display for PatternWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyParamName { position } => {
                write!(f, "segment {position} is a parameter with an empty name")
            }
            Self::DuplicateParamName { name } => {
                write!(f, "parameter `{name}` appears more than once, last capture wins")
            }
        }
    }
}

/// Reports empty and duplicate parameter names in `segments`.
pub fn validate(segments: &[Segment]) -> Vec<PatternWarning> {
    let mut warnings = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for (position, segment) in segments.iter().enumerate() {
        let Segment::Param(name) = segment else { continue };

        if name.is_empty() {
            warnings.push(PatternWarning::EmptyParamName { position });
        }
        if seen.contains(&&**name) {
            warnings.push(PatternWarning::DuplicateParamName { name: name.clone() });
        } else {
            seen.push(&**name);
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment { Segment::Literal(s.into()) }
    fn param(s: &str) -> Segment { Segment::Param(s.into()) }

    #[test]
    fn literal_and_param_components() {
        assert_eq!(
            compile("/users/{id}/posts/{post_id}"),
            vec![lit("users"), param("id"), lit("posts"), param("post_id")],
        );
    }

    #[test]
    fn empty_components_are_dropped() {
        let expected = vec![lit("users")];
        assert_eq!(compile("/users"), expected);
        assert_eq!(compile("/users/"), expected);
        assert_eq!(compile("users"), expected);
        assert_eq!(compile("//users//"), expected);
    }

    #[test]
    fn degenerate_patterns_compile_to_nothing() {
        assert!(compile("").is_empty());
        assert!(compile("/").is_empty());
        assert!(compile("///").is_empty());
    }

    #[test]
    fn half_braced_components_are_literal() {
        assert_eq!(compile("/{id/x}"), vec![lit("{id"), lit("x}")]);
        assert_eq!(compile("/a{b}"), vec![lit("a{b}")]);
    }

    #[test]
    fn names_are_not_validated_by_compile() {
        assert_eq!(compile("/{}/{a b}"), vec![param(""), param("a b")]);
    }

    #[test]
    fn validate_flags_empty_and_duplicate_names() {
        let warnings = validate(&compile("/{}/{id}/x/{id}"));
        assert_eq!(
            warnings,
            vec![
                PatternWarning::EmptyParamName { position: 0 },
                PatternWarning::DuplicateParamName { name: "id".into() },
            ],
        );
        assert!(validate(&compile("/users/{id}")).is_empty());
    }

    #[test]
    fn display_round_trips_the_template_shape() {
        let shown: Vec<String> = compile("/users/{id}").iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["users", "{id}"]);
    }
}
