//! HTTP method a route can be bound to.
//!
//! Covers RFC 9110 standard methods, WebDAV extensions (RFC 4918 / 4791 / 3253 / 5323),
//! `PURGE` used by nginx and Varnish for cache invalidation, and any other
//! method string as [`Method::Extension`].
//!
//! A route bound to a [`Method`] matches a request whose method string equals
//! [`Method::as_str`]. Comparison is case-sensitive per RFC 9110 §9.1, so
//! `"get"` is an extension method, not `GET`.

use std::fmt;

/// A route-bindable HTTP method.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    // RFC 9110 ─────────────────────────────────────────────────────────────────
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    // WebDAV RFC 4918 ──────────────────────────────────────────────────────────
    Copy,
    Lock,
    Mkcol,
    Move,
    Propfind,
    Proppatch,
    Unlock,
    // WebDAV extensions ────────────────────────────────────────────────────────
    Mkcalendar, // RFC 4791 (CalDAV)
    Report,     // RFC 3253
    Search,     // RFC 5323
    // Cache invalidation ───────────────────────────────────────────────────────
    Purge, // nginx / Varnish
    // Anything else, kept verbatim.
    Extension(Box<str>),
}

impl Method {
    /// Returns the wire representation (e.g. `"GET"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect      => "CONNECT",
            Self::Copy         => "COPY",
            Self::Delete       => "DELETE",
            Self::Get          => "GET",
            Self::Head         => "HEAD",
            Self::Lock         => "LOCK",
            Self::Mkcalendar   => "MKCALENDAR",
            Self::Mkcol        => "MKCOL",
            Self::Move         => "MOVE",
            Self::Options      => "OPTIONS",
            Self::Patch        => "PATCH",
            Self::Post         => "POST",
            Self::Propfind     => "PROPFIND",
            Self::Proppatch    => "PROPPATCH",
            Self::Purge        => "PURGE",
            Self::Put          => "PUT",
            Self::Report       => "REPORT",
            Self::Search       => "SEARCH",
            Self::Trace        => "TRACE",
            Self::Unlock       => "UNLOCK",
            Self::Extension(s) => s,
        }
    }
}

/// Maps a method string to its variant; unknown strings become
/// [`Method::Extension`]. Never fails.
impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s {
            "CONNECT"    => Self::Connect,
            "COPY"       => Self::Copy,
            "DELETE"     => Self::Delete,
            "GET"        => Self::Get,
            "HEAD"       => Self::Head,
            "LOCK"       => Self::Lock,
            "MKCALENDAR" => Self::Mkcalendar,
            "MKCOL"      => Self::Mkcol,
            "MOVE"       => Self::Move,
            "OPTIONS"    => Self::Options,
            "PATCH"      => Self::Patch,
            "POST"       => Self::Post,
            "PROPFIND"   => Self::Propfind,
            "PROPPATCH"  => Self::Proppatch,
            "PURGE"      => Self::Purge,
            "PUT"        => Self::Put,
            "REPORT"     => Self::Report,
            "SEARCH"     => Self::Search,
            "TRACE"      => Self::Trace,
            "UNLOCK"     => Self::Unlock,
            other        => Self::Extension(other.into()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_methods_map_to_variants() {
        assert_eq!(Method::from("GET"), Method::Get);
        assert_eq!(Method::from("PURGE"), Method::Purge);
        assert_eq!(Method::from("PROPFIND").as_str(), "PROPFIND");
    }

    #[test]
    fn unknown_and_lowercase_strings_are_extensions() {
        assert_eq!(Method::from("BREW"), Method::Extension("BREW".into()));
        assert_eq!(Method::from("get"), Method::Extension("get".into()));
        assert_eq!(Method::from("BREW").as_str(), "BREW");
    }
}
