//! Unified error type.

use std::fmt;

/// Boxed failure returned by handlers and middleware.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by waymark's fallible operations.
///
/// Routing itself never fails: an unmatched request is a `404` and a failed
/// handler is a `500`, both answered inside the router. This type surfaces
/// what the host adapter can hit around it.
#[derive(Debug)]
pub enum Error {
    /// Binding the listener or accepting a connection failed.
    Io(std::io::Error),
    /// The bind address is not a valid `host:port`.
    Address(String),
    /// A handler failed. Only ever logged; never sent to a client.
    Handler(BoxError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e)      => write!(f, "io: {e}"),
            Self::Address(a) => write!(f, "invalid socket address `{a}`"),
            Self::Handler(e) => write!(f, "handler: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e)      => Some(e),
            Self::Address(_) => None,
            Self::Handler(e) => Some(e.as_ref()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
