use std::fmt;

/// Errors raised while wiring guards into a host application.
///
/// None of these are produced while evaluating a request against a guard;
/// a failed precondition is a [`Denial`], not an `Error`.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The host did not supply the fallback for this kind of denial
    MissingFallback(DenialKind),
    /// A route was registered twice
    DuplicateRoute(String),
    /// No route is registered for the requested path
    UnknownRoute(String),
    /// A configuration value could not be parsed
    InvalidConfig {
        /// The configuration key
        key: &'static str,
        /// The rejected value
        value: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingFallback(kind) => {
                write!(f, "No fallback registered for {} requests", kind)
            }
            Error::DuplicateRoute(path) => write!(f, "Route '{}' is already registered", path),
            Error::UnknownRoute(path) => write!(f, "No route registered for '{}'", path),
            Error::InvalidConfig { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl std::error::Error for Error {}

/// A failed guard precondition.
///
/// The kind selects which host fallback answers the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// The kind of denial
    pub kind: DenialKind,
    /// Human-readable message explaining the denial
    pub message: String,
}

impl Denial {
    /// Creates a new denial.
    pub fn new(kind: DenialKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Denial {}

/// Which precondition a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialKind {
    /// No authenticated principal
    Unauthenticated,
    /// Authenticated, but the role requirement was not met
    Unauthorized,
    /// Not authenticated, or no confirmed email while confirmation is enabled
    UnconfirmedEmail,
}

impl fmt::Display for DenialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialKind::Unauthenticated => write!(f, "unauthenticated"),
            DenialKind::Unauthorized => write!(f, "unauthorized"),
            DenialKind::UnconfirmedEmail => write!(f, "unconfirmed email"),
        }
    }
}
