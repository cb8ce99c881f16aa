//! Error types for snmp-agent-registry.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by value producers and transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Configuration error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// Private Enterprise Number unset or zero.
    MissingEnterpriseNumber,
    /// Listen address could not be parsed.
    InvalidListenAddress(Box<str>),
    /// Log level name not recognized.
    InvalidLogLevel(Box<str>),
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnterpriseNumber => {
                write!(f, "PEN (Private Enterprise Number) is required")
            }
            Self::InvalidListenAddress(addr) => write!(f, "invalid listen address '{}'", addr),
            Self::InvalidLogLevel(level) => write!(f, "unknown log level '{}'", level),
        }
    }
}

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Empty OID string.
    Empty,
    /// Invalid arc value.
    InvalidArc,
    /// OID has too many arcs (exceeds MAX_OID_LEN).
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty OID"),
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::TooManyArcs { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
        }
    }
}

/// SNMP error status codes (RFC 3416) a transport reports for a GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    NoError,
    NoSuchName,
    GenErr,
}

impl ErrorStatus {
    /// Convert to raw status code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::NoSuchName => 2,
            Self::GenErr => 5,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "noError"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::GenErr => write!(f, "genErr"),
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Agent configuration rejected at construction.
    #[error("invalid configuration: {kind}")]
    Config { kind: ConfigErrorKind },

    /// Unregistration targeted an OID with no entry.
    #[error("OID not found: {oid}")]
    NotFound { oid: Box<str> },

    /// A dynamic entry's producer failed.
    ///
    /// `source` is the producer's own error, unchanged.
    #[error("value producer for {oid} failed: {source}")]
    Evaluation {
        oid: Box<str>,
        #[source]
        source: BoxError,
    },

    /// Invalid OID format.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // Only allocated when parsing string input
    },

    /// `start` called on an agent that is already serving.
    #[error("agent is already running")]
    AlreadyRunning,

    /// `stop` called on an agent that was never started.
    #[error("agent is not running")]
    NotRunning,

    /// Failure reported by the SNMP transport.
    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(kind: ConfigErrorKind) -> Self {
        Self::Config { kind }
    }

    /// Create a not-found error for an OID.
    pub fn not_found(oid: impl Into<Box<str>>) -> Self {
        Self::NotFound { oid: oid.into() }
    }

    /// Wrap a producer failure for an OID.
    pub fn evaluation(oid: impl Into<Box<str>>, source: BoxError) -> Self {
        Self::Evaluation {
            oid: oid.into(),
            source,
        }
    }

    /// Wrap a transport failure.
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Get the OID this error refers to, if any.
    pub fn oid(&self) -> Option<&str> {
        match self {
            Self::NotFound { oid } => Some(oid),
            Self::Evaluation { oid, .. } => Some(oid),
            Self::InvalidOid { input, .. } => input.as_deref(),
            _ => None,
        }
    }

    /// Consume an evaluation error and return the producer's error.
    ///
    /// Returns `Err(self)` for any other variant.
    pub fn into_evaluation_source(self) -> std::result::Result<BoxError, Self> {
        match self {
            Self::Evaluation { source, .. } => Ok(source),
            other => Err(other),
        }
    }
}
