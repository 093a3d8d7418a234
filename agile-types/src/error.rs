use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failure kinds surfaced by a rate source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TransportKind {
    /// The remote host name could not be resolved.
    HostResolution,
    /// The remote host actively refused the connection.
    ConnectionRefused,
    /// The connection or read timed out.
    Timeout,
    /// Any other IO failure while sending the request or reading the body.
    Io,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::HostResolution => "host resolution",
            Self::ConnectionRefused => "connection refused",
            Self::Timeout => "timeout",
            Self::Io => "io",
        };
        f.write_str(s)
    }
}

/// Unified error type for the agile workspace.
///
/// Fetch failures are tagged by kind so that retry decisions can be made
/// without inspecting messages. Ingestion and configuration problems share the
/// same enum so callers only ever handle one error type.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgileError {
    /// The request never produced an HTTP response (DNS, connect, timeout, IO).
    #[error("transport error ({kind}): {msg}")]
    Transport {
        /// Classified transport failure.
        kind: TransportKind,
        /// Human-readable detail from the underlying client.
        msg: String,
    },

    /// The server answered with a status worth retrying (5xx, 408 or 429).
    #[error("API Error: {status}")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// The server answered with a status that will not improve on retry.
    #[error("API Error: {status}")]
    Client {
        /// HTTP status code.
        status: u16,
    },

    /// The response was successful but carried no body.
    #[error("Empty response body from server")]
    EmptyBody,

    /// Anything else; never retried.
    #[error("unexpected error: {0}")]
    Unexpected(String),

    /// A record was rejected while converting from its wire form.
    #[error("invalid rate record: {0}")]
    InvalidRecord(String),

    /// A continuation token could not be used as a request target.
    #[error("invalid fetch target: {0}")]
    InvalidTarget(String),

    /// Builder or configuration problem.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AgileError {
    /// Helper: build a `Transport` error of the given kind.
    pub fn transport(kind: TransportKind, msg: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            msg: msg.into(),
        }
    }

    /// Helper: classify an unsuccessful HTTP status.
    ///
    /// Statuses `>= 500`, `408` and `429` become [`AgileError::Server`]; everything
    /// else becomes [`AgileError::Client`].
    #[must_use]
    pub const fn http_status(status: u16) -> Self {
        if status >= 500 || status == 408 || status == 429 {
            Self::Server { status }
        } else {
            Self::Client { status }
        }
    }

    /// Helper: build an `Unexpected` error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// HTTP status carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status } | Self::Client { status } => Some(*status),
            _ => None,
        }
    }
}
