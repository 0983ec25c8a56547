//! Error types for skein-core.

use std::fmt;
use thiserror::Error;

/// The four whitespace-delimited fields of a triple record, in line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// First token: the source vertex.
    Source,
    /// Second token: the edge label.
    EdgeLabel,
    /// Third token: the destination vertex.
    Destination,
    /// Fourth token: the record terminator (usually `.`).
    Terminator,
}

impl Field {
    /// All fields in the order they appear on a line.
    pub const ALL: [Field; 4] = [
        Field::Source,
        Field::EdgeLabel,
        Field::Destination,
        Field::Terminator,
    ];

    /// Human-readable name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Source => "source vertex",
            Field::EdgeLabel => "edge label",
            Field::Destination => "destination vertex",
            Field::Terminator => "end of record symbol",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for graph and loader operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A record was missing one of its four fields.
    #[error("{file}:{line}: error reading {field}")]
    MalformedRecord {
        /// Name of the input being read.
        file: String,
        /// 1-based line number of the offending record.
        line: u64,
        /// The first field that could not be read.
        field: Field,
    },

    /// Reading the input failed for a reason other than end of stream.
    #[error("{file}: {source}")]
    Io {
        /// Name of the input being read.
        file: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// An edge referenced a vertex that is not in the vertex set.
    #[error("unexpected vertex: {endpoint}")]
    ReferentialIntegrity {
        /// Rendering of the missing endpoint.
        endpoint: String,
    },

    /// The identity pool refused to issue another identity.
    #[error("identity pool exhausted: limit of {limit} identities reached")]
    ResourceExhaustion {
        /// Configured maximum number of identities.
        limit: usize,
    },

    /// A loader configuration file could not be read or parsed.
    #[error("invalid configuration {path}: {source}")]
    Config {
        /// Path of the configuration file.
        path: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Build an [`Error::Io`] for the named input.
    pub fn io(file: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            file: file.into(),
            source,
        }
    }

    /// 1-based line number, when the error is tied to one.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for skein operations.
pub type Result<T> = std::result::Result<T, Error>;
