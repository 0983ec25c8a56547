//! Loader configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Records between progress emissions.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// What a labeled graph stores on an edge built from a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeLabeling {
    /// The destination vertex's label.
    #[default]
    Destination,
    /// The identity of the record's edge-label token.
    Predicate,
}

/// Configuration for [`TripleLoader`](crate::TripleLoader).
///
/// ```rust
/// use skein_core::{EdgeLabeling, LoaderConfig};
///
/// let config: LoaderConfig = serde_json::from_str(r#"{"edge_labels": "predicate"}"#).unwrap();
/// assert_eq!(config.edge_labels, EdgeLabeling::Predicate);
/// assert_eq!(config.progress_interval, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Emit progress every this many records (0 disables the cadence; the
    /// final emission still happens).
    pub progress_interval: u64,
    /// Edge payload used when loading into a labeled graph.
    pub edge_labels: EdgeLabeling,
    /// Maximum number of identities the pool may hold while loading.
    pub identity_limit: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            edge_labels: EdgeLabeling::default(),
            identity_limit: None,
        }
    }
}

impl LoaderConfig {
    /// Read a configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::io(name.clone(), e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Config {
            path: name,
            source,
        })
    }

    /// Set the edge labeling mode.
    pub fn with_edge_labels(mut self, edge_labels: EdgeLabeling) -> Self {
        self.edge_labels = edge_labels;
        self
    }

    /// Set the progress cadence.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Cap the number of identities.
    pub fn with_identity_limit(mut self, limit: usize) -> Self {
        self.identity_limit = Some(limit);
        self
    }
}
