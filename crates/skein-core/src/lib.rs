// Allow minor clippy style warnings at crate level
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::uninlined_format_args)]

//! Interned, canonicalized undirected graphs built from triple files.
//!
//! This crate provides:
//!
//! - [`IdentityPool`] / [`Identity`] - one canonical handle per distinct value
//! - [`Graph`] - an undirected simple graph with canonical [`Edge`]s
//! - [`LabeledGraph`] - the same graph with labels on vertices and edges
//! - [`TripleLoader`] - a streaming reader for `src label dst .` records
//! - [`Render`] - the capability graph dumps use to print their contents
//!
//! # Example
//!
//! ```rust
//! use skein_core::{Graph, IdentityPool, Symbol, TripleLoader};
//!
//! let mut pool = IdentityPool::new();
//! let mut graph: Graph<Symbol> = Graph::new();
//!
//! let input = "alice knows bob .\nbob knows alice .\nbob knows carol .\n";
//! TripleLoader::new(&mut pool)
//!     .load_reader("inline", input.as_bytes(), None, &mut graph)
//!     .unwrap();
//!
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! print!("{graph}");
//! ```
//!
//! Graphs hold [`Identity`] handles that share ownership with the pool, so
//! a graph stays valid even if the pool is cleared or dropped first. After
//! a clear, though, new resolutions of the same text are no longer the same
//! allocation as the handles already in the graph.
//!
//! Nothing here is synchronized; a pool and the graphs it feeds belong to
//! one thread.

mod config;
mod error;
mod graph;
mod labeled;
mod loader;
mod pool;
pub mod progress;
mod render;

pub use config::{EdgeLabeling, LoaderConfig, DEFAULT_PROGRESS_INTERVAL};
pub use error::{Error, Field, Result};
pub use graph::{Edge, Graph, GraphStats};
pub use labeled::LabeledGraph;
pub use loader::{parse_record, LoadSummary, ResolvedTriple, TripleLoader, TripleSink};
pub use pool::{Identity, IdentityPool};
pub use progress::{BarProgress, NoProgress, Progress};
pub use render::{Render, Rendered};

// Re-export petgraph for callers of `to_petgraph`
pub use petgraph;

/// Interned token from a triple file.
pub type Symbol = Identity<String>;
