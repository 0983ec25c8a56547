//! Streaming triple loader.
//!
//! Each line of the input is one record of four whitespace-separated tokens:
//!
//! ```text
//! <source> <edge-label> <destination> <terminator>
//! ```
//!
//! The terminator must be present but its value is ignored. Every token is
//! resolved through the caller's [`IdentityPool`], both endpoints are
//! inserted as vertices and then the edge between them is inserted. The
//! first malformed record stops the load; records before it stay in the
//! graph.
//!
//! # Example
//!
//! ```rust
//! use skein_core::{Graph, IdentityPool, Symbol, TripleLoader};
//!
//! let mut pool = IdentityPool::new();
//! let mut graph: Graph<Symbol> = Graph::new();
//! let input = "a likes b .\nb likes c .\n";
//!
//! let summary = TripleLoader::new(&mut pool)
//!     .load_reader("inline", input.as_bytes(), Some(input.len() as u64), &mut graph)
//!     .unwrap();
//!
//! assert_eq!(summary.records, 2);
//! assert_eq!(graph.to_string(), "a\n  b\nb\n  c\nc\n");
//! ```

use crate::config::{EdgeLabeling, LoaderConfig};
use crate::progress::{NoProgress, Progress};
use crate::{Error, Field, Graph, GraphStats, IdentityPool, LabeledGraph, Result, Symbol};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// One record with every token resolved to its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTriple {
    /// Source vertex.
    pub source: Symbol,
    /// Edge-label token.
    pub label: Symbol,
    /// Destination vertex.
    pub destination: Symbol,
}

/// A graph the loader can populate.
pub trait TripleSink {
    /// Insert both endpoints of `triple` as vertices, then the edge between
    /// them.
    fn insert_triple(&mut self, triple: ResolvedTriple, labeling: EdgeLabeling) -> Result<()>;

    /// Vertex and edge counts of the graph.
    fn stats(&self) -> GraphStats;
}

impl<S: TripleSink + ?Sized> TripleSink for &mut S {
    fn insert_triple(&mut self, triple: ResolvedTriple, labeling: EdgeLabeling) -> Result<()> {
        (**self).insert_triple(triple, labeling)
    }

    fn stats(&self) -> GraphStats {
        (**self).stats()
    }
}

impl TripleSink for Graph<Symbol> {
    fn insert_triple(&mut self, triple: ResolvedTriple, _labeling: EdgeLabeling) -> Result<()> {
        self.insert_vertex(triple.source.clone());
        self.insert_vertex(triple.destination.clone());
        self.insert_edge(triple.source, triple.destination)?;
        Ok(())
    }

    fn stats(&self) -> GraphStats {
        Graph::stats(self)
    }
}

/// Vertices are labeled with their own identity; the edge payload follows
/// `labeling`.
impl TripleSink for LabeledGraph<Symbol, Symbol> {
    fn insert_triple(&mut self, triple: ResolvedTriple, labeling: EdgeLabeling) -> Result<()> {
        let ResolvedTriple {
            source,
            label,
            destination,
        } = triple;
        self.insert_vertex(source.clone(), source.clone());
        self.insert_vertex(destination.clone(), destination.clone());
        match labeling {
            EdgeLabeling::Destination => self.insert_edge(source, destination)?,
            EdgeLabeling::Predicate => self.insert_labeled_edge(source, destination, label)?,
        };
        Ok(())
    }

    fn stats(&self) -> GraphStats {
        LabeledGraph::stats(self)
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records (lines) read.
    pub records: u64,
    /// Bytes consumed.
    pub bytes: u64,
    /// Identities in the pool after loading.
    pub identities: usize,
    /// Vertices in the graph after loading.
    pub vertices: usize,
    /// Edges in the graph after loading.
    pub edges: usize,
}

/// Split a line into its four tokens, naming the first one that is missing.
pub fn parse_record(line: &str) -> std::result::Result<[&str; 4], Field> {
    let mut tokens = line.split_whitespace();
    let mut fields = [""; 4];
    for (slot, field) in fields.iter_mut().zip(Field::ALL) {
        *slot = tokens.next().ok_or(field)?;
    }
    Ok(fields)
}

/// Reads triple files into graphs, interning tokens through a borrowed pool.
pub struct TripleLoader<'p, P = NoProgress> {
    pool: &'p mut IdentityPool<String>,
    config: LoaderConfig,
    progress: P,
}

impl<'p> TripleLoader<'p> {
    /// Create a loader with default configuration and no progress output.
    pub fn new(pool: &'p mut IdentityPool<String>) -> Self {
        Self {
            pool,
            config: LoaderConfig::default(),
            progress: NoProgress,
        }
    }
}

impl<'p, P: Progress> TripleLoader<'p, P> {
    /// Replace the configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Report progress to `progress`.
    pub fn with_progress<Q: Progress>(self, progress: Q) -> TripleLoader<'p, Q> {
        TripleLoader {
            pool: self.pool,
            config: self.config,
            progress,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Recover the progress reporter.
    pub fn into_progress(self) -> P {
        self.progress
    }

    /// Load the triple file at `path` into `graph`.
    ///
    /// The progress reporter is finished even when the file cannot be
    /// opened.
    pub fn load_path<G: TripleSink>(
        &mut self,
        path: impl AsRef<Path>,
        graph: &mut G,
    ) -> Result<LoadSummary> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let opened = File::open(path).and_then(|file| {
            let total = file.metadata()?.len();
            Ok((file, total))
        });
        let (file, total) = match opened {
            Ok(opened) => opened,
            Err(err) => {
                self.progress.finish();
                debug!(file = %name, error = %err, "open failed");
                return Err(Error::io(name, err));
            }
        };
        self.load_reader(&name, BufReader::new(file), Some(total), graph)
    }

    /// Load triples from `reader` into `graph`.
    ///
    /// `name` is used in diagnostics. `total` is the input length in bytes,
    /// if known, and drives the progress fraction.
    pub fn load_reader<R: BufRead, G: TripleSink>(
        &mut self,
        name: &str,
        reader: R,
        total: Option<u64>,
        graph: &mut G,
    ) -> Result<LoadSummary> {
        debug!(file = name, total, "loading triples");
        let result = self.read_records(name, reader, total, graph);
        self.progress.finish();
        match &result {
            Ok(summary) => debug!(
                file = name,
                records = summary.records,
                bytes = summary.bytes,
                identities = summary.identities,
                vertices = summary.vertices,
                edges = summary.edges,
                "loaded triples"
            ),
            Err(err) => debug!(file = name, error = %err, "load aborted"),
        }
        result
    }

    fn read_records<R: BufRead, G: TripleSink>(
        &mut self,
        name: &str,
        mut reader: R,
        total: Option<u64>,
        graph: &mut G,
    ) -> Result<LoadSummary> {
        let interval = self.config.progress_interval;
        let mut line = String::new();
        let mut line_num: u64 = 0;
        let mut consumed: u64 = 0;
        let mut reported_at: Option<u64> = None;

        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| Error::io(name, e))?;
            if n == 0 {
                break;
            }
            line_num += 1;
            consumed += n as u64;

            // The last line is reported before it is parsed, whatever `total` says.
            let at_end = reader
                .fill_buf()
                .map(|rest| rest.is_empty())
                .map_err(|e| Error::io(name, e))?;
            let on_cadence = interval > 0 && line_num % interval == 0;
            if on_cadence || at_end || Some(consumed) == total {
                let reported_total = if at_end {
                    Some(total.map_or(consumed, |t| t.max(consumed)))
                } else {
                    total
                };
                trace!(line = line_num, consumed, "progress");
                self.progress.update(consumed, reported_total);
                reported_at = Some(consumed);
            }

            let [src, edg, dst, _terminator] =
                parse_record(&line).map_err(|field| Error::MalformedRecord {
                    file: name.to_string(),
                    line: line_num,
                    field,
                })?;

            let triple = ResolvedTriple {
                source: self.resolve(src)?,
                label: self.resolve(edg)?,
                destination: self.resolve(dst)?,
            };
            graph.insert_triple(triple, self.config.edge_labels)?;
        }

        if reported_at != Some(consumed) {
            self.progress
                .update(consumed, Some(total.unwrap_or(consumed).max(consumed)));
        }

        let stats = graph.stats();
        Ok(LoadSummary {
            records: line_num,
            bytes: consumed,
            identities: self.pool.len(),
            vertices: stats.vertex_count,
            edges: stats.edge_count,
        })
    }

    fn resolve(&mut self, token: &str) -> Result<Symbol> {
        if let Some(limit) = self.config.identity_limit {
            if self.pool.len() >= limit && !self.pool.contains(token) {
                return Err(Error::ResourceExhaustion { limit });
            }
        }
        self.pool.try_resolve_ref(token)
    }
}
