//! Property-based tests for skein graph types.
//!
//! These tests verify invariants that should hold for any sequence of
//! operations:
//! - Edge canonicalization and deduplication
//! - Referential integrity between edges and vertices
//! - Incidence removal
//! - Identity uniqueness
//! - Loader line accounting

use proptest::prelude::*;
use skein_core::{
    EdgeLabeling, Error, Graph, GraphStats, Identity, IdentityPool, LabeledGraph, LoaderConfig,
    ResolvedTriple, Result, Symbol, TripleLoader, TripleSink,
};
use std::collections::BTreeSet;

fn arb_token() -> impl Strategy<Value = String> {
    "[a-e][a-z0-9]{0,3}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum Op {
    AddVertex(u8),
    AddEdge(u8, u8),
    RemoveVertex(u8),
    RemoveEdge(u8, u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::AddVertex),
        (0u8..12, 0u8..12).prop_map(|(a, b)| Op::AddEdge(a, b)),
        (0u8..12).prop_map(Op::RemoveVertex),
        (0u8..12, 0u8..12).prop_map(|(a, b)| Op::RemoveEdge(a, b)),
    ]
}

fn apply(graph: &mut Graph<u8>, op: &Op) {
    match *op {
        Op::AddVertex(v) => {
            graph.insert_vertex(v);
        }
        Op::AddEdge(a, b) => {
            let _ = graph.insert_edge(a, b);
        }
        Op::RemoveVertex(v) => {
            graph.remove_vertex(&v);
        }
        Op::RemoveEdge(a, b) => {
            graph.remove_edge(&a, &b);
        }
    }
}

mod graph_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn edge_orientation_is_irrelevant(a in 0u8..50, b in 0u8..50) {
            let mut g = Graph::new();
            g.insert_vertex(a);
            g.insert_vertex(b);

            let (first, inserted) = g.insert_edge(a, b).unwrap();
            prop_assert!(inserted);
            let (second, inserted) = g.insert_edge(b, a).unwrap();
            prop_assert!(!inserted);

            prop_assert_eq!(&first, &second);
            prop_assert!(first.src() <= first.dst());
            prop_assert_eq!(g.edge_count(), 1);
        }

        #[test]
        fn invariants_hold_after_any_ops(ops in prop::collection::vec(arb_op(), 0..80)) {
            let mut g = Graph::new();
            for op in &ops {
                apply(&mut g, op);
            }

            for edge in g.edges() {
                prop_assert!(edge.src() <= edge.dst());
                prop_assert!(g.contains_vertex(edge.src()));
                prop_assert!(g.contains_vertex(edge.dst()));
            }
        }

        #[test]
        fn remove_vertex_drops_every_incident_edge(
            ops in prop::collection::vec(arb_op(), 0..80),
            victim in 0u8..12,
        ) {
            let mut g = Graph::new();
            for op in &ops {
                apply(&mut g, op);
            }
            let before = g.edge_count();
            let incident = g.degree(&victim);

            g.remove_vertex(&victim);

            prop_assert!(!g.contains_vertex(&victim));
            prop_assert!(g.edges().all(|e| !e.is_incident(&victim)));
            prop_assert_eq!(g.edge_count(), before - incident);
        }

        #[test]
        fn failed_edge_insert_stores_nothing(
            present in prop::collection::btree_set(0u8..20, 0..10),
            a in 0u8..20,
            b in 0u8..20,
        ) {
            let mut g = Graph::new();
            for v in &present {
                g.insert_vertex(*v);
            }

            let result = g.insert_edge(a, b);
            if present.contains(&a) && present.contains(&b) {
                prop_assert!(result.is_ok());
                prop_assert_eq!(g.edge_count(), 1);
            } else {
                prop_assert!(
                    matches!(result, Err(Error::ReferentialIntegrity { .. })),
                    "expected referential integrity error"
                );
                prop_assert_eq!(g.edge_count(), 0);
            }
        }

        #[test]
        fn dump_lists_each_edge_once(ops in prop::collection::vec(arb_op(), 0..60)) {
            let mut g = Graph::new();
            for op in &ops {
                apply(&mut g, op);
            }
            let dump = g.to_string();
            let indented = dump.lines().filter(|l| l.starts_with("  ")).count();
            let top = dump.lines().filter(|l| !l.starts_with("  ")).count();

            prop_assert_eq!(indented, g.edge_count());
            prop_assert_eq!(top, g.vertex_count());
        }
    }
}

mod labeled_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn first_label_wins(v in 0u8..10, first in arb_token(), second in arb_token()) {
            let mut g: LabeledGraph<u8, String> = LabeledGraph::new();
            g.insert_vertex(v, first.clone());
            let (label, inserted) = g.insert_vertex(v, second);

            prop_assert!(!inserted);
            prop_assert_eq!(label, &first);
        }

        #[test]
        fn labeled_remove_vertex_drops_incident_edges(
            edges in prop::collection::vec((0u8..8, 0u8..8), 0..30),
            victim in 0u8..8,
        ) {
            let mut g: LabeledGraph<u8, u8> = LabeledGraph::new();
            for v in 0u8..8 {
                g.insert_vertex(v, v);
            }
            for (a, b) in &edges {
                g.insert_edge(*a, *b).unwrap();
            }

            g.remove_vertex(&victim);
            prop_assert!(g.edges().all(|(e, _)| !e.is_incident(&victim)));
            prop_assert_eq!(g.vertex_count(), 7);
        }
    }
}

mod pool_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn equal_values_share_identity(x in arb_token(), y in arb_token()) {
            let mut pool = IdentityPool::new();
            let ix = pool.resolve(x.clone());
            let iy = pool.resolve(y.clone());

            prop_assert_eq!(Identity::ptr_eq(&ix, &iy), x == y);
            prop_assert_eq!(ix == iy, x == y);
            prop_assert_eq!(ix.cmp(&iy), x.cmp(&y));
        }

        #[test]
        fn pool_size_is_distinct_count(tokens in prop::collection::vec(arb_token(), 0..50)) {
            let mut pool = IdentityPool::new();
            for t in &tokens {
                pool.resolve_ref(t.as_str());
            }
            let distinct: BTreeSet<_> = tokens.iter().collect();
            prop_assert_eq!(pool.len(), distinct.len());
        }
    }
}

mod loader_props {
    use super::*;

    /// Counts the triples the loader hands over, then defers to the real
    /// `Graph<Symbol>` sink.
    #[derive(Default)]
    struct Counting {
        graph: Graph<Symbol>,
        triples: usize,
    }

    impl TripleSink for Counting {
        fn insert_triple(&mut self, triple: ResolvedTriple, labeling: EdgeLabeling) -> Result<()> {
            self.triples += 1;
            self.graph.insert_triple(triple, labeling)
        }

        fn stats(&self) -> GraphStats {
            self.graph.stats()
        }
    }

    prop_compose! {
        fn arb_record()(
            src in arb_token(),
            label in "[a-z]{1,6}",
            dst in arb_token(),
        ) -> (String, String, String) {
            (src, label, dst)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn loader_line_accounting(records in prop::collection::vec(arb_record(), 0..40)) {
            let input: String = records
                .iter()
                .map(|(s, l, d)| format!("{s} {l} {d} .\n"))
                .collect();

            let mut pool = IdentityPool::new();
            let mut sink = Counting::default();
            let summary = TripleLoader::new(&mut pool)
                .load_reader("prop.nt", input.as_bytes(), Some(input.len() as u64), &mut sink)
                .unwrap();

            let mut labeled: LabeledGraph<Symbol, Symbol> = LabeledGraph::new();
            let labeled_summary = TripleLoader::new(&mut pool)
                .with_config(LoaderConfig::default().with_edge_labels(EdgeLabeling::Predicate))
                .load_reader("prop.nt", input.as_bytes(), None, &mut labeled)
                .unwrap();

            let endpoints: BTreeSet<&str> = records
                .iter()
                .flat_map(|(s, _, d)| [s.as_str(), d.as_str()])
                .collect();
            let edges: BTreeSet<(&str, &str)> = records
                .iter()
                .map(|(s, _, d)| {
                    let (s, d) = (s.as_str(), d.as_str());
                    if s <= d { (s, d) } else { (d, s) }
                })
                .collect();

            prop_assert_eq!(summary.records, records.len() as u64);
            prop_assert_eq!(sink.triples, records.len());
            prop_assert_eq!(sink.graph.vertex_count(), endpoints.len());
            prop_assert_eq!(sink.graph.edge_count(), edges.len());
            prop_assert_eq!((summary.vertices, summary.edges), (endpoints.len(), edges.len()));
            for (a, b) in &edges {
                let a = pool.get(*a).unwrap();
                let b = pool.get(*b).unwrap();
                prop_assert!(sink.graph.contains_edge(&a, &b));
                prop_assert!(labeled.edge_label(&a, &b).is_some());
            }

            prop_assert_eq!(labeled_summary.records, records.len() as u64);
            prop_assert_eq!(labeled.vertex_count(), endpoints.len());
            prop_assert_eq!(labeled.edge_count(), edges.len());
            for (vertex, label) in labeled.vertices() {
                prop_assert!(Identity::ptr_eq(vertex, label));
            }
        }

        #[test]
        fn malformed_line_leaves_previous_state(
            records in prop::collection::vec(arb_record(), 1..20),
        ) {
            let good: String = records
                .iter()
                .map(|(s, l, d)| format!("{s} {l} {d} .\n"))
                .collect();
            let bad = format!("{good}x y z\n");

            let mut pool = IdentityPool::new();
            let mut expected: Graph<Symbol> = Graph::new();
            TripleLoader::new(&mut pool)
                .load_reader("ok.nt", good.as_bytes(), None, &mut expected)
                .unwrap();

            let mut pool = IdentityPool::new();
            let mut actual: Graph<Symbol> = Graph::new();
            let err = TripleLoader::new(&mut pool)
                .load_reader("bad.nt", bad.as_bytes(), None, &mut actual)
                .unwrap_err();

            prop_assert_eq!(err.line(), Some(records.len() as u64 + 1));
            prop_assert_eq!(actual.to_string(), expected.to_string());
        }
    }
}
