use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use fundgraph_core::models::{ChunkAttrs, DocumentAttrs, Edge, Node, Relation};
use fundgraph_graph::{GraphAlgorithms, GraphStore, KHopConfig};

/// A synthetic corpus: `docs` documents with 10 chunks each, every chunk
/// citing three other documents, and a supersession chain every 5 docs.
fn synthetic_store(docs: usize) -> GraphStore {
    let mut store = GraphStore::new();
    for d in 0..docs {
        store.upsert_node(Node::document(
            format!("doc_{d}"),
            DocumentAttrs {
                title: Some(format!("Richtlinie {d}")),
                ..Default::default()
            },
        ));
        for c in 0..10 {
            let chunk = format!("doc_{d}_chunk_{c}");
            store.upsert_node(Node::chunk(
                chunk.clone(),
                ChunkAttrs {
                    text: format!("Abschnitt {c} der Richtlinie {d}"),
                    ..Default::default()
                },
            ));
            store.add_edge(Edge::new(format!("doc_{d}"), chunk.clone(), Relation::HasChunk));
            for k in 1..=3 {
                let target = (d * 7 + c * 3 + k) % docs;
                store.add_edge(Edge::new(chunk.clone(), format!("doc_{target}"), Relation::References));
            }
        }
        if d % 5 != 0 {
            store.add_edge(Edge::new(format!("doc_{d}"), format!("doc_{}", d - 1), Relation::Supersedes));
        }
    }
    store
}

fn bench_global_pagerank(c: &mut Criterion) {
    let store = Arc::new(synthetic_store(200));
    c.bench_function("global_pagerank_2200_nodes", |b| {
        b.iter(|| {
            let algos = GraphAlgorithms::new(Arc::clone(&store), Duration::from_secs(3600));
            algos.global_pagerank()
        })
    });
}

fn bench_personalized_pagerank(c: &mut Criterion) {
    let algos = GraphAlgorithms::new(Arc::new(synthetic_store(200)), Duration::from_secs(3600));
    let seeds = ["doc_3_chunk_1", "doc_42_chunk_7", "doc_150_chunk_0"];
    c.bench_function("ppr_subgraph_3_seeds", |b| {
        b.iter(|| algos.subgraph_ids(&seeds, 50, 1e-4))
    });
}

fn bench_k_hop(c: &mut Criterion) {
    let algos = GraphAlgorithms::new(Arc::new(synthetic_store(200)), Duration::from_secs(3600));
    let config = KHopConfig::default();
    c.bench_function("k_hop_depth_2", |b| {
        b.iter(|| algos.k_hop_expansion(&["doc_17_chunk_4"], &config))
    });
}

fn bench_temporal_filter(c: &mut Criterion) {
    let algos = GraphAlgorithms::new(Arc::new(synthetic_store(200)), Duration::from_secs(3600));
    let ids: Vec<String> = (0..50).map(|i| format!("doc_{}_chunk_{}", i * 3, i % 10)).collect();
    c.bench_function("temporal_filter_50_hits", |b| {
        b.iter(|| algos.temporal_filter(&ids))
    });
}

criterion_group!(
    benches,
    bench_global_pagerank,
    bench_personalized_pagerank,
    bench_k_hop,
    bench_temporal_filter
);
criterion_main!(benches);
