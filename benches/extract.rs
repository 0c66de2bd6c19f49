use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use depmind::config::LayoutConfig;
use depmind::graph::DependencyGraph;
use depmind::id::IdAllocator;
use depmind::ir::{DependencyEdge, Direction};
use depmind::layout::compute_layout;
use depmind::tree::{extract_tree, generate_tree};
use std::hint::black_box;

/// A chain through every node plus forward skip edges, so most relations
/// end up as additional edges.
fn dense_edges(nodes: usize, extra_edges: usize) -> Vec<DependencyEdge> {
    let mut out = Vec::new();
    for i in 0..nodes.saturating_sub(1) {
        out.push(DependencyEdge::new(format!("N{i}"), format!("N{}", i + 1)));
    }
    let mut count = 0usize;
    for i in 0..nodes {
        for j in (i + 2)..nodes {
            if count >= extra_edges {
                break;
            }
            out.push(DependencyEdge::new(format!("N{i}"), format!("N{j}")));
            count += 1;
        }
        if count >= extra_edges {
            break;
        }
    }
    out
}

/// Wide forest: many roots, each fanning out, with cross links between
/// neighbouring subtrees.
fn forest_edges(roots: usize, fanout: usize) -> Vec<DependencyEdge> {
    let mut out = Vec::new();
    for r in 0..roots {
        for c in 0..fanout {
            out.push(DependencyEdge::new(format!("R{r}"), format!("R{r}C{c}")));
            if r + 1 < roots {
                out.push(DependencyEdge::new(format!("R{r}C{c}"), format!("R{}C{c}", r + 1)));
            }
        }
    }
    out
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    for (name, edges) in [
        ("dense_200", dense_edges(200, 2_000)),
        ("dense_1000", dense_edges(1_000, 10_000)),
        ("forest_50x20", forest_edges(50, 20)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &edges, |b, edges| {
            b.iter(|| {
                let mut ids = IdAllocator::with_seed(1);
                let graph = DependencyGraph::build(black_box(edges), "root", &mut ids)
                    .expect("graph build failed");
                black_box(extract_tree(&graph, &mut ids))
            })
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for (name, edges) in [
        ("dense_1000", dense_edges(1_000, 10_000)),
        ("forest_50x20", forest_edges(50, 20)),
    ] {
        let mut ids = IdAllocator::with_seed(1);
        let doc = generate_tree(&edges, "root", &mut ids).expect("tree build failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| compute_layout(black_box(doc), Direction::Right, &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract, bench_layout);
criterion_main!(benches);
