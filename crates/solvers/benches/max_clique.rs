use criterion::{criterion_group, criterion_main, Criterion};

use bitgraph::prelude::*;
use graph_solvers::prelude::*;

fn bench_max_clique(c: &mut Criterion) {
    let graph = gnp(120, 0.5, 42);

    let mut group = c.benchmark_group("max_clique");

    group.bench_function("ccon", |b| {
        b.iter(|| {
            cco_max_clique(&graph, &MaxCliqueParams::default(), CcoConfig::default()).unwrap()
        })
    });

    group.bench_function("ccod", |b| {
        let config = CcoConfig {
            permutations: CcoPermutations::Defer1,
            ..CcoConfig::default()
        };
        b.iter(|| cco_max_clique(&graph, &MaxCliqueParams::default(), config).unwrap())
    });

    group.bench_function("tccon", |b| {
        b.iter(|| {
            tcco_max_clique(&graph, &MaxCliqueParams::default(), CcoConfig::default()).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_max_clique);
criterion_main!(benches);
