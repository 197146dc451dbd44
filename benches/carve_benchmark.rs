use criterion::{criterion_group, criterion_main, Criterion};
use thicket::carve::{
    ArcGrowingTree, Boruvka, BoruvkaOptions, Forest, ForestOptions, GrowingTreeOptions, Kruskal,
    KruskalOptions, TaskSpec, VertexGrowingTree,
};
use thicket::collections::DisciplineKind;
use thicket::engine::run;
use thicket::{Entropy, Maze, RectGrid};

const SIDE: usize = 48;

fn maze() -> Maze {
    Maze::new(RectGrid::new(SIDE, SIDE))
}

fn bench_carvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("carve_48x48");
    group.sample_size(20);

    for (label, kind) in [
        ("dfs", DisciplineKind::Stack),
        ("bfs", DisciplineKind::Queue),
        ("simplified_prim", DisciplineKind::Random),
        ("vertex_prim", DisciplineKind::priority()),
    ] {
        group.bench_function(label, |b| {
            let entropy = Entropy::seeded(1);
            b.iter(|| {
                let options = GrowingTreeOptions::with_discipline(kind.clone());
                run::<VertexGrowingTree>(maze(), options, &entropy).unwrap()
            });
        });
    }

    group.bench_function("arc_prim", |b| {
        let entropy = Entropy::seeded(2);
        b.iter(|| {
            let options = GrowingTreeOptions::with_discipline(DisciplineKind::priority());
            run::<ArcGrowingTree>(maze(), options, &entropy).unwrap()
        });
    });

    group.bench_function("kruskal", |b| {
        let entropy = Entropy::seeded(3);
        b.iter(|| run::<Kruskal>(maze(), KruskalOptions::default(), &entropy).unwrap());
    });

    group.bench_function("boruvka", |b| {
        let entropy = Entropy::seeded(4);
        b.iter(|| run::<Boruvka>(maze(), BoruvkaOptions::default(), &entropy).unwrap());
    });

    group.bench_function("forest_4", |b| {
        let entropy = Entropy::seeded(5);
        b.iter(|| {
            let options = ForestOptions {
                tasks: vec![TaskSpec::default(); 4],
                ..ForestOptions::default()
            };
            run::<Forest>(maze(), options, &entropy).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_carvers);
criterion_main!(benches);
