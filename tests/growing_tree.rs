use thicket::carve::{ArcGrowingTree, GrowingTreeOptions, Priorities, VertexGrowingTree};
use thicket::collections::DisciplineKind;
use thicket::engine::run;
use thicket::{Arc, Edge, Entropy, Grid, Maze, RectGrid};

fn disciplines() -> Vec<DisciplineKind> {
    vec![
        DisciplineKind::Stack,
        DisciplineKind::Queue,
        DisciplineKind::priority(),
        DisciplineKind::Random,
        DisciplineKind::Median,
        DisciplineKind::SplitQueue { target: 3 },
        DisciplineKind::SplitStack { target: 3 },
    ]
}

fn assert_perfect(maze: &Maze) {
    assert_eq!(maze.passage_count(), maze.len() - 1);
    assert_eq!(maze.component_count(), 1);
    for edge in maze.passages() {
        let (a, b) = edge.endpoints();
        assert!(maze.grid().is_adjacent(a, b), "{edge} is not a grid edge");
    }
}

#[test]
fn vertex_growing_tree_spans_for_every_discipline() {
    for discipline in disciplines() {
        let options = GrowingTreeOptions::with_discipline(discipline.clone());
        let outcome =
            run::<VertexGrowingTree>(Maze::new(RectGrid::new(5, 7)), options, &Entropy::seeded(17))
                .unwrap();
        assert_perfect(outcome.maze());
        assert_eq!(outcome.algorithm().visited_count(), 35, "{discipline:?}");
        assert!(outcome.algorithm().queue().is_empty());
    }
}

#[test]
fn arc_growing_tree_spans_for_every_discipline() {
    for discipline in disciplines() {
        let options = GrowingTreeOptions::with_discipline(discipline.clone());
        let outcome =
            run::<ArcGrowingTree>(Maze::new(RectGrid::new(6, 4)), options, &Entropy::seeded(5))
                .unwrap();
        assert_perfect(outcome.maze());
        assert_eq!(outcome.algorithm().visited_count(), 24, "{discipline:?}");
    }
}

#[test]
fn fixed_seed_and_start_reproduce_the_maze() {
    let carve = |shuffle: bool| {
        let options = GrowingTreeOptions {
            discipline: DisciplineKind::Random,
            start: Some(0),
            shuffle,
            ..GrowingTreeOptions::default()
        };
        run::<VertexGrowingTree>(Maze::new(RectGrid::new(8, 8)), options, &Entropy::seeded(99))
            .unwrap()
            .into_maze()
            .passages()
            .to_vec()
    };
    assert_eq!(carve(false), carve(false));
    assert_eq!(carve(true), carve(true));
}

/// 2x2 grid: A=0 B=1 / C=2 D=3.
fn lopsided() -> Priorities {
    Priorities::new()
        .with_arc(0, 1, 1.0)
        .with_arc(1, 0, 100.0)
        .with_edge(0, 2, 10.0)
        .with_edge(1, 3, 20.0)
        .with_edge(2, 3, 40.0)
}

fn arc_prim(start: usize, priorities: Priorities) -> Vec<Edge> {
    let options = GrowingTreeOptions {
        discipline: DisciplineKind::priority(),
        start: Some(start),
        shuffle: false,
        priorities,
    };
    run::<ArcGrowingTree>(Maze::new(RectGrid::new(2, 2)), options, &Entropy::seeded(0))
        .unwrap()
        .into_maze()
        .passages()
        .to_vec()
}

#[test]
fn arc_prim_depends_on_the_start() {
    let table = lopsided();
    let cost = |arcs: &[(usize, usize)]| -> f64 {
        arcs.iter()
            .map(|&(t, h)| table.for_arc(Arc::new(t, h)).unwrap())
            .sum()
    };

    assert_eq!(
        arc_prim(0, lopsided()),
        vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 3)]
    );
    assert_eq!(cost(&[(0, 1), (0, 2), (1, 3)]), 31.0);

    assert_eq!(
        arc_prim(1, lopsided()),
        vec![Edge::new(1, 3), Edge::new(2, 3), Edge::new(0, 2)]
    );
    assert_eq!(cost(&[(1, 3), (3, 2), (2, 0)]), 70.0);
}

#[test]
fn symmetric_weights_make_prim_start_independent() {
    let symmetric = || {
        Priorities::new()
            .with_edge(0, 1, 1.0)
            .with_edge(0, 2, 10.0)
            .with_edge(1, 3, 20.0)
            .with_edge(2, 3, 40.0)
    };
    let mut trees: Vec<Vec<Edge>> = (0..4)
        .map(|start| {
            let mut tree = arc_prim(start, symmetric());
            tree.sort();
            tree
        })
        .collect();
    trees.dedup();
    assert_eq!(
        trees,
        vec![vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 3)]]
    );
}

#[test]
fn report_carries_queue_statistics() {
    let outcome = run::<VertexGrowingTree>(
        Maze::new(RectGrid::new(4, 4)),
        GrowingTreeOptions::with_discipline(DisciplineKind::Queue),
        &Entropy::seeded(1),
    )
    .unwrap();
    let report = outcome.report();
    assert_eq!(report.get("passages"), 15);
    assert_eq!(report.get("cells"), 16);
    assert_eq!(report.queues.len(), 1);
    let queue = &report.queues[0];
    assert_eq!(queue.discipline, "queue");
    assert_eq!(queue.entries, 16);
    assert_eq!(queue.exits, 16);
    assert!(report.to_string().contains("maximum length"));
}
