use thicket::carve::{BorderPolicy, Forest, ForestOptions, TaskSpec};
use thicket::collections::DisciplineKind;
use thicket::engine::run;
use thicket::schedule::SchedulerKind;
use thicket::{Entropy, Maze, RectGrid, Status};

fn tasks(k: usize) -> Vec<TaskSpec> {
    let mix = [
        DisciplineKind::Stack,
        DisciplineKind::Queue,
        DisciplineKind::Random,
        DisciplineKind::priority(),
        DisciplineKind::Median,
    ];
    (0..k)
        .map(|i| TaskSpec {
            weight: 1 + i as u32,
            ..TaskSpec::new(mix[i % mix.len()].clone(), None)
        })
        .collect()
}

#[test]
fn k_tasks_stitch_into_one_tree() {
    for scheduler in [SchedulerKind::RoundRobin, SchedulerKind::Tournament] {
        for border in [BorderPolicy::Shuffle, BorderPolicy::InsertionOrder] {
            for k in 1..=5 {
                let options = ForestOptions {
                    tasks: tasks(k),
                    scheduler,
                    border,
                    shuffle: true,
                };
                let outcome =
                    run::<Forest>(Maze::new(RectGrid::new(6, 6)), options, &Entropy::seeded(k as u64))
                        .unwrap();
                let forest = outcome.algorithm();
                assert!(outcome.maze().is_spanning_tree(), "{scheduler:?} {border:?} k={k}");
                assert_eq!(forest.accepted_joins(), k - 1);
                assert_eq!(forest.residual_components(), 1);
                assert_eq!(forest.scheduled(), 0);

                let claimed: usize = (0..k).map(|t| forest.task_stats(t).unwrap().claimed).sum();
                assert_eq!(claimed, 36);
                for cell in 0..36 {
                    assert!(forest.owner(cell).is_some());
                }
            }
        }
    }
}

#[test]
fn scheduled_tasks_only_decrease() {
    let options = ForestOptions {
        tasks: tasks(4),
        ..ForestOptions::default()
    };
    let mut status =
        Status::<Forest>::new(Maze::new(RectGrid::new(5, 5)), options, &Entropy::seeded(3)).unwrap();
    let mut previous = status.algorithm().scheduled();
    assert_eq!(previous, 4);
    while status.step().unwrap() {
        let now = status.algorithm().scheduled();
        assert!(now <= previous);
        previous = now;
    }
    assert_eq!(previous, 0);
}

#[test]
fn round_robin_rotates_over_live_tasks() {
    let options = ForestOptions {
        tasks: [0, 4, 8]
            .into_iter()
            .map(|seed| TaskSpec::new(DisciplineKind::Stack, Some(seed)))
            .collect(),
        scheduler: SchedulerKind::RoundRobin,
        border: BorderPolicy::InsertionOrder,
        shuffle: false,
    };
    let outcome =
        run::<Forest>(Maze::new(RectGrid::new(3, 3)), options, &Entropy::seeded(0)).unwrap();
    let forest = outcome.algorithm();
    assert_eq!(&forest.turns()[..6], &[0, 1, 2, 0, 1, 2]);
    assert!(outcome.maze().is_spanning_tree());

    let report = outcome.report();
    assert_eq!(report.get("tasks"), 3);
    assert_eq!(report.get("accepted joins"), 2);
    assert_eq!(report.queues.len(), 3);
}

#[test]
fn options_load_from_json() {
    let options: ForestOptions = serde_json::from_str(
        r#"{
            "tasks": [{"seed": 0}, {"discipline": {"kind": "queue"}, "weight": 3}],
            "scheduler": "tournament",
            "border": "insertion-order"
        }"#,
    )
    .unwrap();
    assert_eq!(options.tasks.len(), 2);
    assert_eq!(options.tasks[0].seed, Some(0));
    assert_eq!(options.tasks[1].weight, 3);
    assert_eq!(options.scheduler, SchedulerKind::Tournament);
    assert_eq!(options.border, BorderPolicy::InsertionOrder);
    assert!(options.shuffle);
}
