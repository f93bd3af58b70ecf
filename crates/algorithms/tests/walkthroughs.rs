use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use algorithms::{
    breadth_first_steps, bubble_sort_steps, depth_first_steps, random_values, run_live,
    BubbleSort, Graph, GraphSpec, NoDelay, Pacer, TokioPacer, SORT_LEN, SORT_VALUE_RANGE,
};
use async_trait::async_trait;
use rand::{rngs::SmallRng, SeedableRng};
use shared::{domain::NodeId, steps::TraversalStep};

fn sample_graph() -> Graph {
    Graph::from_spec(&GraphSpec::sample()).expect("sample graph")
}

fn names(graph: &Graph, ids: &[NodeId]) -> String {
    ids.iter().map(|&id| graph.label(id)).collect()
}

fn current(graph: &Graph, step: &TraversalStep) -> String {
    step.current
        .map(|id| graph.label(id).to_string())
        .unwrap_or_default()
}

#[test]
fn bfs_reproduces_the_walkthrough_table() {
    let graph = sample_graph();
    let steps = breadth_first_steps(&graph, "A").expect("bfs");
    assert_eq!(steps.len(), 7);

    let table: Vec<(String, String, String)> = steps
        .iter()
        .map(|step| {
            (
                names(&graph, &step.frontier),
                names(&graph, &step.visited),
                current(&graph, step),
            )
        })
        .collect();
    let expected = [
        ("A", "A", "A"),
        ("BC", "ABC", "A"),
        ("CDE", "ABCDE", "B"),
        ("DEF", "ABCDEF", "C"),
        ("EF", "ABCDEF", "D"),
        ("F", "ABCDEF", "E"),
        ("", "ABCDEF", "F"),
    ];
    for (row, (queue, visited, node)) in table.iter().zip(expected) {
        assert_eq!((row.0.as_str(), row.1.as_str(), row.2.as_str()), (queue, visited, node));
    }

    assert!(steps[0].description.starts_with("1. We start at node A."));
    assert!(steps[1].description.contains("(B and C)"));
    assert!(steps[4]
        .description
        .contains("D has no unvisited neighbors, so we do nothing."));
    assert!(steps[6].description.ends_with("Our queue is now empty, so BFS is complete!"));
}

#[test]
fn dfs_explores_first_neighbor_first() {
    let graph = sample_graph();
    let steps = depth_first_steps(&graph, "A").expect("dfs");
    assert_eq!(steps.len(), 7);

    let order: String = steps
        .iter()
        .skip(1)
        .map(|step| current(&graph, step))
        .collect();
    assert_eq!(order, "ABDECF");
    assert_eq!(names(&graph, &steps[1].frontier), "BC");
    assert_eq!(names(&graph, &steps[2].frontier), "DEC");
    assert!(steps[6].description.ends_with("so DFS is complete!"));
}

#[test]
fn traversal_from_another_start_node() {
    let graph = sample_graph();
    let steps = breadth_first_steps(&graph, "F").expect("bfs");
    let last = steps.last().expect("last");
    assert_eq!(names(&graph, &last.visited), "FCABDE");
}

#[test]
fn random_inputs_always_end_sorted_with_every_index_settled() {
    for seed in 0..64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let values = random_values(&mut rng, SORT_LEN, SORT_VALUE_RANGE);
        assert_eq!(values.len(), 10);
        assert!(values.iter().all(|v| SORT_VALUE_RANGE.contains(v)));

        let steps = bubble_sort_steps(values.clone());
        let last = steps.last().expect("final step");

        let mut expected = values;
        expected.sort_unstable();
        assert_eq!(last.values, expected, "seed {seed}");
        assert_eq!(last.sorted, (0..10).collect::<BTreeSet<_>>(), "seed {seed}");
    }
}

#[derive(Clone, Default)]
struct RecordingPacer {
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn suspend(&mut self, delay: Duration) {
        self.log
            .lock()
            .expect("log")
            .push(format!("wait {}", delay.as_millis()));
    }
}

#[tokio::test]
async fn live_run_suspends_before_evaluating_and_after_swapping() {
    let mut pacer = RecordingPacer::default();
    let log = Arc::clone(&pacer.log);
    let mut sort = BubbleSort::new(vec![3, 1, 2]);

    let events = run_live(&mut sort, Duration::from_millis(40), &mut pacer, |step| {
        let entry = if step.swapped {
            format!("swap {:?}", step.values)
        } else if let Some((l, r)) = step.comparing {
            format!("compare {l}-{r}")
        } else {
            format!("settle {:?}", step.sorted)
        };
        log.lock().expect("log").push(entry);
    })
    .await;

    let log = pacer.log.lock().expect("log").clone();
    assert_eq!(
        log,
        [
            "compare 0-1",
            "wait 40",
            "swap [1, 3, 2]",
            "wait 40",
            "compare 1-2",
            "wait 40",
            "swap [1, 2, 3]",
            "wait 40",
            "settle {2}",
            "compare 0-1",
            "wait 40",
            "settle {1, 2}",
            "settle {0, 1, 2}",
            "settle {0, 1, 2}",
        ]
    );
    assert_eq!(events, 9);
    assert_eq!(sort.values(), [1, 2, 3]);
}

#[tokio::test]
async fn zero_delay_run_matches_precomputed_steps() {
    let input = vec![50, 12, 99, 5, 73];
    let mut live = Vec::new();
    let mut sort = BubbleSort::new(input.clone());
    run_live(&mut sort, Duration::from_secs(1), &mut NoDelay, |step| live.push(step)).await;
    assert_eq!(live, bubble_sort_steps(input));
}

#[tokio::test(start_paused = true)]
async fn tokio_pacer_spends_one_delay_per_suspension() {
    let started = tokio::time::Instant::now();
    let mut sort = BubbleSort::new(vec![2, 1]);
    run_live(&mut sort, Duration::from_millis(500), &mut TokioPacer, |_| {}).await;
    // one comparison plus one swap
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(1010), "{elapsed:?}");
}
