use super::*;
use algorithms::{Graph, GraphSpec, TraversalOrder};
use player::FixedSteps;
use shared::steps::TraversalStep;
use tokio::time::sleep;

use crate::render::GraphRenderer;

fn bfs() -> (StepPlayer<FixedSteps<TraversalStep>>, GraphRenderer) {
    let graph = Graph::from_spec(&GraphSpec::sample()).expect("graph");
    let source =
        FixedSteps::traversal(&graph, "A", TraversalOrder::BreadthFirst).expect("bfs steps");
    let player = StepPlayer::new(source, SpeedRange::default());
    (player, GraphRenderer::new(graph, Algorithm::BreadthFirst))
}

#[tokio::test(start_paused = true)]
async fn waiting_lets_autoplay_reach_the_last_step() {
    let (player, _) = bfs();
    player.play().await;

    wait_until_paused(&player).await;
    let snapshot = player.snapshot().await;
    assert_eq!(snapshot.cursor, Some(6));
    assert!(!snapshot.playing);
}

#[tokio::test(start_paused = true)]
async fn waiting_on_a_paused_player_returns_immediately() {
    let (player, _) = bfs();
    player.next().await;
    wait_until_paused(&player).await;
    assert_eq!(player.snapshot().await.cursor, Some(1));
}

#[tokio::test(start_paused = true)]
async fn end_of_input_drains_autoplay() {
    let (player, renderer) = bfs();
    run_session(
        player.clone(),
        renderer,
        SpeedRange::default(),
        true,
        &b""[..],
    )
    .await
    .expect("session");

    let snapshot = player.snapshot().await;
    assert_eq!(snapshot.cursor, Some(6));
    assert!(!snapshot.playing);
}

#[tokio::test(start_paused = true)]
async fn quit_stops_playback_for_good() {
    let (player, renderer) = bfs();
    let input = b"n\nplay\nq\nn\n";
    run_session(
        player.clone(),
        renderer,
        SpeedRange::default(),
        false,
        &input[..],
    )
    .await
    .expect("session");

    let snapshot = player.snapshot().await;
    assert_eq!(snapshot.cursor, Some(1));
    assert!(!snapshot.playing);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(player.snapshot().await.cursor, Some(1));
}

#[tokio::test(start_paused = true)]
async fn plus_and_minus_move_the_speed_by_notches() {
    let (player, renderer) = bfs();
    player.set_speed(1250).await;
    let input = b"+\n+\n-\nslower\nq\n";
    run_session(
        player.clone(),
        renderer,
        SpeedRange::default(),
        false,
        &input[..],
    )
    .await
    .expect("session");
    assert_eq!(player.snapshot().await.speed_ms, 2250);
}

#[tokio::test(start_paused = true)]
async fn bad_lines_are_reported_and_skipped() {
    let (player, renderer) = bfs();
    let input = b"jump\nspeed fast\nn\nq\n";
    run_session(
        player.clone(),
        renderer,
        SpeedRange::default(),
        false,
        &input[..],
    )
    .await
    .expect("session");
    assert_eq!(player.snapshot().await.cursor, Some(1));
}
