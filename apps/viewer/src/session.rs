//! Interactive session: stdin commands in, rendered frames out.

use std::{sync::Arc, time::Duration};

use algorithms::{run_live, BubbleSort, TokioPacer};
use anyhow::{Context, Result};
use player::{StepPlayer, StepSource};
use shared::domain::{Algorithm, SpeedRange};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::broadcast::error::RecvError,
    task::JoinHandle,
};
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    StreamExt,
};
use tracing::{debug, info, warn};

use crate::{
    controller::{command_name, parse_input, Input, HELP},
    render::{frame, BarRenderer, StepRenderer},
};

pub async fn run_interactive<Src, R>(
    player: StepPlayer<Src>,
    renderer: R,
    speeds: SpeedRange,
    autoplay: bool,
) -> Result<()>
where
    Src: StepSource,
    R: StepRenderer<Src::Step>,
{
    run_session(player, renderer, speeds, autoplay, tokio::io::stdin()).await
}

/// Drives `player` from the lines of `input` until `quit` or end of input.
/// At end of input a running autoplay is allowed to finish first.
async fn run_session<Src, R, I>(
    player: StepPlayer<Src>,
    renderer: R,
    speeds: SpeedRange,
    autoplay: bool,
    input: I,
) -> Result<()>
where
    Src: StepSource,
    R: StepRenderer<Src::Step>,
    I: AsyncRead + Unpin,
{
    let renderer = Arc::new(renderer);
    print_frame(&player, renderer.as_ref()).await;
    println!("{HELP}");

    let render_task = spawn_render_loop(player.clone(), Arc::clone(&renderer));
    if autoplay {
        player.play().await;
    }

    let mut lines = BufReader::new(input).lines();
    loop {
        let Some(line) = lines
            .next_line()
            .await
            .context("failed to read command from stdin")?
        else {
            debug!("input closed");
            wait_until_paused(&player).await;
            break;
        };

        match parse_input(&line) {
            Ok(Input::Command(command)) => {
                debug!(command = command_name(&command), "dispatching input");
                player.apply(command).await;
            }
            Ok(Input::Nudge(notches)) => {
                let current = player.snapshot().await.speed_ms;
                player.set_speed(speeds.nudge(current, notches)).await;
            }
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::Quit) => break,
            Err(err) => eprintln!("{err}"),
        }
    }

    player.shutdown().await;
    render_task.abort();
    Ok(())
}

fn spawn_render_loop<Src, R>(player: StepPlayer<Src>, renderer: Arc<R>) -> JoinHandle<()>
where
    Src: StepSource,
    R: StepRenderer<Src::Step>,
{
    tokio::spawn(async move {
        let mut events = BroadcastStream::new(player.subscribe());
        while let Some(event) = events.next().await {
            match event {
                Ok(_) => print_frame(&player, renderer.as_ref()).await,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(skipped, "renderer fell behind; frames dropped");
                }
            }
        }
    })
}

async fn print_frame<Src, R>(player: &StepPlayer<Src>, renderer: &R)
where
    Src: StepSource,
    R: StepRenderer<Src::Step>,
{
    let (snapshot, step) = player.view().await;
    println!("\n{}", frame(renderer, &snapshot, step.as_ref()));
}

/// Lets autoplay finish when input ends, e.g. `viewer bfs --autoplay < /dev/null`.
async fn wait_until_paused<Src: StepSource>(player: &StepPlayer<Src>) {
    // Subscribe before the first check so a tick in between is not missed.
    let mut events = player.subscribe();
    while player.snapshot().await.playing {
        match events.recv().await {
            Ok(_) | Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => break,
        }
    }
}

/// Sorts `values` in place on screen, pausing `delay` around every
/// comparison and swap. Runs to completion unless interrupted with Ctrl-C.
pub async fn run_live_sort(values: Vec<u32>, delay: Duration) -> Result<()> {
    let renderer = BarRenderer;
    let mut sort = BubbleSort::new(values);
    println!("== {} (live) ==", renderer.title());
    println!(
        "{}: {}",
        Algorithm::BubbleSort.frontier_name(),
        render_values(sort.values())
    );

    let mut pacer = TokioPacer;
    let run = run_live(&mut sort, delay, &mut pacer, |step| {
        println!("\n{}", renderer.body(&step));
    });

    tokio::select! {
        events = run => info!(events, "live sort complete"),
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            info!("live sort interrupted");
        }
    }

    if !sort.is_done() {
        println!("Stopped before the array was sorted.");
    }
    Ok(())
}

fn render_values(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
