//! Step player: walks a cursor through a fixed step sequence under manual
//! control or a single self-rearming tick timer.

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Weak},
};

use shared::{
    domain::SpeedRange,
    protocol::{PlayerCommand, PlayerSnapshot},
};
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

mod playhead;
mod source;
mod timer;

pub use playhead::{CursorFloor, Playhead, TickOutcome};
pub use source::{FixedSteps, RandomSortSource, StepSource};
pub use timer::TickTimer;

const EVENT_CAPACITY: usize = 64;

type TickFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

pub struct StepPlayer<Src: StepSource> {
    shared: Arc<Shared<Src>>,
}

struct Shared<Src: StepSource> {
    state: Mutex<PlayerState<Src>>,
    events: broadcast::Sender<PlayerSnapshot>,
}

struct PlayerState<Src: StepSource> {
    source: Src,
    steps: Vec<Src::Step>,
    playhead: Playhead,
    timer: TickTimer,
}

impl<Src: StepSource> PlayerState<Src> {
    fn step_at_cursor(&self) -> Option<Src::Step> {
        match self.playhead.cursor() {
            Some(cursor) => self.steps.get(cursor).cloned(),
            None => self.source.preview(),
        }
    }
}

impl<Src: StepSource> Clone for StepPlayer<Src> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<Src: StepSource> StepPlayer<Src> {
    pub fn new(mut source: Src, speeds: SpeedRange) -> Self {
        let steps = source.generate();
        let playhead = Playhead::new(steps.len(), source.floor(), speeds);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(PlayerState {
                    source,
                    steps,
                    playhead,
                    timer: TickTimer::new(),
                }),
                events,
            }),
        }
    }

    /// Snapshots published after every transition and tick.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerSnapshot> {
        self.shared.events.subscribe()
    }

    pub async fn snapshot(&self) -> PlayerSnapshot {
        self.shared.state.lock().await.playhead.snapshot()
    }

    /// The step under the cursor, or the source's preview before a run.
    pub async fn current_step(&self) -> Option<Src::Step> {
        self.shared.state.lock().await.step_at_cursor()
    }

    /// Snapshot and step read under one lock, so they always agree.
    pub async fn view(&self) -> (PlayerSnapshot, Option<Src::Step>) {
        let state = self.shared.state.lock().await;
        (state.playhead.snapshot(), state.step_at_cursor())
    }

    pub async fn steps(&self) -> Vec<Src::Step> {
        self.shared.state.lock().await.steps.clone()
    }

    #[cfg(test)]
    async fn with_source<R>(&self, f: impl FnOnce(&Src) -> R) -> R {
        f(&self.shared.state.lock().await.source)
    }

    #[cfg(test)]
    async fn timer_armed(&self) -> bool {
        self.shared.state.lock().await.timer.is_armed()
    }

    pub async fn next(&self) -> PlayerSnapshot {
        self.transition("next", |state| {
            state.playhead.next();
        })
        .await
    }

    pub async fn previous(&self) -> PlayerSnapshot {
        self.transition("previous", |state| {
            state.playhead.previous();
        })
        .await
    }

    pub async fn toggle_play(&self) -> PlayerSnapshot {
        self.transition("toggle_play", |state| state.playhead.toggle_play())
            .await
    }

    pub async fn play(&self) -> PlayerSnapshot {
        self.transition("play", |state| state.playhead.set_playing(true))
            .await
    }

    pub async fn pause(&self) -> PlayerSnapshot {
        self.transition("pause", |state| state.playhead.set_playing(false))
            .await
    }

    /// Back to the floor, paused. Regenerating sources draw a new sequence.
    pub async fn reset(&self) -> PlayerSnapshot {
        self.transition("reset", |state| {
            if state.source.regenerates() {
                state.steps = state.source.generate();
            }
            let len = state.steps.len();
            state.playhead.reset(len);
        })
        .await
    }

    /// Takes effect from the next armed tick.
    pub async fn set_speed(&self, ms: u64) -> PlayerSnapshot {
        self.transition("set_speed", |state| {
            state.playhead.set_speed(ms);
        })
        .await
    }

    pub async fn apply(&self, command: PlayerCommand) -> PlayerSnapshot {
        match command {
            PlayerCommand::Next => self.next().await,
            PlayerCommand::Previous => self.previous().await,
            PlayerCommand::TogglePlay => self.toggle_play().await,
            PlayerCommand::Play => self.play().await,
            PlayerCommand::Pause => self.pause().await,
            PlayerCommand::Reset => self.reset().await,
            PlayerCommand::SetSpeed { ms } => self.set_speed(ms).await,
        }
    }

    /// Pauses and drops any pending tick.
    pub async fn shutdown(&self) {
        let mut state = self.shared.state.lock().await;
        state.timer.cancel();
        state.playhead.set_playing(false);
        debug!("player shut down");
    }

    async fn transition(
        &self,
        op: &'static str,
        apply: impl FnOnce(&mut PlayerState<Src>),
    ) -> PlayerSnapshot {
        let mut state = self.shared.state.lock().await;
        apply(&mut state);
        reschedule(&self.shared, &mut state);
        let snapshot = state.playhead.snapshot();
        drop(state);

        debug!(
            op,
            cursor = ?snapshot.cursor,
            playing = snapshot.playing,
            speed_ms = snapshot.speed_ms,
            "player transition"
        );
        let _ = self.shared.events.send(snapshot);
        snapshot
    }
}

/// Cancels the pending tick and arms a new one if still playing.
fn reschedule<Src: StepSource>(shared: &Arc<Shared<Src>>, state: &mut PlayerState<Src>) {
    state.timer.cancel();
    if !state.playhead.should_arm() {
        return;
    }
    let weak = Arc::downgrade(shared);
    state
        .timer
        .arm(state.playhead.delay(), move |generation| {
            on_tick(weak, generation)
        });
}

fn on_tick<Src: StepSource>(weak: Weak<Shared<Src>>, generation: u64) -> TickFuture {
    Box::pin(async move {
        let Some(shared) = weak.upgrade() else {
            return;
        };

        let mut state = shared.state.lock().await;
        if !state.timer.release(generation) {
            debug!(generation, "stale tick ignored");
            return;
        }
        let outcome = state.playhead.tick();
        reschedule(&shared, &mut state);
        let snapshot = state.playhead.snapshot();
        drop(state);

        debug!(?outcome, cursor = ?snapshot.cursor, "tick");
        let _ = shared.events.send(snapshot);
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
