use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

/// Handle to at most one pending tick.
///
/// Arming always cancels the previous tick first. Each arm gets a fresh
/// generation number; a tick that wakes up after being superseded sees a
/// different generation and must not act.
#[derive(Debug, Default)]
pub struct TickTimer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm<F, Fut>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let fire = on_fire(self.generation);
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire.await;
        }));
    }

    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Called by the firing tick so that re-arming from inside it does not
    /// abort the running task.
    pub fn release(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.handle = None;
        true
    }

    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
