//! Bubble sort as an explicit sequence of compare/swap/settle events.
//!
//! The same state machine backs both the precomputed step table played by
//! the step player and the live run, which suspends through a [`Pacer`]
//! between events.

use std::{collections::BTreeSet, ops::RangeInclusive, time::Duration};

use async_trait::async_trait;
use rand::Rng;
use shared::steps::SortStep;
use tracing::debug;

pub const SORT_LEN: usize = 10;
pub const SORT_VALUE_RANGE: RangeInclusive<u32> = 5..=104;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortEvent {
    Compare { left: usize, right: usize },
    Swap { left: usize, right: usize },
    /// A pass finished and `index` holds its final value.
    Settled { index: usize },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Compare,
    Evaluate,
    Finished,
    Done,
}

#[derive(Debug, Clone)]
pub struct BubbleSort {
    values: Vec<u32>,
    sorted: BTreeSet<usize>,
    pass: usize,
    index: usize,
    phase: Phase,
}

impl BubbleSort {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            sorted: BTreeSet::new(),
            pass: 0,
            index: 0,
            phase: Phase::Compare,
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Produces the next event. A comparison is announced by `Compare` and
    /// only evaluated on the following call, which yields `Swap` when the
    /// pair was out of order.
    pub fn advance(&mut self) -> Option<SortEvent> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Finished => {
                    self.phase = Phase::Done;
                    return Some(SortEvent::Finished);
                }
                Phase::Compare => {
                    let len = self.values.len();
                    if self.pass >= len {
                        self.phase = Phase::Finished;
                        continue;
                    }
                    let limit = len - self.pass - 1;
                    if self.index < limit {
                        self.phase = Phase::Evaluate;
                        return Some(SortEvent::Compare {
                            left: self.index,
                            right: self.index + 1,
                        });
                    }
                    self.sorted.insert(limit);
                    self.pass += 1;
                    self.index = 0;
                    return Some(SortEvent::Settled { index: limit });
                }
                Phase::Evaluate => {
                    let left = self.index;
                    let right = left + 1;
                    self.index += 1;
                    self.phase = Phase::Compare;
                    if self.values[left] > self.values[right] {
                        self.values.swap(left, right);
                        return Some(SortEvent::Swap { left, right });
                    }
                }
            }
        }
    }

    /// Renderable state right after `event`.
    pub fn snapshot(&self, event: SortEvent) -> SortStep {
        let (comparing, swapped, description) = match event {
            SortEvent::Compare { left, right } => (
                Some((left, right)),
                false,
                format!(
                    "Comparing positions {left} and {right} ({} vs {}).",
                    self.values[left], self.values[right]
                ),
            ),
            SortEvent::Swap { left, right } => (
                Some((left, right)),
                true,
                format!(
                    "{} > {}, so we swap positions {left} and {right}.",
                    self.values[right], self.values[left]
                ),
            ),
            SortEvent::Settled { index } => (
                None,
                false,
                format!(
                    "Pass {} complete: position {index} now holds its final value {}.",
                    self.pass, self.values[index]
                ),
            ),
            SortEvent::Finished => (None, false, "The array is sorted!".to_string()),
        };

        SortStep {
            values: self.values.clone(),
            comparing,
            swapped,
            sorted: self.sorted.clone(),
            description,
        }
    }
}

/// Runs the whole sort and records a snapshot after every event.
pub fn bubble_sort_steps(values: Vec<u32>) -> Vec<SortStep> {
    let mut sort = BubbleSort::new(values);
    let mut steps = Vec::new();
    while let Some(event) = sort.advance() {
        steps.push(sort.snapshot(event));
    }
    debug!(steps = steps.len(), "derived bubble sort steps");
    steps
}

pub fn random_values<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    range: RangeInclusive<u32>,
) -> Vec<u32> {
    (0..len).map(|_| rng.random_range(range.clone())).collect()
}

/// Suspension point between sort events.
#[async_trait]
pub trait Pacer: Send {
    async fn suspend(&mut self, delay: Duration);
}

/// Never waits; for tests and step-table generation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn suspend(&mut self, _delay: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn suspend(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Drives `sort` to completion, handing every snapshot to `observe`.
/// Suspends for `delay` after each comparison is announced (before it is
/// evaluated) and again after each swap. Returns the number of events.
pub async fn run_live<P, F>(
    sort: &mut BubbleSort,
    delay: Duration,
    pacer: &mut P,
    mut observe: F,
) -> usize
where
    P: Pacer + ?Sized,
    F: FnMut(SortStep) + Send,
{
    let mut events = 0;
    while let Some(event) = sort.advance() {
        events += 1;
        observe(sort.snapshot(event));
        if matches!(event, SortEvent::Compare { .. } | SortEvent::Swap { .. }) {
            pacer.suspend(delay).await;
        }
    }
    debug!(events, "live sort finished");
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_inputs_finish_cleanly() {
        assert_eq!(bubble_sort_steps(Vec::new()).len(), 1);

        let steps = bubble_sort_steps(vec![7]);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].sorted, BTreeSet::from([0]));
        assert_eq!(steps[1].description, "The array is sorted!");
    }

    #[test]
    fn swap_follows_its_compare() {
        let mut sort = BubbleSort::new(vec![2, 1]);
        assert_eq!(
            sort.advance(),
            Some(SortEvent::Compare { left: 0, right: 1 })
        );
        assert_eq!(sort.values(), [2, 1]);
        assert_eq!(sort.advance(), Some(SortEvent::Swap { left: 0, right: 1 }));
        assert_eq!(sort.values(), [1, 2]);
        assert_eq!(sort.advance(), Some(SortEvent::Settled { index: 1 }));
        assert_eq!(sort.advance(), Some(SortEvent::Settled { index: 0 }));
        assert_eq!(sort.advance(), Some(SortEvent::Finished));
        assert_eq!(sort.advance(), None);
        assert!(sort.is_done());
    }

    #[test]
    fn in_order_pair_produces_no_swap() {
        let steps = bubble_sort_steps(vec![1, 2]);
        assert!(steps.iter().all(|step| !step.swapped));
        assert_eq!(steps[0].comparing, Some((0, 1)));
    }

    #[test]
    fn swap_description_names_the_pair() {
        let mut sort = BubbleSort::new(vec![9, 4]);
        sort.advance();
        let event = sort.advance().expect("swap");
        let step = sort.snapshot(event);
        assert!(step.swapped);
        assert_eq!(step.description, "9 > 4, so we swap positions 0 and 1.");
    }
}
