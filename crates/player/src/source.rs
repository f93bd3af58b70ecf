use std::{collections::BTreeSet, ops::RangeInclusive};

use algorithms::{
    bubble_sort_steps, random_values, traversal_steps, Graph, TraversalOrder, SORT_LEN,
    SORT_VALUE_RANGE,
};
use rand::{rngs::SmallRng, SeedableRng};
use shared::{
    error::VizError,
    steps::{SortStep, TraversalStep},
};
use tracing::info;

use crate::playhead::CursorFloor;

/// Supplies the step sequence a player walks through.
pub trait StepSource: Send + 'static {
    type Step: Clone + Send + Sync + 'static;

    fn floor(&self) -> CursorFloor {
        CursorFloor::First
    }

    /// Produces the sequence. Called once at construction and again on
    /// every reset when [`StepSource::regenerates`] is true.
    fn generate(&mut self) -> Vec<Self::Step>;

    fn regenerates(&self) -> bool {
        false
    }

    /// What to show while the cursor sits before the first step.
    fn preview(&self) -> Option<Self::Step> {
        None
    }
}

/// A sequence computed up front and replayed unchanged.
#[derive(Debug, Clone)]
pub struct FixedSteps<S> {
    steps: Vec<S>,
}

impl<S> FixedSteps<S> {
    pub fn new(steps: Vec<S>) -> Self {
        Self { steps }
    }
}

impl FixedSteps<TraversalStep> {
    pub fn traversal(graph: &Graph, start: &str, order: TraversalOrder) -> Result<Self, VizError> {
        Ok(Self::new(traversal_steps(graph, start, order)?))
    }
}

impl<S: Clone + Send + Sync + 'static> StepSource for FixedSteps<S> {
    type Step = S;

    fn generate(&mut self) -> Vec<S> {
        self.steps.clone()
    }
}

/// Bubble sort over a freshly drawn random array on every reset.
#[derive(Debug, Clone)]
pub struct RandomSortSource {
    rng: SmallRng,
    len: usize,
    range: RangeInclusive<u32>,
    input: Vec<u32>,
}

impl RandomSortSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::with_rng(rng, SORT_LEN, SORT_VALUE_RANGE)
    }

    pub fn with_rng(rng: SmallRng, len: usize, range: RangeInclusive<u32>) -> Self {
        Self {
            rng,
            len,
            range,
            input: Vec::new(),
        }
    }

    /// The unsorted array behind the current sequence.
    pub fn input(&self) -> &[u32] {
        &self.input
    }
}

impl StepSource for RandomSortSource {
    type Step = SortStep;

    fn floor(&self) -> CursorFloor {
        CursorFloor::BeforeStart
    }

    fn generate(&mut self) -> Vec<SortStep> {
        self.input = random_values(&mut self.rng, self.len, self.range.clone());
        info!(input = ?self.input, "generated new sort input");
        bubble_sort_steps(self.input.clone())
    }

    fn regenerates(&self) -> bool {
        true
    }

    fn preview(&self) -> Option<SortStep> {
        Some(SortStep {
            values: self.input.clone(),
            comparing: None,
            swapped: false,
            sorted: BTreeSet::new(),
            description: "Press play or next to start sorting.".to_string(),
        })
    }
}
