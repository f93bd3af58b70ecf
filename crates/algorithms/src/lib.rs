pub mod graph;
pub mod sort;
pub mod traversal;

pub use graph::{Graph, GraphSpec, NodeSpec};
pub use sort::{
    bubble_sort_steps, random_values, run_live, BubbleSort, NoDelay, Pacer, SortEvent,
    TokioPacer, SORT_LEN, SORT_VALUE_RANGE,
};
pub use traversal::{breadth_first_steps, depth_first_steps, traversal_steps, TraversalOrder};
