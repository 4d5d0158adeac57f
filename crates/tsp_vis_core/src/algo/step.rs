use std::ops::ControlFlow;

use crate::Tour;

/// Progress events emitted by the algorithms.
///
/// Positions (`i`, `j`) index the route; `point` indexes the point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// `point` was appended to the route.
    Visited { point: usize },
    /// The route was closed back to its start.
    Closed,
    /// 2-opt is about to evaluate the edges leaving route positions `i` and `j`.
    Candidate { i: usize, j: usize },
    /// The candidate improved the tour; positions `i + 1..=j` were reversed.
    Swapped { i: usize, j: usize, delta: f64 },
    /// The candidate was rejected and the route is unchanged.
    Kept { i: usize, j: usize },
    /// A full 2-opt pass over all pairs finished.
    PassFinished { pass: usize, swaps: usize },
}

impl Step {
    /// Whether a paced consumer should wait after this step.
    pub fn is_paced(&self) -> bool {
        matches!(
            self,
            Self::Visited { .. } | Self::Closed | Self::Candidate { .. }
        )
    }
}

/// Consumer of [`Step`]s. Returning `Break` asks the algorithm to stop at
/// this step, leaving the tour in a valid partial state.
pub trait StepSink {
    fn on_step(&mut self, step: Step, tour: &mut Tour) -> ControlFlow<()>;
}

/// How an algorithm run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

impl Outcome {
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

/// Runs algorithms at full speed and never stops them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unpaced;

impl StepSink for Unpaced {
    fn on_step(&mut self, _step: Step, _tour: &mut Tour) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F> StepSink for F
where
    F: FnMut(Step, &mut Tour) -> ControlFlow<()>,
{
    fn on_step(&mut self, step: Step, tour: &mut Tour) -> ControlFlow<()> {
        self(step, tour)
    }
}
