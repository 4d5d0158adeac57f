use std::{
    ops::ControlFlow,
    thread,
    time::{Duration, Instant},
};

use crate::{
    Color, Tour,
    algo::{Step, StepSink},
    solver::shared::SharedState,
};

/// Minimum gap between snapshots when the run is not paced.
pub const PUBLISH_INTERVAL: Duration = Duration::from_millis(16);
/// Longest uninterrupted sleep while pacing.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Sink used by the worker: stops on interrupt, colors the edges being
/// worked on, sleeps between visible steps and publishes snapshots.
pub(crate) struct PacedSink<'a> {
    shared: &'a SharedState,
    active: Option<usize>,
    candidates: Option<(usize, usize)>,
    last_publish: Option<Instant>,
}

impl<'a> PacedSink<'a> {
    pub(crate) fn new(shared: &'a SharedState) -> Self {
        Self {
            shared,
            active: None,
            candidates: None,
            last_publish: None,
        }
    }

    /// Drops any remaining highlight, e.g. after an interrupted run.
    pub(crate) fn clear_highlights(&mut self, tour: &mut Tour) {
        self.clear_active(tour);
        self.clear_candidates(tour);
    }

    fn highlight(&mut self, step: Step, tour: &mut Tour) {
        match step {
            Step::Visited { point } => {
                self.clear_active(tour);
                tour.points_mut()[point].set_edge_color(Color::HIGHLIGHT_A);
                self.active = Some(point);
            }
            Step::Closed => self.clear_active(tour),
            Step::Candidate { i, j } => {
                self.clear_candidates(tour);
                let stops = tour.route().as_slice();
                let (a, b) = (stops[i], stops[j]);
                let points = tour.points_mut();
                points[a].set_edge_color(Color::HIGHLIGHT_A);
                points[b].set_edge_color(Color::HIGHLIGHT_B);
                self.candidates = Some((a, b));
            }
            Step::Swapped { .. } | Step::Kept { .. } => self.clear_candidates(tour),
            Step::PassFinished { .. } => {}
        }
    }

    fn clear_active(&mut self, tour: &mut Tour) {
        if let Some(point) = self.active.take() {
            tour.points_mut()[point].set_edge_color(Color::DEFAULT_LINE);
        }
    }

    // Candidates are remembered by point, so a reversal between highlight
    // and reset does not matter.
    fn clear_candidates(&mut self, tour: &mut Tour) {
        if let Some((a, b)) = self.candidates.take() {
            let points = tour.points_mut();
            points[a].set_edge_color(Color::DEFAULT_LINE);
            points[b].set_edge_color(Color::DEFAULT_LINE);
        }
    }

    fn publish(&mut self, tour: &Tour, force: bool) {
        let due = self
            .last_publish
            .is_none_or(|at| at.elapsed() >= PUBLISH_INTERVAL);
        if force || due {
            self.shared.publish(tour);
            self.last_publish = Some(Instant::now());
        }
    }

    /// Sleeps for `pacing`, waking early when an interrupt arrives.
    fn pause(&self, pacing: Duration) -> ControlFlow<()> {
        let deadline = Instant::now() + pacing;
        loop {
            if self.shared.is_interrupted() {
                return ControlFlow::Break(());
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return ControlFlow::Continue(());
            }
            thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

impl StepSink for PacedSink<'_> {
    fn on_step(&mut self, step: Step, tour: &mut Tour) -> ControlFlow<()> {
        if self.shared.is_interrupted() {
            return ControlFlow::Break(());
        }

        self.highlight(step, tour);

        let pacing = self.shared.pacing();
        if !step.is_paced() {
            return ControlFlow::Continue(());
        }
        if pacing.is_zero() {
            self.publish(tour, false);
            return ControlFlow::Continue(());
        }

        self.publish(tour, true);
        self.pause(pacing)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::PacedSink;
    use crate::{
        Color, Point, Tour,
        algo::{Step, StepSink},
        solver::shared::SharedState,
    };

    fn square_tour() -> Tour {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        Tour::with_route(points, vec![0, 1, 2, 3, 0]).expect("valid route")
    }

    #[test]
    fn interrupt_breaks_before_any_work() {
        let shared = SharedState::default();
        shared.request_interrupt();
        let mut sink = PacedSink::new(&shared);
        let mut tour = square_tour();

        assert!(sink.on_step(Step::Candidate { i: 0, j: 2 }, &mut tour).is_break());
        assert_eq!(tour.points()[0].edge_color(), Color::DEFAULT_LINE);
    }

    #[test]
    fn candidates_are_highlighted_then_reset() {
        let shared = SharedState::default();
        let mut sink = PacedSink::new(&shared);
        let mut tour = square_tour();

        let _ = sink.on_step(Step::Candidate { i: 0, j: 2 }, &mut tour);
        assert_eq!(tour.points()[0].edge_color(), Color::HIGHLIGHT_A);
        assert_eq!(tour.points()[2].edge_color(), Color::HIGHLIGHT_B);

        let _ = sink.on_step(Step::Kept { i: 0, j: 2 }, &mut tour);
        assert!(
            tour.points()
                .iter()
                .all(|p| p.edge_color() == Color::DEFAULT_LINE)
        );
    }

    #[test]
    fn visited_edge_moves_with_the_route() {
        let shared = SharedState::default();
        let mut sink = PacedSink::new(&shared);
        let mut tour = square_tour();

        let _ = sink.on_step(Step::Visited { point: 1 }, &mut tour);
        let _ = sink.on_step(Step::Visited { point: 2 }, &mut tour);
        assert_eq!(tour.points()[1].edge_color(), Color::DEFAULT_LINE);
        assert_eq!(tour.points()[2].edge_color(), Color::HIGHLIGHT_A);

        let _ = sink.on_step(Step::Closed, &mut tour);
        assert_eq!(tour.points()[2].edge_color(), Color::DEFAULT_LINE);
    }

    #[test]
    fn paced_steps_sleep_and_publish() {
        let shared = SharedState::new(Tour::default(), 20);
        let mut sink = PacedSink::new(&shared);
        let mut tour = square_tour();

        let started = Instant::now();
        assert!(sink.on_step(Step::Closed, &mut tour).is_continue());
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(shared.snapshot().route().len(), 5);
    }

    #[test]
    fn unpaced_steps_are_not_published_every_time() {
        let shared = SharedState::new(Tour::default(), 0);
        let mut sink = PacedSink::new(&shared);
        let mut tour = square_tour();

        let _ = sink.on_step(Step::Closed, &mut tour);
        let first = shared.snapshot();
        let _ = sink.on_step(Step::Closed, &mut tour);

        // Second publish falls inside the throttle window.
        assert!(std::sync::Arc::ptr_eq(&first, &shared.snapshot()));
    }
}
