//! Background solver with a command/query surface for a renderer.
//!
//! One worker thread runs at a time. It owns a private copy of the tour and
//! publishes snapshots into [`SharedState`]; the controlling side only ever
//! reads those snapshots.

mod pacing;
mod shared;

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Bounds, Color, Error, Result, Tour,
    algo::{self, Algorithm, AlgorithmSettings, Outcome},
};

use pacing::PacedSink;
use shared::{SharedState, SolvingGuard};

pub use pacing::PUBLISH_INTERVAL;

const WORKER_THREAD_NAME: &str = "tsp-vis-solver";

/// Initial solver settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    pub bounds: Bounds,
    pub algorithm: Algorithm,
    pub pacing_ms: u64,
    /// `0` draws the seed from the OS.
    pub seed: u64,
    pub settings: AlgorithmSettings,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            algorithm: Algorithm::default(),
            pacing_ms: 0,
            seed: 0,
            settings: AlgorithmSettings::default(),
        }
    }
}

/// Cloneable stop request for threads that do not own the solver.
#[derive(Clone, Debug)]
pub struct InterruptHandle {
    shared: Arc<SharedState>,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.shared.request_interrupt();
    }

    pub fn is_solving(&self) -> bool {
        self.shared.is_solving()
    }
}

/// Idle/Solving state machine around a single background worker.
///
/// Commands that would race the worker (`generate_points`, `set_algorithm`,
/// `start_solving`) are no-ops returning `false` while a solve runs.
#[derive(Debug)]
pub struct TspSolver {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<Result<Outcome>>>,
    algorithm: Algorithm,
    settings: AlgorithmSettings,
    bounds: Bounds,
    rng: StdRng,
}

impl Default for TspSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl TspSolver {
    pub fn new(config: SolverConfig) -> Self {
        let rng = match config.seed {
            0 => StdRng::from_os_rng(),
            seed => StdRng::seed_from_u64(seed),
        };
        Self {
            shared: Arc::new(SharedState::new(Tour::default(), config.pacing_ms)),
            worker: None,
            algorithm: config.algorithm,
            settings: config.settings,
            bounds: config.bounds,
            rng,
        }
    }

    /// Replaces the point set with `count` uniform samples inside `bounds`.
    pub fn generate_points(&mut self, count: usize, bounds: Bounds) -> Result<bool> {
        if self.is_solving() {
            log::debug!("solver.generate_points: ignored reason=solving");
            return Ok(false);
        }
        if count == 0 {
            return Err(Error::invalid_input("point count must be at least 1"));
        }

        let points = bounds.sample(count, &mut self.rng);
        self.shared.replace(Tour::new(points));
        self.bounds = bounds;
        log::info!("solver.generate_points: count={count} bounds={bounds}");
        Ok(true)
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.is_solving() {
            log::debug!("solver.set_algorithm: ignored algorithm={algorithm} reason=solving");
            return false;
        }
        self.algorithm = algorithm;
        true
    }

    /// Takes effect at the running worker's next step.
    pub fn set_pacing_interval(&mut self, ms: i64) -> bool {
        let Ok(ms) = u64::try_from(ms) else {
            log::debug!("solver.set_pacing_interval: ignored ms={ms} reason=negative");
            return false;
        };
        self.shared.set_pacing_ms(ms);
        true
    }

    pub fn set_settings(&mut self, settings: AlgorithmSettings) -> bool {
        if self.is_solving() {
            log::debug!("solver.set_settings: ignored reason=solving");
            return false;
        }
        self.settings = settings;
        true
    }

    /// Launches the selected algorithm on a fresh worker.
    pub fn start_solving(&mut self) -> Result<bool> {
        if self.is_solving() {
            log::debug!("solver.start_solving: ignored reason=solving");
            return Ok(false);
        }
        if let Some(handle) = self.worker.take()
            && let Err(err) = join_worker(handle)
        {
            log::warn!("solver.start_solving: previous run failed: {err}");
        }

        let mut tour = (*self.shared.snapshot()).clone();
        if tour.point_count() == 0 {
            return Err(Error::invalid_input("no points to solve; generate points first"));
        }
        tour.reset_colors();
        tour.clear_route();
        self.shared.replace(tour.clone());

        self.shared.clear_interrupt();
        self.shared.set_solving(true);

        let shared = Arc::clone(&self.shared);
        let algorithm = self.algorithm;
        let settings = self.settings;
        let rng = StdRng::seed_from_u64(self.rng.random());
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || solve(&shared, algorithm, settings, rng, tour));

        match spawned {
            Ok(handle) => {
                log::info!(
                    "solver.start_solving: algorithm={algorithm} points={} pacing_ms={}",
                    self.point_count(),
                    self.pacing_interval()
                );
                self.worker = Some(handle);
                Ok(true)
            }
            Err(err) => {
                self.shared.set_solving(false);
                Err(Error::Io(err))
            }
        }
    }

    /// Asks the worker to stop at its next step. Does not wait.
    pub fn interrupt_solving(&self) {
        if self.is_solving() {
            log::info!("solver.interrupt_solving: requested");
        }
        self.shared.request_interrupt();
    }

    /// Joins the current worker, if any, and reports how its run ended.
    pub fn wait(&mut self) -> Result<Option<Outcome>> {
        match self.worker.take() {
            Some(handle) => join_worker(handle).map(Some),
            None => Ok(None),
        }
    }

    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Latest complete snapshot published by the worker.
    pub fn tour(&self) -> Arc<Tour> {
        self.shared.snapshot()
    }

    pub fn route_length(&self) -> f64 {
        self.shared.snapshot().length()
    }

    pub fn point_count(&self) -> usize {
        self.shared.snapshot().point_count()
    }

    pub fn pacing_interval(&self) -> u64 {
        self.shared.pacing_ms()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn settings(&self) -> AlgorithmSettings {
        self.settings
    }

    pub fn is_solving(&self) -> bool {
        self.shared.is_solving()
    }

    pub fn is_interrupted(&self) -> bool {
        self.shared.is_interrupted()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl Drop for TspSolver {
    fn drop(&mut self) {
        self.shared.request_interrupt();
        if let Some(handle) = self.worker.take()
            && let Err(err) = join_worker(handle)
        {
            log::warn!("solver.drop: worker failed: {err}");
        }
    }
}

fn solve(
    shared: &SharedState,
    algorithm: Algorithm,
    settings: AlgorithmSettings,
    mut rng: StdRng,
    mut tour: Tour,
) -> Result<Outcome> {
    let _guard = SolvingGuard(shared);
    let mut sink = PacedSink::new(shared);

    let result = algo::run(algorithm, &mut tour, &settings, &mut rng, &mut sink);
    sink.clear_highlights(&mut tour);

    match &result {
        Ok(Outcome::Completed) => {
            mark_complete(&mut tour);
            log::info!(
                "solver.worker: complete algorithm={algorithm} length={:.2}",
                tour.length()
            );
        }
        Ok(Outcome::Interrupted) => log::info!(
            "solver.worker: interrupted algorithm={algorithm} visited={} length={:.2}",
            tour.route().len(),
            tour.length()
        ),
        Err(err) => log::error!("solver.worker: failed algorithm={algorithm}: {err}"),
    }

    shared.replace(tour);
    result
}

fn mark_complete(tour: &mut Tour) {
    let stops = tour.route().as_slice().to_vec();
    let points = tour.points_mut();
    for idx in stops {
        points[idx].set_color(Color::COMPLETE);
        points[idx].set_edge_color(Color::COMPLETE);
    }
}

fn join_worker(handle: JoinHandle<Result<Outcome>>) -> Result<Outcome> {
    match handle.join() {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(err)) => Err(Error::worker(err.to_string())),
        Err(_) => Err(Error::worker("solver thread panicked")),
    }
}

#[cfg(test)]
mod tests {
    use super::{SolverConfig, TspSolver};
    use crate::{Algorithm, Bounds, Color, algo::Outcome};

    fn seeded(algorithm: Algorithm) -> TspSolver {
        TspSolver::new(SolverConfig {
            algorithm,
            seed: 42,
            ..SolverConfig::default()
        })
    }

    #[test]
    fn negative_pacing_is_rejected() {
        let mut solver = TspSolver::default();
        assert!(!solver.set_pacing_interval(-1));
        assert_eq!(solver.pacing_interval(), 0);
        assert!(solver.set_pacing_interval(25));
        assert_eq!(solver.pacing_interval(), 25);
    }

    #[test]
    fn generate_points_rejects_zero_count() {
        let mut solver = TspSolver::default();
        let err = solver
            .generate_points(0, Bounds::default())
            .expect_err("zero points");
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn start_without_points_is_an_error() {
        let mut solver = TspSolver::default();
        assert!(solver.start_solving().is_err());
        assert!(!solver.is_solving());
    }

    #[test]
    fn completed_run_colors_the_route() {
        let mut solver = seeded(Algorithm::NearestNeighbor);
        let bounds = Bounds::new(0.0, 100.0, 0.0, 100.0).expect("bounds");
        assert!(solver.generate_points(12, bounds).expect("generate"));
        assert!(solver.start_solving().expect("start"));

        let outcome = solver.wait().expect("wait");
        assert_eq!(outcome, Some(Outcome::Completed));
        assert!(!solver.is_solving());

        let tour = solver.tour();
        assert!(tour.is_complete());
        assert!(tour.points().iter().all(|p| p.color() == Color::COMPLETE));
        assert_eq!(solver.route_length(), tour.length());
    }

    #[test]
    fn wait_without_worker_is_none() {
        let mut solver = TspSolver::default();
        assert!(solver.wait().expect("wait").is_none());
    }

    #[test]
    fn same_seed_generates_same_points() {
        let mut a = seeded(Algorithm::Random);
        let mut b = seeded(Algorithm::Random);
        a.generate_points(20, Bounds::default()).expect("generate");
        b.generate_points(20, Bounds::default()).expect("generate");
        assert_eq!(a.tour().points(), b.tour().points());
    }
}
