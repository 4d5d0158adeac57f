//! Heuristic TSP solving for an animated visualizer.
//!
//! Greedy, randomized and 2-opt algorithms report each step to a
//! [`StepSink`]; [`TspSolver`] runs them on a background worker with pacing,
//! edge highlighting, cooperative interruption and snapshot publishing.

mod algo;
mod color;
mod error;
mod geo;
mod io;
pub mod logging;
mod solver;
mod tour;

pub(crate) use geo::geometry;
pub(crate) use io::options;

pub use algo::{
    Algorithm, AlgorithmSettings, Outcome, Step, StepSink, TwoOptAcceptance, TwoOptConfig,
    TwoOptReport, Unpaced, nearest_neighbor, randomized, run, two_opt,
};
pub use color::Color;
pub use error::{Error, Result};
pub use geo::{bounds::Bounds, point::Point};
pub use io::{
    options::{LogFormat, LogLevel, VisOptions},
    output::{write_route, write_route_to},
};
pub use solver::{InterruptHandle, PUBLISH_INTERVAL, SolverConfig, TspSolver};
pub use tour::{Route, RouteMetrics, Tour};
