pub(crate) mod nearest_neighbor;
pub(crate) mod randomized;
pub(crate) mod step;
pub(crate) mod two_opt;

use rand::Rng;
use tsp_vis_derive::CliValue;

use crate::{Result, Tour};

pub use nearest_neighbor::nearest_neighbor;
pub use randomized::randomized;
pub use step::{Outcome, Step, StepSink, Unpaced};
pub use two_opt::{TwoOptAcceptance, TwoOptConfig, TwoOptReport, two_opt};

/// Which construction (and optional improvement) a solve runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "algorithm")]
pub enum Algorithm {
    #[cli(alias = "greedy", alias = "nn")]
    NearestNeighbor,
    #[cli(alias = "randomized")]
    Random,
    /// Random seed route improved by 2-opt.
    #[default]
    #[cli(alias = "2opt", alias = "2-opt")]
    TwoOpt,
    /// Greedy seed route improved by 2-opt.
    #[cli(alias = "nn-two-opt")]
    NearestNeighborTwoOpt,
}

impl Algorithm {
    pub fn improves(self) -> bool {
        matches!(self, Self::TwoOpt | Self::NearestNeighborTwoOpt)
    }
}

/// Per-run knobs shared by every algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AlgorithmSettings {
    /// Start the greedy construction at a random point instead of index 0.
    pub random_start: bool,
    pub two_opt: TwoOptConfig,
}

/// Runs `algorithm` over `tour` from scratch.
///
/// The route is rebuilt by the construction phase; 2-opt variants then
/// improve it in place. An interrupted construction skips improvement.
pub fn run<R: Rng + ?Sized>(
    algorithm: Algorithm,
    tour: &mut Tour,
    settings: &AlgorithmSettings,
    rng: &mut R,
    sink: &mut impl StepSink,
) -> Result<Outcome> {
    let seeded = match algorithm {
        Algorithm::NearestNeighbor | Algorithm::NearestNeighborTwoOpt => {
            let start = if settings.random_start && tour.point_count() > 0 {
                rng.random_range(0..tour.point_count())
            } else {
                0
            };
            nearest_neighbor(tour, start, sink)?
        }
        Algorithm::Random | Algorithm::TwoOpt => randomized(tour, rng, sink)?,
    };

    if !seeded.is_completed() || !algorithm.improves() {
        return Ok(seeded);
    }

    let report = two_opt(tour, settings.two_opt, sink)?;
    log::info!(
        "algo.run: algorithm={algorithm} outcome={:?} passes={} swaps={} length={:.2}",
        report.outcome,
        report.passes,
        report.swaps,
        tour.length()
    );
    Ok(report.outcome)
}
