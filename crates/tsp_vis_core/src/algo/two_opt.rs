use tsp_vis_derive::CliValue;

use crate::{
    Error, Result, Tour,
    algo::step::{Outcome, Step, StepSink},
    geometry::RouteGeometry,
};

const MIN_POINTS_FOR_SWAP: usize = 3;
const DEFAULT_EPSILON: f64 = 1e-9;

const ERR_OPEN_ROUTE: &str = "2-opt needs a closed route visiting every point exactly once";

/// When a candidate exchange counts as an improvement.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "two-opt-acceptance")]
pub enum TwoOptAcceptance {
    /// The length change truncated toward zero must be negative, so gains
    /// below one unit are ignored.
    #[default]
    Truncated,
    /// The length change must be below `-epsilon`.
    Epsilon,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoOptConfig {
    pub acceptance: TwoOptAcceptance,
    pub epsilon: f64,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            acceptance: TwoOptAcceptance::Truncated,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl TwoOptConfig {
    pub fn accepts(&self, delta: f64) -> bool {
        match self.acceptance {
            TwoOptAcceptance::Truncated => delta.trunc() < 0.0,
            TwoOptAcceptance::Epsilon => delta < -self.epsilon,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoOptReport {
    pub outcome: Outcome,
    pub passes: usize,
    pub swaps: usize,
}

/// First-improvement 2-opt over a closed route.
///
/// Each pass scans every pair `(i, j)` with `i + 2 <= j < n`, replacing
/// edges `(r[i], r[i+1])` and `(r[j], r[j+1])` with `(r[i], r[j])` and
/// `(r[i+1], r[j+1])` when `config` accepts the change. Passes repeat until
/// one makes no swap. The sink sees every candidate, so a stop request takes
/// effect within one pair.
#[tsp_vis_derive::timer("algo.two_opt")]
pub fn two_opt(
    tour: &mut Tour,
    config: TwoOptConfig,
    sink: &mut impl StepSink,
) -> Result<TwoOptReport> {
    if !tour.is_complete() {
        return Err(Error::invalid_input(ERR_OPEN_ROUTE));
    }

    let n = tour.point_count();
    let mut report = TwoOptReport {
        outcome: Outcome::Completed,
        passes: 0,
        swaps: 0,
    };
    if n < MIN_POINTS_FOR_SWAP {
        log::debug!("algo.two_opt: skip n={n} reason=insufficient_size");
        return Ok(report);
    }

    log::debug!(
        "algo.two_opt: start n={n} acceptance={} length={:.2}",
        config.acceptance,
        tour.length()
    );

    loop {
        report.passes += 1;
        let mut pass_swaps = 0usize;

        for i in 0..=(n - 2) {
            for j in (i + 2)..n {
                if sink.on_step(Step::Candidate { i, j }, tour).is_break() {
                    return Ok(interrupted(report, tour));
                }

                let delta = {
                    let r = tour.route().as_slice();
                    let p = tour.points();
                    RouteGeometry::two_opt_delta(&p[r[i]], &p[r[i + 1]], &p[r[j]], &p[r[j + 1]])
                };

                let step = if config.accepts(delta) {
                    tour.route_mut().reverse((i + 1)..=j);
                    tour.add_length(delta);
                    pass_swaps += 1;
                    Step::Swapped { i, j, delta }
                } else {
                    Step::Kept { i, j }
                };

                if sink.on_step(step, tour).is_break() {
                    report.swaps += pass_swaps;
                    return Ok(interrupted(report, tour));
                }
            }
        }

        report.swaps += pass_swaps;
        log::debug!(
            "algo.two_opt: pass={} swaps={pass_swaps} length={:.2}",
            report.passes,
            tour.length()
        );

        let pass_done = Step::PassFinished {
            pass: report.passes,
            swaps: pass_swaps,
        };
        if sink.on_step(pass_done, tour).is_break() && pass_swaps > 0 {
            return Ok(interrupted(report, tour));
        }
        if pass_swaps == 0 {
            break;
        }
    }

    log::debug!(
        "algo.two_opt: complete passes={} swaps={} length={:.2}",
        report.passes,
        report.swaps,
        tour.length()
    );
    Ok(report)
}

fn interrupted(mut report: TwoOptReport, tour: &Tour) -> TwoOptReport {
    log::debug!(
        "algo.two_opt: interrupted passes={} swaps={} length={:.2}",
        report.passes,
        report.swaps,
        tour.length()
    );
    report.outcome = Outcome::Interrupted;
    report
}
