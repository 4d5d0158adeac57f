use rand::{Rng, seq::SliceRandom};

use crate::{
    Error, Result, Tour,
    algo::{
        nearest_neighbor::ERR_EMPTY_POINT_SET,
        step::{Outcome, Step, StepSink},
    },
};

/// Baseline construction visiting the points in a uniformly random order.
///
/// The order is drawn once with a shuffle and consumed front to back, so the
/// run always takes exactly `n` steps.
#[tsp_vis_derive::timer("algo.randomized")]
pub fn randomized<R: Rng + ?Sized>(
    tour: &mut Tour,
    rng: &mut R,
    sink: &mut impl StepSink,
) -> Result<Outcome> {
    let n = tour.point_count();
    if n == 0 {
        return Err(Error::invalid_input(ERR_EMPTY_POINT_SET));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    let start = order[0];

    tour.clear_route();
    let mut previous: Option<usize> = None;
    for &idx in &order {
        if let Some(prev) = previous {
            let edge = tour.points()[prev].distance(&tour.points()[idx]);
            tour.add_length(edge);
        }
        tour.route_mut().push(idx);
        previous = Some(idx);

        if sink.on_step(Step::Visited { point: idx }, tour).is_break() {
            log::debug!(
                "algo.randomized: interrupted visited={}/{n}",
                tour.route().len()
            );
            return Ok(Outcome::Interrupted);
        }
    }

    let last = order[n - 1];
    let closing = tour.points()[last].distance(&tour.points()[start]);
    tour.route_mut().push(start);
    tour.add_length(closing);
    // Already closed; a stop request at this point has nothing left to cut short.
    let _ = sink.on_step(Step::Closed, tour);

    log::debug!(
        "algo.randomized: complete n={n} start={start} length={:.2}",
        tour.length()
    );
    Ok(Outcome::Completed)
}
