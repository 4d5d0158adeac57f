use crate::{
    Error, Result, Tour,
    algo::step::{Outcome, Step, StepSink},
};

pub(crate) const ERR_EMPTY_POINT_SET: &str = "at least one point is required to build a route";

/// Greedy construction: from `start`, repeatedly walk to the closest
/// unvisited point, then close the tour.
///
/// Ties go to the lowest point index. The sink is consulted after every
/// appended point; a `Break` leaves an open prefix in `tour`.
#[tsp_vis_derive::timer("algo.nearest_neighbor")]
pub fn nearest_neighbor(
    tour: &mut Tour,
    start: usize,
    sink: &mut impl StepSink,
) -> Result<Outcome> {
    let n = tour.point_count();
    if n == 0 {
        return Err(Error::invalid_input(ERR_EMPTY_POINT_SET));
    }
    if start >= n {
        return Err(Error::invalid_input(format!(
            "start index {start} is out of range for {n} points"
        )));
    }

    tour.clear_route();
    let mut visited = vec![false; n];
    visited[start] = true;
    tour.route_mut().push(start);
    if sink.on_step(Step::Visited { point: start }, tour).is_break() {
        return Ok(Outcome::Interrupted);
    }

    let mut current = start;
    for _ in 1..n {
        let from = tour.points()[current];
        let mut closest: Option<(usize, f64)> = None;
        for (idx, candidate) in tour.points().iter().enumerate() {
            if visited[idx] {
                continue;
            }
            let squared = from.squared_distance(candidate);
            if closest.is_none_or(|(_, min)| squared < min) {
                closest = Some((idx, squared));
            }
        }

        let Some((next, min_squared)) = closest else {
            return Err(Error::other("nearest neighbor ran out of unvisited points"));
        };
        visited[next] = true;
        tour.route_mut().push(next);
        tour.add_length(min_squared.sqrt());
        current = next;

        if sink.on_step(Step::Visited { point: next }, tour).is_break() {
            log::debug!(
                "algo.nearest_neighbor: interrupted visited={}/{n}",
                tour.route().len()
            );
            return Ok(Outcome::Interrupted);
        }
    }

    let closing = tour.points()[current].distance(&tour.points()[start]);
    tour.route_mut().push(start);
    tour.add_length(closing);
    // Already closed; a stop request at this point has nothing left to cut short.
    let _ = sink.on_step(Step::Closed, tour);

    log::debug!(
        "algo.nearest_neighbor: complete n={n} start={start} length={:.2}",
        tour.length()
    );
    Ok(Outcome::Completed)
}
