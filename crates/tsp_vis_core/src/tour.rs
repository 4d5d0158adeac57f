use std::ops::RangeInclusive;

use crate::{Error, Point, Result, geometry::RouteGeometry};

/// Visiting order as indices into the owning [`Tour`]'s point vector.
///
/// A finished route is closed: it has `n + 1` entries and repeats its start
/// at the end. While a construction runs the route is a prefix of that.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    stops: Vec<usize>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.stops.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.stops.last().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.stops.len() >= 2 && self.stops.first() == self.stops.last()
    }

    /// Closed and visiting each of `point_count` points exactly once.
    pub fn is_complete(&self, point_count: usize) -> bool {
        point_count > 0
            && self.stops.len() == point_count + 1
            && self.is_closed()
            && self.is_valid_prefix(point_count)
    }

    /// In-range indices with no repeats, except an optional closing repeat of
    /// the first stop.
    pub fn is_valid_prefix(&self, point_count: usize) -> bool {
        let interior = if self.is_closed() {
            &self.stops[..self.stops.len() - 1]
        } else {
            &self.stops[..]
        };
        let mut seen = vec![false; point_count];
        for &idx in interior {
            if idx >= point_count || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            stops: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, idx: usize) {
        self.stops.push(idx);
    }

    pub(crate) fn reverse(&mut self, range: RangeInclusive<usize>) {
        self.stops[range].reverse();
    }
}

impl From<Route> for Vec<usize> {
    fn from(route: Route) -> Self {
        route.stops
    }
}

/// Points, the route through them and its running length.
///
/// This is the working state the algorithms mutate and the value the solver
/// publishes to readers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tour {
    points: Vec<Point>,
    route: Route,
    length: f64,
}

impl Tour {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            route: Route::new(),
            length: 0.0,
        }
    }

    /// Builds a tour around an existing visiting order, computing its length.
    pub fn with_route(points: Vec<Point>, stops: Vec<usize>) -> Result<Self> {
        if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::invalid_input(format!(
                "point {idx} has a non-finite coordinate"
            )));
        }
        let route = Route { stops };
        if !route.is_valid_prefix(points.len()) {
            return Err(Error::invalid_input(format!(
                "route is not a valid visiting order over {} points",
                points.len()
            )));
        }
        let length = RouteGeometry::path_length(&points, route.as_slice());
        Ok(Self {
            points,
            route,
            length,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Colors may change; the slice cannot grow or shrink.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_complete(&self) -> bool {
        self.route.is_complete(self.points.len())
    }

    pub fn route_points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.route.as_slice().iter().map(|&idx| &self.points[idx])
    }

    pub fn metrics(&self, threshold_factor: f64) -> RouteMetrics {
        RouteMetrics::from_edges(
            &RouteGeometry::edge_lengths(&self.points, self.route.as_slice()),
            threshold_factor,
        )
    }

    pub(crate) fn route_mut(&mut self) -> &mut Route {
        &mut self.route
    }

    pub(crate) fn add_length(&mut self, delta: f64) {
        self.length += delta;
    }

    pub(crate) fn clear_route(&mut self) {
        self.route = Route::with_capacity(self.points.len() + 1);
        self.length = 0.0;
    }

    pub(crate) fn reset_colors(&mut self) {
        self.points.iter_mut().for_each(Point::reset_colors);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteMetrics {
    pub edges: usize,
    pub total: f64,
    pub longest: f64,
    pub average: f64,
    pub threshold: f64,
    pub outliers: usize,
}

impl RouteMetrics {
    fn from_edges(distances: &[f64], threshold_factor: f64) -> Self {
        let edges = distances.len();
        if edges == 0 {
            log::info!("metrics: edges=0 so there's nothing to report");
            return Self::default();
        }

        let total: f64 = distances.iter().sum();
        let average = total / edges as f64;
        let threshold = average * threshold_factor;
        let outliers = distances.iter().filter(|d| **d > threshold).count();
        let longest = distances.iter().copied().fold(0.0_f64, f64::max);

        log::info!(
            "metrics: edges={edges} total={total:.2} longest={longest:.2} avg={average:.2} spike_threshold={threshold:.2} spikes={outliers}",
        );

        Self {
            edges,
            total,
            longest,
            average,
            threshold,
            outliers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Route, Tour};
    use crate::Point;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    fn route(stops: &[usize]) -> Route {
        Route {
            stops: stops.to_vec(),
        }
    }

    #[test]
    fn complete_route_needs_closure_and_every_point() {
        assert!(route(&[0, 1, 2, 3, 0]).is_complete(4));
        assert!(!route(&[0, 1, 2, 3]).is_complete(4));
        assert!(!route(&[0, 1, 2, 0]).is_complete(4));
        assert!(!route(&[0, 1, 1, 3, 0]).is_complete(4));
        assert!(route(&[0, 0]).is_complete(1));
        assert!(!route(&[]).is_complete(0));
    }

    #[test]
    fn valid_prefix_allows_only_the_closing_repeat() {
        assert!(route(&[]).is_valid_prefix(3));
        assert!(route(&[2, 0]).is_valid_prefix(3));
        assert!(route(&[2, 0, 2]).is_valid_prefix(3));
        assert!(!route(&[2, 0, 0]).is_valid_prefix(3));
        assert!(!route(&[0, 3]).is_valid_prefix(3));
    }

    #[test]
    fn with_route_computes_length_and_rejects_bad_indices() {
        let tour = Tour::with_route(square(), vec![0, 1, 2, 3, 0]).expect("valid route");
        assert!((tour.length() - 40.0).abs() < 1e-12);
        assert!(tour.is_complete());

        let err = Tour::with_route(square(), vec![0, 9]).expect_err("index out of range");
        assert!(err.to_string().contains("valid visiting order"));

        let mut points = square();
        points.push(Point::new(f64::NAN, 1.0));
        let err = Tour::with_route(points, vec![0]).expect_err("nan coordinate");
        assert!(err.to_string().contains("point 4"));
    }

    #[test]
    fn clear_route_resets_length() {
        let mut tour = Tour::with_route(square(), vec![0, 1, 2, 3, 0]).expect("valid route");
        tour.clear_route();
        assert!(tour.route().is_empty());
        assert_eq!(tour.length(), 0.0);
        assert_eq!(tour.point_count(), 4);
    }

    #[test]
    fn route_points_follow_visiting_order() {
        let tour = Tour::with_route(square(), vec![2, 0]).expect("valid prefix");
        let xs: Vec<f64> = tour.route_points().map(Point::x).collect();
        assert_eq!(xs, vec![10.0, 0.0]);
    }

    #[test]
    fn metrics_report_longest_and_spikes() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(30.0, 0.0),
        ];
        let tour = Tour::with_route(points, vec![0, 1, 2, 3, 0]).expect("valid route");
        let metrics = tour.metrics(1.5);

        assert_eq!(metrics.edges, 4);
        assert!((metrics.total - 60.0).abs() < 1e-12);
        assert_eq!(metrics.longest, 30.0);
        assert_eq!(metrics.average, 15.0);
        assert_eq!(metrics.outliers, 2);
    }

    #[test]
    fn metrics_of_empty_route_are_zero() {
        let tour = Tour::new(square());
        assert_eq!(tour.metrics(2.0).edges, 0);
    }
}
