use crate::geo::point::Point;

pub(crate) struct RouteGeometry;

impl RouteGeometry {
    /// Sum of consecutive edge lengths along `route`.
    ///
    /// A closed route carries its start again at the end, so no wrap-around
    /// edge is added here.
    pub(crate) fn path_length(points: &[Point], route: &[usize]) -> f64 {
        route
            .windows(2)
            .map(|pair| points[pair[0]].distance(&points[pair[1]]))
            .sum()
    }

    pub(crate) fn edge_lengths(points: &[Point], route: &[usize]) -> Vec<f64> {
        route
            .windows(2)
            .map(|pair| points[pair[0]].distance(&points[pair[1]]))
            .collect()
    }

    /// Length change from replacing edges (a,b),(c,d) with (a,c),(b,d).
    #[inline]
    pub(crate) fn two_opt_delta(a: &Point, b: &Point, c: &Point, d: &Point) -> f64 {
        (a.distance(c) + b.distance(d)) - (a.distance(b) + c.distance(d))
    }
}

#[cfg(test)]
mod tests {
    use super::RouteGeometry;
    use crate::geo::point::Point;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn path_length_of_closed_square() {
        let points = square();
        let length = RouteGeometry::path_length(&points, &[0, 1, 2, 3, 0]);
        assert!((length - 40.0).abs() < 1e-12);
    }

    #[test]
    fn path_length_of_open_prefix_skips_closing_edge() {
        let points = square();
        assert_eq!(RouteGeometry::path_length(&points, &[0, 1, 2]), 20.0);
        assert_eq!(RouteGeometry::path_length(&points, &[2]), 0.0);
        assert_eq!(RouteGeometry::path_length(&points, &[]), 0.0);
    }

    #[test]
    fn edge_lengths_follow_route_order() {
        let points = square();
        let edges = RouteGeometry::edge_lengths(&points, &[0, 2, 1]);
        assert_eq!(edges.len(), 2);
        assert!((edges[0] - 200.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(edges[1], 10.0);
    }

    #[test]
    fn two_opt_delta_is_negative_for_crossing_edges() {
        let p = square();
        // 0->2 and 1->3 cross; 0->1 and 2->3 do not.
        let delta = RouteGeometry::two_opt_delta(&p[0], &p[2], &p[1], &p[3]);
        assert!(delta < 0.0);
        let reverse = RouteGeometry::two_opt_delta(&p[0], &p[1], &p[2], &p[3]);
        assert!(reverse > 0.0);
    }
}
