use std::fmt;

use crate::color::Color;

/// A city on the plane.
///
/// The position is fixed once the point set is generated; the two colors are
/// display state rewritten by the solver's highlight layer while a solve runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    color: Color,
    edge_color: Color,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            color: Color::DEFAULT_POINT,
            edge_color: Color::DEFAULT_LINE,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Color of the route edge leaving this point.
    pub fn edge_color(&self) -> Color {
        self.edge_color
    }

    pub fn set_edge_color(&mut self, color: Color) {
        self.edge_color = color;
    }

    pub fn distance(&self, other: &Self) -> f64 {
        self.squared_distance(other).sqrt()
    }

    /// Same ordering as [`Point::distance`] without the square root.
    #[inline]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn reset_colors(&mut self) {
        self.color = Color::DEFAULT_POINT;
        self.edge_color = Color::DEFAULT_LINE;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bx = ryu::Buffer::new();
        let mut by = ryu::Buffer::new();
        write!(f, "{},{}", bx.format(self.x), by.format(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::Point;
    use crate::color::Color;

    #[test]
    fn new_uses_default_colors() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.position(), (1.0, 2.0));
        assert_eq!(p.color(), Color::DEFAULT_POINT);
        assert_eq!(p.edge_color(), Color::DEFAULT_LINE);
    }

    #[test]
    fn distance_is_euclidean_and_symmetric() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.squared_distance(&b), 25.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn colors_change_without_moving_the_point() {
        let mut p = Point::new(5.0, 6.0);
        p.set_color(Color::COMPLETE);
        p.set_edge_color(Color::HIGHLIGHT_A);
        assert_eq!(p.position(), (5.0, 6.0));
        assert_eq!(p.color(), Color::COMPLETE);
        assert_eq!(p.edge_color(), Color::HIGHLIGHT_A);

        p.reset_colors();
        assert_eq!(p, Point::new(5.0, 6.0));
    }

    #[test]
    fn finite_check_rejects_nan_and_infinity() {
        assert!(Point::new(0.0, -1.5).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn display_formats_as_x_y() {
        assert_eq!(Point::new(1.5, -2.25).to_string(), "1.5,-2.25");
    }
}
