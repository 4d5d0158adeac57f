use std::fmt;

use rand::Rng;

use crate::{Error, Point, Result};

/// Axis-aligned sampling rectangle for generated points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let all_finite = [x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite());
        if !all_finite {
            return Err(Error::invalid_input("bounds must be finite"));
        }
        if x_min > x_max || y_min > y_max {
            return Err(Error::invalid_input(format!(
                "bounds are inverted: x={x_min}..{x_max} y={y_min}..{y_max}"
            )));
        }
        if !(x_max - x_min).is_finite() || !(y_max - y_min).is_finite() {
            return Err(Error::invalid_input(format!(
                "bounds are too wide to sample: x={x_min}..{x_max} y={y_min}..{y_max}"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, point: &Point) -> bool {
        (self.x_min..=self.x_max).contains(&point.x())
            && (self.y_min..=self.y_max).contains(&point.y())
    }

    /// Uniformly samples `count` points inside the rectangle (edges included).
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Point> {
        (0..count)
            .map(|_| {
                Point::new(
                    rng.random_range(self.x_min..=self.x_max),
                    rng.random_range(self.y_min..=self.y_max),
                )
            })
            .collect()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1_000.0,
            y_min: 0.0,
            y_max: 1_000.0,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={}..{} y={}..{}",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::Bounds;

    #[test]
    fn new_rejects_inverted_ranges() {
        let err = Bounds::new(10.0, 0.0, 0.0, 1.0).expect_err("inverted x");
        assert!(err.to_string().contains("inverted"));
        assert!(Bounds::new(0.0, 1.0, 5.0, 4.0).is_err());
    }

    #[test]
    fn new_rejects_non_finite_values() {
        assert!(Bounds::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(Bounds::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());

        let err = Bounds::new(-1e308, 1e308, 0.0, 1.0).expect_err("overflowing width");
        assert!(err.to_string().contains("too wide"));
        assert!(Bounds::new(0.0, 1.0, -f64::MAX, f64::MAX).is_err());
    }

    #[test]
    fn degenerate_bounds_are_allowed() {
        let bounds = Bounds::new(3.0, 3.0, -2.0, -2.0).expect("point-sized bounds");
        let mut rng = StdRng::seed_from_u64(1);
        let points = bounds.sample(4, &mut rng);
        assert!(points.iter().all(|p| p.position() == (3.0, -2.0)));
    }

    #[test]
    fn sample_stays_inside_bounds() {
        let bounds = Bounds::new(-50.0, 50.0, 100.0, 200.0).expect("valid bounds");
        let mut rng = StdRng::seed_from_u64(7);
        let points = bounds.sample(500, &mut rng);
        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn sample_is_reproducible_for_a_seed() {
        let bounds = Bounds::default();
        let a = bounds.sample(20, &mut StdRng::seed_from_u64(42));
        let b = bounds.sample(20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn width_and_height_follow_ranges() {
        let bounds = Bounds::new(1.0, 4.0, 2.0, 10.0).expect("valid bounds");
        assert_eq!(bounds.width(), 3.0);
        assert_eq!(bounds.height(), 8.0);
    }
}
