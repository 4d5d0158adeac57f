//! Display palette shared by the solver's highlight layer and any renderer.

/// Linear RGB color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const DEFAULT_LINE: Self = Self::from_rgb8(255, 255, 255);
    pub const DEFAULT_POINT: Self = Self::from_rgb8(230, 230, 230);
    pub const BACKGROUND: Self = Self::from_rgb8(19, 21, 21);
    pub const COMPLETE: Self = Self::from_rgb8(88, 255, 49);
    /// Edge currently being added or first edge of a 2-opt candidate.
    pub const HIGHLIGHT_A: Self = Self::from_rgb8(255, 0, 0);
    /// Second edge of a 2-opt candidate.
    pub const HIGHLIGHT_B: Self = Self::from_rgb8(255, 255, 0);
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn from_rgb8_normalizes_channels() {
        let c = Color::from_rgb8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn palette_entries_are_distinct_where_it_matters() {
        assert_ne!(Color::HIGHLIGHT_A, Color::HIGHLIGHT_B);
        assert_ne!(Color::COMPLETE, Color::DEFAULT_LINE);
        assert_ne!(Color::DEFAULT_POINT, Color::HIGHLIGHT_A);
    }

    #[test]
    fn to_array_keeps_channel_order() {
        assert_eq!(Color::HIGHLIGHT_B.to_array(), [1.0, 1.0, 0.0]);
    }
}
