//! RGBA colors and the palette the creature builders draw from.

/// An RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Components as an array, in the order shaders expect.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.35, 0.9);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const PINK: Color = Color::rgb(1.0, 0.75, 0.8);
    pub const SOFT_RED: Color = Color::rgb(0.8, 0.25, 0.25);
    pub const SEA_GREEN: Color = Color::rgb(0.18, 0.55, 0.34);
    pub const DARK_GREEN: Color = Color::rgb(0.0, 0.39, 0.0);
    pub const GREEN_YELLOW: Color = Color::rgb(0.68, 1.0, 0.18);
    /// Pale blue used for the tank frame.
    pub const GLASS: Color = Color::rgb(0.65, 0.8, 0.88);
}
