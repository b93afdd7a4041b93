use std::ops::{Add, Mul};

/// An RGB color on a 0-255 scale.
///
/// Components are real-valued and never clamped while shading, so lighting
/// can push them past 255 and blending can bring them back. Clamping to a
/// displayable range happens once, in [`Color::to_rgb8`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn white() -> Self {
        Self::new(255., 255., 255.)
    }

    pub fn black() -> Self {
        Self::new(0., 0., 0.)
    }

    /// Instantiate a new Color.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Round this Color to the nearest displayable pixel value, clamping
    /// each component to 0-255.
    pub fn to_rgb8(self) -> image::Rgb<u8> {
        image::Rgb([
            self.r.round().clamp(0., 255.) as u8,
            self.g.round().clamp(0., 255.) as u8,
            self.b.round().clamp(0., 255.) as u8,
        ])
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
        }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

/// A material for a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// The surface color of this material.
    pub color: Color,

    /// The Phong specular exponent. `None` disables the highlight entirely.
    pub specular: Option<f64>,

    /// The reflectiveness (0 to 1) of this material.
    pub reflective: f64,

    /// The transparency of this material. At 0 the surface is completely
    /// opaque; at 1 only the transmitted color survives.
    pub transparency: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::white(),
            specular: None,
            reflective: 0.,
            transparency: 0.,
        }
    }
}
