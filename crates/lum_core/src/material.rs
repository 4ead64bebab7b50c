//! Surface materials for the Whitted shading model.

use lum_math::Vec3;
use serde::{Deserialize, Deserializer};

/// Linear RGB color.
pub type Color = Vec3;

/// Blinn-Phong material with mirror reflection and refraction.
///
/// Deserializes from JSON like
/// `{ "kd": [1, 0.5, 0.5], "ks": 0.2, "n": 100, "kr": 0, "kt": 0, "ior": 1.5 }`.
/// Color coefficients accept either a scalar gray value or an RGB triple; any
/// missing key takes its default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Name used by surfaces to reference a shared material
    pub name: String,

    /// Diffuse coefficient
    #[serde(deserialize_with = "color")]
    pub kd: Color,

    /// Specular (Blinn-Phong) coefficient
    #[serde(deserialize_with = "color")]
    pub ks: Color,

    /// Mirror reflection coefficient
    #[serde(deserialize_with = "color")]
    pub kr: Color,

    /// Transmission coefficient
    #[serde(deserialize_with = "color")]
    pub kt: Color,

    /// Specular exponent
    #[serde(rename = "n")]
    pub exponent: f32,

    /// Index of refraction
    pub ior: f32,
}

/// Material used when a surface names none.
pub static DEFAULT_MATERIAL: Material = Material {
    name: String::new(),
    kd: Vec3::ONE,
    ks: Vec3::ZERO,
    kr: Vec3::ZERO,
    kt: Vec3::ZERO,
    exponent: 10.0,
    ior: 1.5,
};

impl Default for Material {
    fn default() -> Self {
        DEFAULT_MATERIAL.clone()
    }
}

impl Material {
    /// Create a plain diffuse material.
    pub fn diffuse(name: impl Into<String>, kd: Color) -> Self {
        Self {
            name: name.into(),
            kd,
            ..Default::default()
        }
    }

    pub fn is_reflective(&self) -> bool {
        self.kr != Vec3::ZERO
    }

    pub fn is_transmissive(&self) -> bool {
        self.kt != Vec3::ZERO
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Gray(f32),
    Rgb(Vec3),
}

/// Deserialize a color from a scalar or an `[r, g, b]` array.
pub fn color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    Ok(match ColorValue::deserialize(deserializer)? {
        ColorValue::Gray(v) => Color::splat(v),
        ColorValue::Rgb(c) => c,
    })
}
