//! Serde shapes of the JSON scene format.
//!
//! These mirror the file layout one to one. [`crate::loader`] resolves them
//! into a [`crate::SceneDescription`] (named materials looked up, transforms
//! composed, OBJ files loaded).

use lum_math::{Mat4, Transform, Vec3};
use serde::Deserialize;

use crate::loader::{LoadError, LoadResult};
use crate::material::{color, Color, Material};

/// Top-level scene file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDesc {
    #[serde(default)]
    pub camera: Option<CameraDesc>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceDesc>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default = "default_image_size")]
    pub image_width: u32,
    #[serde(default = "default_image_size")]
    pub image_height: u32,
    #[serde(default = "default_samples")]
    pub image_samples: u32,
    #[serde(default = "default_background", deserialize_with = "color")]
    pub background: Color,
    #[serde(default)]
    pub accelerator: Option<AcceleratorDesc>,
}

fn default_image_size() -> u32 {
    512
}

fn default_samples() -> u32 {
    1
}

fn default_background() -> Color {
    Color::splat(0.2)
}

fn one() -> f32 {
    1.0
}

fn white() -> Color {
    Color::ONE
}

#[derive(Debug, Default, Deserialize)]
pub struct CameraDesc {
    #[serde(default)]
    pub transform: Option<TransformDesc>,
    #[serde(default = "one")]
    pub width: f32,
    #[serde(default = "one")]
    pub height: f32,
    #[serde(default = "one")]
    pub dist: f32,
}

#[derive(Debug, Deserialize)]
pub struct LightDesc {
    #[serde(default)]
    pub transform: Option<TransformDesc>,
    #[serde(default = "white", deserialize_with = "color")]
    pub intensity: Color,
}

/// One entry of `surfaces`. Which size field applies depends on `type`.
#[derive(Debug, Deserialize)]
pub struct SurfaceDesc {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub transform: Option<TransformDesc>,
    #[serde(default)]
    pub material: Option<MaterialRef>,
    #[serde(default = "one")]
    pub radius: f32,
    #[serde(default = "one")]
    pub width: f32,
    #[serde(default)]
    pub filename: Option<String>,
}

/// A surface's material: the name of a declared material, or inline.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Named(String),
    Inline(Material),
}

#[derive(Debug, Deserialize)]
pub struct AcceleratorDesc {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "maxPrimsInNode", default)]
    pub max_prims_in_node: Option<i64>,
    #[serde(rename = "splitMethod", default)]
    pub split_method: Option<String>,
}

/// A transform: one command, or a list applied first to last.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TransformDesc {
    Single(TransformStep),
    Sequence(Vec<TransformStep>),
}

/// A single transform command. Exactly one group of keys is honored, in the
/// order look-at, frame, translate, scale, rotate, matrix.
#[derive(Debug, Default, Deserialize)]
pub struct TransformStep {
    pub from: Option<Vec3>,
    pub at: Option<Vec3>,
    pub up: Option<Vec3>,
    pub o: Option<Vec3>,
    pub x: Option<Vec3>,
    pub y: Option<Vec3>,
    pub z: Option<Vec3>,
    pub translate: Option<Vec3>,
    pub scale: Option<ScaleDesc>,
    pub axis: Option<Vec3>,
    pub angle: Option<f32>,
    /// 16 values, column-major
    pub matrix: Option<[f32; 16]>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum ScaleDesc {
    Uniform(f32),
    PerAxis(Vec3),
}

impl TransformStep {
    fn to_matrix(&self) -> LoadResult<Mat4> {
        if self.from.is_some() || self.at.is_some() || self.up.is_some() {
            let from = self.from.unwrap_or(Vec3::Z);
            let at = self.at.unwrap_or(Vec3::ZERO);
            let up = self.up.unwrap_or(Vec3::Y);

            let dir = (from - at).normalize();
            let left = up.normalize().cross(dir).normalize();
            let new_up = dir.cross(left).normalize();
            return Ok(Mat4::from_cols(
                left.extend(0.0),
                new_up.extend(0.0),
                dir.extend(0.0),
                from.extend(1.0),
            ));
        }

        if self.o.is_some() || self.x.is_some() || self.y.is_some() || self.z.is_some() {
            return Ok(Mat4::from_cols(
                self.x.unwrap_or(Vec3::X).extend(0.0),
                self.y.unwrap_or(Vec3::Y).extend(0.0),
                self.z.unwrap_or(Vec3::Z).extend(0.0),
                self.o.unwrap_or(Vec3::ZERO).extend(1.0),
            ));
        }

        if let Some(offset) = self.translate {
            return Ok(Mat4::from_translation(offset));
        }

        if let Some(scale) = self.scale {
            return Ok(Mat4::from_scale(match scale {
                ScaleDesc::Uniform(s) => Vec3::splat(s),
                ScaleDesc::PerAxis(v) => v,
            }));
        }

        if self.axis.is_some() || self.angle.is_some() {
            let axis = self.axis.unwrap_or(Vec3::X);
            if axis.length_squared() == 0.0 {
                return Err(LoadError::InvalidTransform("rotation axis is zero".into()));
            }
            let angle = self.angle.unwrap_or(0.0);
            return Ok(Mat4::from_axis_angle(axis.normalize(), angle.to_radians()));
        }

        if let Some(values) = self.matrix {
            return Ok(Mat4::from_cols_array(&values));
        }

        Err(LoadError::InvalidTransform(format!(
            "unrecognized transform command: {:?}",
            self
        )))
    }
}

impl TransformDesc {
    /// Compose the commands into one invertible transform.
    pub fn to_transform(&self) -> LoadResult<Transform> {
        let m = match self {
            TransformDesc::Single(step) => step.to_matrix()?,
            TransformDesc::Sequence(steps) => steps
                .iter()
                .try_fold(Mat4::IDENTITY, |m, step| Ok::<_, LoadError>(step.to_matrix()? * m))?,
        };

        let det = m.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return Err(LoadError::InvalidTransform(format!(
                "matrix is not invertible (determinant {})",
                det
            )));
        }
        Ok(Transform::new(m))
    }
}

/// Resolve an optional transform, defaulting to identity.
pub fn transform_or_identity(desc: &Option<TransformDesc>) -> LoadResult<Transform> {
    desc.as_ref()
        .map_or(Ok(Transform::IDENTITY), TransformDesc::to_transform)
}
