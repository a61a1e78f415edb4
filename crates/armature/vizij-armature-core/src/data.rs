#![allow(dead_code)]
//! Armature definition data model: static per-bone base poses, per-frame
//! tween poses, and the armature-level registry that carries them.
//!
//! Everything here is plain data. The playback engine writes `FrameData`
//! into bones each frame; loaders deserialize `ArmatureData` from whatever
//! container format the host uses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::DisplayData;
use crate::transform::AffineTransform;

/// Data format version at/above which the final pose is
/// base pose (BoneData) + animated offset (FrameData). Below it the
/// frame pose is absolute.
pub const VERSION_COMBINED: f32 = 0.30;

/// 8-bit RGB color, the channel model used by display tinting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise `(a * b) / 255` modulation.
    pub fn modulate(self, other: Color) -> Color {
        Color {
            r: modulate_channel(self.r, other.r),
            g: modulate_channel(self.g, other.g),
            b: modulate_channel(self.b, other.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// `(a * b) / 255` on a single 0-255 channel.
#[inline]
pub fn modulate_channel(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16) / 255) as u8
}

/// One 2D pose: translation, skew angles (radians), scale, draw order and
/// tint. Defaults form the neutral pose (scale 1.0, opaque white).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BaseData {
    pub x: f32,
    pub y: f32,
    pub skew_x: f32,
    pub skew_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub z_order: i32,
    pub color: Color,
    pub alpha: u8,
}

impl BaseData {
    /// Local affine transform of this pose.
    // note: `d` uses skew_y, not skew_x; this matches the exporter's
    // transform convention and is relied on by existing assets.
    pub fn to_affine(&self) -> AffineTransform {
        AffineTransform {
            a: self.scale_x * self.skew_y.cos(),
            b: self.scale_x * self.skew_y.sin(),
            c: self.scale_y * self.skew_x.sin(),
            d: self.scale_y * self.skew_y.cos(),
            tx: self.x,
            ty: self.y,
        }
    }
}

impl Default for BaseData {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            z_order: 0,
            color: Color::WHITE,
            alpha: 255,
        }
    }
}

/// Per-frame interpolated pose produced by the playback engine.
///
/// Same shape as [`BaseData`]; the distinction is ownership and lifetime.
/// A `FrameData` is owned by one bone and overwritten before every armature
/// update, a `BaseData` is immutable per-definition config. The default
/// value is the neutral baseline the playback engine is expected to start
/// from each frame.
pub type FrameData = BaseData;

/// Static configuration for one bone of an armature definition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoneData {
    pub name: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(flatten)]
    pub base: BaseData,
    /// Display entries used to seed the bone's display manager.
    #[serde(default)]
    pub display_data: Vec<DisplayData>,
}

impl BoneData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent_name: None,
            base: BaseData::default(),
            display_data: Vec::new(),
        }
    }
}

/// Armature definition: bone registry plus the data version that selects
/// the transform-composition formula.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArmatureData {
    pub name: String,
    /// Format version of the source data; see [`VERSION_COMBINED`].
    #[serde(default = "default_data_version")]
    pub data_version: f32,
    #[serde(default)]
    pub bone_data: Vec<BoneData>,
    /// Arbitrary payload preserved from the source file (unused by core logic).
    #[serde(default)]
    pub user: serde_json::Value,
}

fn default_data_version() -> f32 {
    0.1
}

impl ArmatureData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data_version: default_data_version(),
            bone_data: Vec::new(),
            user: serde_json::Value::Null,
        }
    }

    pub fn is_combined(&self) -> bool {
        self.data_version >= VERSION_COMBINED
    }

    /// Validate basic invariants (finite version, named bones, resolvable
    /// parent references).
    pub fn validate_basic(&self) -> Result<(), DefinitionError> {
        if !self.data_version.is_finite() {
            return Err(DefinitionError::BadVersion(self.data_version));
        }
        for bone in &self.bone_data {
            if bone.name.is_empty() {
                return Err(DefinitionError::EmptyBoneName);
            }
        }
        for bone in &self.bone_data {
            if let Some(parent) = &bone.parent_name {
                if !self.bone_data.iter().any(|b| &b.name == parent) {
                    return Err(DefinitionError::UnknownParent {
                        bone: bone.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Errors produced while validating an armature definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("armature data version must be finite, got {0}")]
    BadVersion(f32),
    #[error("bone name must not be empty")]
    EmptyBoneName,
    #[error("bone '{bone}' references unknown parent '{parent}'")]
    UnknownParent { bone: String, parent: String },
}

/// Blend mode tag carried through to the render node; opaque to core logic.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlendType {
    #[default]
    Normal,
    Add,
    Multiply,
    Screen,
}
