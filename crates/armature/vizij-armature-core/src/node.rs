#![allow(dead_code)]
//! Per-bone node state: the transform properties set directly on a bone
//! (position/rotation/skew/scale/anchor) and the parent-cascaded color
//! state. These compose with the tween pose during the frame update.

use crate::data::Color;
use crate::transform::AffineTransform;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeState {
    pub x: f32,
    pub y: f32,
    /// Radians, positive clockwise in screen space.
    pub rotation: f32,
    pub skew_x: f32,
    pub skew_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub z_order: i32,
    pub visible: bool,
    /// Color/opacity set on the node itself. Bones force these back to
    /// opaque white before applying a parent cascade, so a bone never
    /// appears tinted independent of its tween data.
    pub real_color: Color,
    pub real_opacity: u8,
    /// Color/opacity after the parent cascade has been applied.
    pub displayed_color: Color,
    pub displayed_opacity: u8,
}

impl NodeState {
    /// Standard node-to-parent transform: rotation-scale basis, optional
    /// skew, anchor point folded into the translation. The default state
    /// yields the identity.
    pub fn to_parent_transform(&self) -> AffineTransform {
        let (sr, cr) = self.rotation.sin_cos();
        let base = AffineTransform::make(
            cr * self.scale_x,
            sr * self.scale_x,
            -sr * self.scale_y,
            cr * self.scale_y,
            self.x,
            self.y,
        );
        let mut t = if self.skew_x != 0.0 || self.skew_y != 0.0 {
            let skew =
                AffineTransform::make(1.0, self.skew_y.tan(), self.skew_x.tan(), 1.0, 0.0, 0.0);
            skew.concat(&base)
        } else {
            base
        };
        if self.anchor_x != 0.0 || self.anchor_y != 0.0 {
            t.tx -= self.anchor_x * t.a + self.anchor_y * t.c;
            t.ty -= self.anchor_x * t.b + self.anchor_y * t.d;
        }
        t
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            anchor_x: 0.0,
            anchor_y: 0.0,
            z_order: 0,
            visible: true,
            real_color: Color::WHITE,
            real_opacity: 255,
            displayed_color: Color::WHITE,
            displayed_opacity: 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_identity() {
        let t = NodeState::default().to_parent_transform();
        assert!(t.approx_eq(&AffineTransform::IDENTITY, 1e-6));
    }

    #[test]
    fn anchor_offsets_translation() {
        let node = NodeState {
            x: 10.0,
            y: 20.0,
            anchor_x: 4.0,
            anchor_y: 6.0,
            ..NodeState::default()
        };
        let t = node.to_parent_transform();
        // Identity basis, so the anchor subtracts straight from position.
        assert_eq!((t.tx, t.ty), (6.0, 14.0));
    }

    #[test]
    fn scale_applies_before_translation() {
        let node = NodeState {
            x: 5.0,
            y: 0.0,
            scale_x: 2.0,
            scale_y: 3.0,
            ..NodeState::default()
        };
        let t = node.to_parent_transform();
        assert_eq!(t.apply_point((1.0, 1.0)), (7.0, 3.0));
    }
}
