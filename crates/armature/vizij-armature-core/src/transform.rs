#![allow(dead_code)]
//! 2D affine transform primitive.
//!
//! Row-vector convention: a point (x, y) maps to
//! `(a*x + c*y + tx, b*x + d*y + ty)`, and `t1.concat(&t2)` applies t1
//! first, then t2. World transforms of a bone chain are built by
//! concatenating child-local transforms onto the parent's world transform.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AffineTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn make(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::make(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::make(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::make(c, s, -s, c, 0.0, 0.0)
    }

    /// Compose two transforms: the receiver applies first, then `after`.
    pub fn concat(&self, after: &AffineTransform) -> AffineTransform {
        let t1 = self;
        let t2 = after;
        AffineTransform {
            a: t1.a * t2.a + t1.b * t2.c,
            b: t1.a * t2.b + t1.b * t2.d,
            c: t1.c * t2.a + t1.d * t2.c,
            d: t1.c * t2.b + t1.d * t2.d,
            tx: t1.tx * t2.a + t1.ty * t2.c + t2.tx,
            ty: t1.tx * t2.b + t1.ty * t2.d + t2.ty,
        }
    }

    /// Map a point through the transform.
    pub fn apply_point(&self, point: (f32, f32)) -> (f32, f32) {
        let (x, y) = point;
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Component-wise approximate equality; for tests and cache checks.
    pub fn approx_eq(&self, other: &AffineTransform, eps: f32) -> bool {
        (self.a - other.a).abs() <= eps
            && (self.b - other.b).abs() <= eps
            && (self.c - other.c).abs() <= eps
            && (self.d - other.d).abs() <= eps
            && (self.tx - other.tx).abs() <= eps
            && (self.ty - other.ty).abs() <= eps
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_neutral_for_concat() {
        let t = AffineTransform::make(2.0, 0.5, -0.5, 3.0, 10.0, -4.0);
        assert!(t.concat(&AffineTransform::IDENTITY).approx_eq(&t, 1e-6));
        assert!(AffineTransform::IDENTITY.concat(&t).approx_eq(&t, 1e-6));
    }

    #[test]
    fn concat_applies_receiver_first() {
        // Scale by 2, then translate by (10, 0): the scale must not touch
        // the later translation.
        let t = AffineTransform::scale(2.0, 2.0).concat(&AffineTransform::translation(10.0, 0.0));
        assert_eq!(t.apply_point((1.0, 1.0)), (12.0, 2.0));
        // Reverse order scales the translation as well.
        let t = AffineTransform::translation(10.0, 0.0).concat(&AffineTransform::scale(2.0, 2.0));
        assert_eq!(t.apply_point((1.0, 1.0)), (22.0, 2.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let t = AffineTransform::rotation(std::f32::consts::FRAC_PI_2);
        let (x, y) = t.apply_point((1.0, 0.0));
        assert!(x.abs() <= 1e-6, "x={x}");
        assert!((y - 1.0).abs() <= 1e-6, "y={y}");
    }
}
