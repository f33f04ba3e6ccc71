// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3x3 transformation matrix.

use crate::geometry::{BoundsBuilder, Point, Rect};

/// A 3x3 matrix with an affine 2x3 part and a projective row.
///
/// Points are mapped as
///
/// ```text
/// x' = scale_x * x + skew_x * y + trans_x
/// y' = skew_y  * x + scale_y * y + trans_y
/// ```
///
/// The projective row (`persp_0`, `persp_1`, `persp_2`) takes part in
/// composition but is not applied when mapping points.
///
/// Composition multiplies in `f64` and stores `f32`, which keeps error from
/// accumulating when long ancestor chains are concatenated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    /// Horizontal scale.
    pub scale_x: f32,
    /// Horizontal skew (contribution of `y` to `x'`).
    pub skew_x: f32,
    /// Horizontal translation.
    pub trans_x: f32,
    /// Vertical skew (contribution of `x` to `y'`).
    pub skew_y: f32,
    /// Vertical scale.
    pub scale_y: f32,
    /// Vertical translation.
    pub trans_y: f32,
    /// First projective term.
    pub persp_0: f32,
    /// Second projective term.
    pub persp_1: f32,
    /// Third projective term.
    pub persp_2: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_affine(1.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    /// Create a matrix from its affine part with an identity projective row.
    #[inline]
    pub const fn from_affine(
        scale_x: f32,
        skew_x: f32,
        trans_x: f32,
        skew_y: f32,
        scale_y: f32,
        trans_y: f32,
    ) -> Self {
        Self {
            scale_x,
            skew_x,
            trans_x,
            skew_y,
            scale_y,
            trans_y,
            persp_0: 0.0,
            persp_1: 0.0,
            persp_2: 1.0,
        }
    }

    /// A translation by `(dx, dy)`.
    #[inline]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self::from_affine(1.0, 0.0, dx, 0.0, 1.0, dy)
    }

    /// A scale about the origin.
    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::from_affine(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// A scale that keeps `(pivot_x, pivot_y)` fixed.
    #[inline]
    pub fn scale_about(sx: f32, sy: f32, pivot_x: f32, pivot_y: f32) -> Self {
        Self::from_affine(
            sx,
            0.0,
            pivot_x - sx * pivot_x,
            0.0,
            sy,
            pivot_y - sy * pivot_y,
        )
    }

    /// A skew with horizontal factor `kx` and vertical factor `ky`.
    #[inline]
    pub const fn skew(kx: f32, ky: f32) -> Self {
        Self::from_affine(1.0, kx, 0.0, ky, 1.0, 0.0)
    }

    /// A rotation about the origin, in radians.
    #[inline]
    pub fn rotation(radians: f32) -> Self {
        Self::rotation_about(radians, 0.0, 0.0)
    }

    /// A rotation about the origin, in degrees.
    #[inline]
    pub fn rotation_degrees(degrees: f32) -> Self {
        Self::rotation_degrees_about(degrees, 0.0, 0.0)
    }

    /// A rotation in radians that keeps `(pivot_x, pivot_y)` fixed.
    #[inline]
    pub fn rotation_about(radians: f32, pivot_x: f32, pivot_y: f32) -> Self {
        Self::rotation_f64(f64::from(radians), pivot_x, pivot_y)
    }

    /// A rotation in degrees that keeps `(pivot_x, pivot_y)` fixed.
    #[inline]
    pub fn rotation_degrees_about(degrees: f32, pivot_x: f32, pivot_y: f32) -> Self {
        Self::rotation_f64(
            f64::from(degrees) * (core::f64::consts::PI / 180.0),
            pivot_x,
            pivot_y,
        )
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "matrices store f32; f64 is only used for intermediates"
    )]
    fn rotation_f64(radians: f64, pivot_x: f32, pivot_y: f32) -> Self {
        // kurbo routes trigonometry through `std` or `libm` depending on features.
        let [cos, sin, _, _, _, _] = kurbo::Affine::rotate(radians).as_coeffs();
        let (px, py) = (f64::from(pivot_x), f64::from(pivot_y));
        Self::from_affine(
            cos as f32,
            -sin as f32,
            (sin * py + (1.0 - cos) * px) as f32,
            sin as f32,
            cos as f32,
            (-sin * px + (1.0 - cos) * py) as f32,
        )
    }

    /// Returns `true` if this is exactly the identity matrix.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Product `a * b`: the result applies `b` first, then `a`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "matrices store f32; f64 is only used for intermediates"
    )]
    pub fn concat(a: &Self, b: &Self) -> Self {
        let a = a.rows();
        let b = b.rows();
        let mut out = [[0.0_f64; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c];
            }
        }
        Self {
            scale_x: out[0][0] as f32,
            skew_x: out[0][1] as f32,
            trans_x: out[0][2] as f32,
            skew_y: out[1][0] as f32,
            scale_y: out[1][1] as f32,
            trans_y: out[1][2] as f32,
            persp_0: out[2][0] as f32,
            persp_1: out[2][1] as f32,
            persp_2: out[2][2] as f32,
        }
    }

    /// `self * other`: `other` is applied to points before `self`.
    #[inline]
    #[must_use]
    pub fn pre_concat(&self, other: &Self) -> Self {
        Self::concat(self, other)
    }

    /// `other * self`: `other` is applied to points after `self`.
    #[inline]
    #[must_use]
    pub fn post_concat(&self, other: &Self) -> Self {
        Self::concat(other, self)
    }

    fn rows(&self) -> [[f64; 3]; 3] {
        [
            [
                f64::from(self.scale_x),
                f64::from(self.skew_x),
                f64::from(self.trans_x),
            ],
            [
                f64::from(self.skew_y),
                f64::from(self.scale_y),
                f64::from(self.trans_y),
            ],
            [
                f64::from(self.persp_0),
                f64::from(self.persp_1),
                f64::from(self.persp_2),
            ],
        ]
    }

    /// Inverse of the affine part, or `None` if it is singular.
    ///
    /// The projective row of the result is reset to identity.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "matrices store f32; f64 is only used for intermediates"
    )]
    pub fn invert(&self) -> Option<Self> {
        let [[sx, kx, tx], [ky, sy, ty], _] = self.rows();
        let det = sx * sy - kx * ky;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self::from_affine(
            (sy * inv) as f32,
            (-kx * inv) as f32,
            ((kx * ty - sy * tx) * inv) as f32,
            (-ky * inv) as f32,
            (sx * inv) as f32,
            ((ky * tx - sx * ty) * inv) as f32,
        ))
    }

    /// Map a point through the affine part.
    #[inline]
    pub fn map_point(&self, point: Point) -> Point {
        Point::new(
            self.scale_x * point.x + self.skew_x * point.y + self.trans_x,
            self.skew_y * point.x + self.scale_y * point.y + self.trans_y,
        )
    }

    /// Map a vector through the linear part, ignoring translation.
    #[inline]
    pub fn map_vector(&self, dx: f32, dy: f32) -> Point {
        Point::new(
            self.scale_x * dx + self.skew_x * dy,
            self.skew_y * dx + self.scale_y * dy,
        )
    }

    /// Map every point in place.
    pub fn map_points(&self, points: &mut [Point]) {
        for p in points {
            *p = self.map_point(*p);
        }
    }

    /// Bounding box of the four mapped corners of `rect`.
    ///
    /// The result is conservative for rotations and skews.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let mut bounds = BoundsBuilder::default();
        for corner in [
            Point::new(rect.left, rect.top),
            Point::new(rect.right, rect.top),
            Point::new(rect.right, rect.bottom),
            Point::new(rect.left, rect.bottom),
        ] {
            bounds.add_point(self.map_point(corner));
        }
        bounds.finish().unwrap_or(*rect)
    }

    /// Convert the affine part to kurbo's transform type.
    #[inline]
    pub fn to_kurbo(&self) -> kurbo::Affine {
        kurbo::Affine::new([
            f64::from(self.scale_x),
            f64::from(self.skew_y),
            f64::from(self.skew_x),
            f64::from(self.scale_y),
            f64::from(self.trans_x),
            f64::from(self.trans_y),
        ])
    }

    /// Create a matrix from a kurbo transform.
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "kurbo transforms are narrowed to f32 storage"
    )]
    pub fn from_kurbo(affine: kurbo::Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self::from_affine(a as f32, c as f32, e as f32, b as f32, d as f32, f as f32)
    }
}

impl core::ops::Mul for Matrix {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::concat(&self, &rhs)
    }
}
