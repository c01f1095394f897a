//! Hashable keys for floating point values.
//!
//! Keys are built from bit patterns with `-0.0` folded onto `0.0`, so two
//! non-NaN values get the same key exactly when they compare equal.

use nalgebra::{Point3, Vector3};

/// Hashable stand-in for a 3D point or vector.
pub(crate) type Vec3Key = [u64; 3];

#[inline]
pub(crate) fn scalar_key(x: f64) -> u64 {
    if x == 0.0 {
        0.0f64.to_bits()
    } else {
        x.to_bits()
    }
}

#[inline]
pub(crate) fn point_key(p: &Point3<f64>) -> Vec3Key {
    [scalar_key(p.x), scalar_key(p.y), scalar_key(p.z)]
}

#[inline]
pub(crate) fn vector_key(v: &Vector3<f64>) -> Vec3Key {
    [scalar_key(v.x), scalar_key(v.y), scalar_key(v.z)]
}
