//! Vector operations used by the tracer.
//!
//! Thin wrappers over glam so the tracer reads the same as the shading
//! equations. `normalize` and `reflect` carry their own semantics; the rest
//! defer to glam directly.

use crate::Vec3;

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    a + b
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    a - b
}

#[inline]
pub fn scale(v: Vec3, k: f32) -> Vec3 {
    v * k
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

/// Euclidean length, `sqrt(dot(v, v))`.
#[inline]
pub fn length(v: Vec3) -> f32 {
    v.dot(v).sqrt()
}

/// Scale `v` to unit length.
///
/// The zero vector maps to itself. Unlike `glam::Vec3::normalize_or_zero`,
/// non-finite input is divided through, so NaN and Inf propagate.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let len = length(v);
    if len == 0.0 {
        return Vec3::ZERO;
    }
    v * (1.0 / len)
}

/// Mirror `incident` about `normal`: `incident - normal * 2 * dot(incident, normal)`.
///
/// `normal` is expected to be unit length.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - normal * (2.0 * incident.dot(normal))
}
