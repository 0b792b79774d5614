//! Ray-sphere intersection and nearest-hit search.

use mlin_core::Sphere;
use mlin_math::Ray;

/// Smallest distance accepted when negative hits are filtered out.
///
/// Keeps reflected rays, which start exactly on a surface, from hitting
/// their own origin again.
pub const MIN_HIT_DISTANCE: f32 = 1e-4;

/// Objects that can be intersected by a ray.
pub trait Hittable {
    /// Parametric distance to the surface, or `None` on a miss.
    fn hit(&self, ray: &Ray) -> Option<f32>;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<f32> {
        intersect_sphere(ray, self)
    }
}

/// Solve `a*t^2 + b*t + c = 0` for the near root.
///
/// Only the near root is returned, and it may be negative when the sphere is
/// behind the ray origin or surrounds it. The direction need not be unit
/// length.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let oc = ray.origin() - sphere.position;
    let a = ray.direction().dot(ray.direction());
    let b = 2.0 * oc.dot(ray.direction());
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()) / (2.0 * a))
}

/// The closest intersection along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Position of the sphere in the scene
    pub index: usize,
    pub sphere: &'a Sphere,
}

/// Find the sphere with the smallest hit distance.
///
/// Comparison is strict, so the earliest sphere wins exact ties. With
/// `allow_negative_t` set, hits behind the origin compete like any other;
/// otherwise hits closer than [`MIN_HIT_DISTANCE`] are skipped.
pub fn nearest_hit<'a>(ray: &Ray, spheres: &'a [Sphere], allow_negative_t: bool) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;
    let mut closest_t = f32::INFINITY;

    for (index, sphere) in spheres.iter().enumerate() {
        let Some(t) = sphere.hit(ray) else {
            continue;
        };
        if !allow_negative_t && t <= MIN_HIT_DISTANCE {
            continue;
        }
        if t < closest_t {
            closest_t = t;
            closest = Some(Hit { t, index, sphere });
        }
    }

    closest
}
