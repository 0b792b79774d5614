//! mlin renderer - CPU ray tracing of sphere scenes.
//!
//! One primary ray per pixel through a pinhole camera, nearest-hit search by
//! linear scan, diffuse + specular shading from a single point light, and
//! mirror reflections blended in up to [`MAX_DEPTH`] bounces.

mod camera;
mod hit;
mod lighting;
mod renderer;

pub use camera::Camera;
pub use hit::{intersect_sphere, nearest_hit, Hit, Hittable, MIN_HIT_DISTANCE};
pub use lighting::{LightingModel, PointLight, SHININESS};
pub use renderer::{
    render, render_parallel, trace_ray, RenderConfig, RenderStats, MAX_DEPTH,
};

/// Re-export the types every caller needs alongside the renderer
pub use mlin_core::{Color, PixelBuffer, Scene, Sphere};
pub use mlin_math::{Ray, Vec3};
