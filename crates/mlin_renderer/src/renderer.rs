//! Core ray tracing renderer.
//!
//! Implements Whitted-style tracing with:
//! - Nearest-hit search over every sphere
//! - Local diffuse + specular shading
//! - Mirror reflections blended by sphere reflectivity, up to `MAX_DEPTH` bounces

use std::time::{Duration, Instant};

use mlin_core::pixel_buffer::write_pixel;
use mlin_core::{Channels, Color, PixelBuffer, Scene};
use mlin_math::{normalize, reflect, Ray};
use rayon::prelude::*;

use crate::{nearest_hit, Camera, LightingModel, PointLight};

/// Reflection bounces are only followed while `depth < MAX_DEPTH`.
pub const MAX_DEPTH: u32 = 5;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// The single light in the scene
    pub light: PointLight,
    /// Shading model for local illumination
    pub lighting: LightingModel,
    /// Color returned when a ray hits nothing
    pub background: Color,
    /// Accept intersections behind the ray origin
    pub allow_negative_t: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            light: PointLight::default(),
            lighting: LightingModel::default(),
            background: Color::SKY_BLUE,
            allow_negative_t: true,
        }
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    pub pixels: u64,
    pub elapsed: Duration,
}

/// Compute the color seen by a ray that has already bounced `depth` times.
///
/// Each surface hit is shaded locally. While `depth < MAX_DEPTH` and the
/// surface is reflective, the mirrored ray is traced and blended in as
/// `local * (1 - k) + reflected * k`, truncated per channel. The bounce chain
/// is walked iteratively and folded back from the deepest hit.
pub fn trace_ray(ray: &Ray, scene: &Scene, depth: u32, config: &RenderConfig) -> Color {
    let mut pending = [(Color::BLACK, 0.0f32); MAX_DEPTH as usize];
    let mut stacked = 0;
    let mut ray = *ray;
    let mut depth = depth;

    let mut color = loop {
        let Some(hit) = nearest_hit(&ray, scene.spheres(), config.allow_negative_t) else {
            break config.background;
        };

        let sphere = hit.sphere;
        let point = ray.at(hit.t);
        let normal = normalize(point - sphere.position);
        let local = config
            .lighting
            .shade(point, normal, -ray.direction(), sphere.color, &config.light);

        if depth < MAX_DEPTH && sphere.reflectivity > 0.0 {
            pending[stacked] = (local, sphere.reflectivity);
            stacked += 1;
            depth += 1;
            ray = Ray::new(point, reflect(ray.direction(), normal));
        } else {
            break local;
        }
    };

    for &(local, k) in pending[..stacked].iter().rev() {
        color = blend(local, color, k);
    }
    color
}

/// Mix a reflection into a local color. Alpha stays the local alpha.
#[inline]
fn blend(local: Color, reflected: Color, k: f32) -> Color {
    let mix = |l: u8, r: u8| (l as f32 * (1.0 - k) + r as f32 * k) as u8;
    Color::rgba(
        mix(local.r, reflected.r),
        mix(local.g, reflected.g),
        mix(local.b, reflected.b),
        local.a,
    )
}

/// Trace every pixel of one row into `row`.
fn render_row(
    row: &mut [u8],
    y: u32,
    size: (u32, u32),
    channels: Channels,
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) {
    let (width, height) = size;
    for (x, slot) in (0..width).zip(row.chunks_exact_mut(channels.count())) {
        let ray = camera.ray_for_pixel(x, y, width, height);
        write_pixel(slot, trace_ray(&ray, scene, 0, config));
    }
}

/// Render the scene into `buffer`, one ray per pixel, row by row.
pub fn render(
    buffer: &mut PixelBuffer,
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> RenderStats {
    let start = Instant::now();
    let size = (buffer.width(), buffer.height());
    let channels = buffer.channels();

    for (y, row) in (0..size.1).zip(buffer.rows_mut()) {
        render_row(row, y, size, channels, scene, camera, config);
    }

    finish(size, scene, start)
}

/// Render the scene with rows distributed across the rayon thread pool.
///
/// Each row is written by exactly one task and the scene is only read, so
/// the output is byte-identical to [`render`].
pub fn render_parallel(
    buffer: &mut PixelBuffer,
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> RenderStats {
    let start = Instant::now();
    let size = (buffer.width(), buffer.height());
    let channels = buffer.channels();
    let stride = buffer.row_stride();

    buffer
        .as_bytes_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            render_row(row, y as u32, size, channels, scene, camera, config);
        });

    finish(size, scene, start)
}

fn finish(size: (u32, u32), scene: &Scene, start: Instant) -> RenderStats {
    let stats = RenderStats {
        pixels: size.0 as u64 * size.1 as u64,
        elapsed: start.elapsed(),
    };

    log::debug!(
        "Rendered {}x{} ({} spheres) in {:.2?}",
        size.0,
        size.1,
        scene.len(),
        stats.elapsed
    );

    stats
}
