//! Simple ray tracer example.
//!
//! Renders three reflective spheres over a sky background and saves a PNG.

use mlin_core::{codec, Channels};
use mlin_renderer::{render, Camera, Color, PixelBuffer, RenderConfig, Scene, Sphere, Vec3};

fn main() {
    println!("mlin Ray Tracer - Simple Example");
    println!("================================");

    let scene = build_scene();
    let camera = Camera::default();
    let config = RenderConfig::default();

    let mut image = PixelBuffer::new(800, 600, Channels::Rgba).expect("Failed to allocate image");

    println!("Rendering {}x{}...", image.width(), image.height());
    let stats = render(&mut image, &scene, &camera, &config);
    println!("Rendered {} pixels in {:?}", stats.pixels, stats.elapsed);

    let filename = "output.png";
    codec::save(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    scene.add(Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Color::rgb(255, 0, 0)).with_reflectivity(0.5));
    scene.add(Sphere::new(Vec3::new(2.0, 0.0, 4.0), 1.0, Color::rgb(0, 0, 255)).with_reflectivity(0.3));
    scene.add(Sphere::new(Vec3::new(-2.0, 0.0, 4.0), 1.0, Color::rgb(0, 255, 0)).with_reflectivity(0.7));

    println!("Created {} spheres", scene.len());
    scene
}
