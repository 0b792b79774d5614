//! Local illumination.

use mlin_core::Color;
use mlin_math::{normalize, reflect, Vec3};

/// Phong exponent of the specular highlight.
pub const SHININESS: f32 = 32.0;

/// A point light with no distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, -10.0),
            color: Color::WHITE,
        }
    }
}

/// The set of shading models the tracer knows.
///
/// Sphere refractivity is carried in the scene but no variant reads it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingModel {
    /// Lambert diffuse plus a Phong highlight of exponent [`SHININESS`].
    #[default]
    DiffuseSpecular,
}

impl LightingModel {
    /// Shade a surface point.
    ///
    /// `normal` should be unit length; `view` points from the surface back
    /// toward the viewer. Alpha is copied from `surface`.
    pub fn shade(
        &self,
        point: Vec3,
        normal: Vec3,
        view: Vec3,
        surface: Color,
        light: &PointLight,
    ) -> Color {
        match self {
            LightingModel::DiffuseSpecular => {
                let light_dir = normalize(light.position - point);
                let diffuse = normal.dot(light_dir).max(0.0);

                let reflect_dir = reflect(light_dir, normal);
                let specular = view.dot(reflect_dir).max(0.0).powf(SHININESS);

                Color::rgba(
                    channel(surface.r, light.color.r, diffuse, specular),
                    channel(surface.g, light.color.g, diffuse, specular),
                    channel(surface.b, light.color.b, diffuse, specular),
                    surface.a,
                )
            }
        }
    }
}

/// `surface * diffuse + light * specular`, saturated to 255.
#[inline]
fn channel(surface: u8, light: u8, diffuse: f32, specular: f32) -> u8 {
    (surface as f32 * diffuse + light as f32 * specular).min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    // Directly below the default light, so the light direction is exactly +Z.
    const POINT: Vec3 = Vec3::new(5.0, 5.0, -11.0);

    #[test]
    fn test_diffuse_only() {
        let light = PointLight::default();
        let surface = Color::rgba(100, 50, 0, 77);
        // View along the light direction: reflect(L, n) = -L, no highlight
        let c = LightingModel::DiffuseSpecular.shade(POINT, Vec3::Z, Vec3::Z, surface, &light);
        assert_eq!(c, surface);
    }

    #[test]
    fn test_highlight_saturates() {
        let light = PointLight::default();
        let surface = Color::rgba(100, 50, 0, 77);
        let c = LightingModel::DiffuseSpecular.shade(POINT, Vec3::Z, -Vec3::Z, surface, &light);
        assert_eq!(c, Color::rgba(255, 255, 255, 77));
    }

    #[test]
    fn test_facing_away_is_black() {
        let light = PointLight::default();
        let surface = Color::rgba(200, 200, 200, 10);
        let c = LightingModel::DiffuseSpecular.shade(POINT, -Vec3::Z, Vec3::X, surface, &light);
        assert_eq!(c, Color::rgba(0, 0, 0, 10));
    }

    #[test]
    fn test_light_color_tints_highlight() {
        let light = PointLight::new(Vec3::new(5.0, 5.0, -10.0), Color::rgb(255, 0, 0));
        let c = LightingModel::DiffuseSpecular.shade(
            POINT,
            Vec3::Z,
            -Vec3::Z,
            Color::rgb(10, 20, 30),
            &light,
        );
        assert_eq!(c, Color::rgb(255, 20, 30));
    }

    #[test]
    fn test_channel_truncates() {
        assert_eq!(channel(100, 255, 0.5, 0.0), 50);
        assert_eq!(channel(99, 255, 0.5, 0.0), 49);
        assert_eq!(channel(255, 255, 1.0, 1.0), 255);
    }
}
