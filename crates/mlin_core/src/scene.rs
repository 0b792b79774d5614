//! Scene description: an ordered list of spheres.
//!
//! Scenes are built in code or loaded from JSON files. Sphere order is
//! significant: when two spheres are hit at exactly the same distance the
//! earlier one wins.

use std::path::Path;

use mlin_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sphere at index {index}: {reason}")]
    InvalidSphere { index: usize, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere with a flat color and mirror coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center of the sphere
    pub position: Vec3,

    /// Radius, expected to be positive
    pub radius: f32,

    /// Base surface color
    pub color: Color,

    /// Share of the final color taken from the mirrored ray (0-1)
    #[serde(default)]
    pub reflectivity: f32,

    /// Transparency (0-1). Stored only; no lighting model reads it yet.
    #[serde(default)]
    pub refractivity: f32,
}

impl Sphere {
    /// Create a matte, opaque sphere.
    pub fn new(position: Vec3, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
            reflectivity: 0.0,
            refractivity: 0.0,
        }
    }

    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_refractivity(mut self, refractivity: f32) -> Self {
        self.refractivity = refractivity;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(format!("radius must be positive, got {}", self.radius));
        }
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(format!(
                "reflectivity must be in [0, 1], got {}",
                self.reflectivity
            ));
        }
        if !(0.0..=1.0).contains(&self.refractivity) {
            return Err(format!(
                "refractivity must be in [0, 1], got {}",
                self.refractivity
            ));
        }
        Ok(())
    }
}

/// An ordered collection of spheres.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere and return its index.
    pub fn add(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn get(&self, index: usize) -> Option<&Sphere> {
        self.spheres.get(index)
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sphere> {
        self.spheres.iter()
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;

        log::debug!("Loaded scene {} ({} spheres)", path.display(), scene.len());

        Ok(scene)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the sphere invariants: positive radius, coefficients in [0, 1].
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            sphere
                .validate()
                .map_err(|reason| SceneError::InvalidSphere { index, reason })?;
        }
        Ok(())
    }
}

impl From<Vec<Sphere>> for Scene {
    fn from(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            spheres: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Sphere;
    type IntoIter = std::slice::Iter<'a, Sphere>;

    fn into_iter(self) -> Self::IntoIter {
        self.spheres.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        let a = scene.add(Sphere::new(Vec3::ZERO, 1.0, Color::WHITE));
        let b = scene.add(Sphere::new(Vec3::X, 2.0, Color::BLACK));
        assert_eq!((a, b), (0, 1));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(1).unwrap().radius, 2.0);
    }

    #[test]
    fn test_json_defaults() {
        let scene = Scene::from_json_str(
            r#"{"spheres":[{"position":[0,-1,3],"radius":1,"color":{"r":255,"g":0,"b":0}}]}"#,
        )
        .unwrap();
        let s = scene.spheres()[0];
        assert_eq!(s.position, Vec3::new(0.0, -1.0, 3.0));
        assert_eq!(s.color, Color::rgb(255, 0, 0));
        assert_eq!(s.reflectivity, 0.0);
        assert_eq!(s.refractivity, 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let scene: Scene = vec![
            Sphere::new(Vec3::new(2.0, 0.0, 4.0), 1.0, Color::rgb(0, 0, 255)).with_reflectivity(0.25),
            Sphere::new(Vec3::new(-2.0, 0.0, 4.0), 0.5, Color::rgb(0, 255, 0)).with_refractivity(0.5),
        ]
        .into();
        let json = scene.to_json_string().unwrap();
        assert_eq!(Scene::from_json_str(&json).unwrap(), scene);
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let err = Scene::from_json_str(
            r#"{"spheres":[
                {"position":[0,0,0],"radius":1,"color":{"r":0,"g":0,"b":0}},
                {"position":[0,0,0],"radius":0,"color":{"r":0,"g":0,"b":0}}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::InvalidSphere { index: 1, .. }));
    }

    #[test]
    fn test_invalid_reflectivity_rejected() {
        let scene: Scene =
            vec![Sphere::new(Vec3::ZERO, 1.0, Color::WHITE).with_reflectivity(1.5)].into();
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidSphere { index: 0, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let scene: Scene = vec![Sphere::new(Vec3::Z, 1.0, Color::WHITE)].into();
        std::fs::write(&path, scene.to_json_string().unwrap()).unwrap();
        assert_eq!(Scene::load(&path).unwrap(), scene);
    }

    #[test]
    fn test_bundled_scene_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenes/three_spheres.json");
        let scene = Scene::load(path).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.spheres()[2].reflectivity, 0.7);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Scene::load("/nonexistent/scene.json"),
            Err(SceneError::Io(_))
        ));
    }
}
