// Re-export glam for convenience
pub use glam::*;

// mlin math types
mod ray;
mod vector;

pub use ray::Ray;
pub use vector::{add, cross, dot, length, normalize, reflect, scale, sub};
