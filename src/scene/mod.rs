//! Camera-side consumers of the math core: the camera and its picking ray

mod camera;
mod ray;

pub use camera::{Camera, ProjectionSettings};
pub use ray::{normalized_device_coordinates, project_to_screen, Ray};
