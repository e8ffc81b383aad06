//! Transform math for a real-time 3D engine
//!
//! This crate provides the vector, matrix and quaternion types the engine
//! builds its model, view and projection transforms from, plus the picking ray
//! that turns a mouse position back into a world-space direction.
//!
//! # Example
//! ```
//! use engine_math::math::{Matrix4, Vector2, Vector3};
//! use engine_math::scene::Ray;
//!
//! fn main() -> Result<(), engine_math::math::MathError> {
//!     let eye = Vector3::new(0.0, 0.0, 5.0);
//!     let view = Matrix4::look_at(&eye, &Vector3::ZERO, &Vector3::UP)?;
//!     let projection = Matrix4::perspective_matrix(60.0, 16.0 / 9.0, 0.1, 100.0);
//!
//!     let mut ray = Ray::default();
//!     ray.update(&eye, &Vector2::new(0.5, 0.5), &view, &projection)?;
//!     assert!(ray.direction().z < 0.0);
//!     Ok(())
//! }
//! ```

pub mod input;
pub mod math;
pub mod scene;
