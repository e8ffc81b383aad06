//! Perspective camera that produces view/projection matrices and picking rays

use super::ray::{project_to_screen, Ray};
use crate::input::InputState;
use crate::math::{degrees, Matrix4, Result, Vector2, Vector3};
use log::warn;
use serde::{Deserialize, Serialize};

/// Pitch limit in degrees, short of looking straight up or down.
const MAX_PITCH: f32 = 89.0;

/// Projection parameters, loadable from engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Vertical field of view in degrees (default: 60)
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Width divided by height of the viewport
    pub aspect_ratio: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
            aspect_ratio: 1.0,
        }
    }
}

pub struct Camera {
    position: Vector3,
    /// Euler angles in degrees: pitch, yaw, roll
    rotation: Vector3,
    settings: ProjectionSettings,
    ray: Ray,
}

impl Camera {
    #[must_use]
    pub fn new(position: Vector3, rotation: Vector3, settings: ProjectionSettings) -> Self {
        Self {
            position,
            rotation,
            settings,
            ray: Ray::default(),
        }
    }

    #[must_use]
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::view_matrix(&self.position, &self.rotation)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Matrix4 {
        Matrix4::perspective_matrix(
            self.settings.fov,
            self.settings.aspect_ratio,
            self.settings.near,
            self.settings.far,
        )
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Matrix4 {
        self.projection_matrix().multiply(&self.view_matrix())
    }

    /// Recomputes the picking ray for a mouse position in `[0, 1]` screen space.
    ///
    /// # Errors
    /// Propagates [`crate::math::MathError::SingularMatrix`]; the previous ray
    /// stays valid.
    pub fn update_ray(&mut self, mouse_position: &Vector2) -> Result<&Ray> {
        let view = self.view_matrix();
        let projection = self.projection_matrix();

        if let Err(error) = self.ray.update(&self.position, mouse_position, &view, &projection) {
            warn!("Keeping previous picking ray: {error}");
            return Err(error);
        }
        Ok(&self.ray)
    }

    /// `[0, 1]` screen position of a world point, zero when behind the camera.
    #[must_use]
    pub fn world_to_screen(&self, point: &Vector3) -> Vector3 {
        project_to_screen(point, &self.view_matrix(), &self.projection_matrix())
    }

    #[must_use]
    pub fn position(&self) -> Vector3 {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> Vector3 {
        self.rotation
    }

    #[must_use]
    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    #[must_use]
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Vector3) {
        self.rotation = rotation;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.settings.aspect_ratio = aspect_ratio;
    }

    pub fn set_settings(&mut self, settings: ProjectionSettings) {
        self.settings = settings;
    }

    /// Adds yaw and pitch in degrees. Pitch is clamped to avoid flipping over.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.rotation.y += yaw_delta;
        self.rotation.x = (self.rotation.x + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Turns the camera by this frame's mouse delta. The sensitivity is in
    /// radians per pixel.
    pub fn rotate_from_input(&mut self, input: &InputState) {
        let (delta_x, delta_y) = input.mouse_delta();
        let sensitivity = input.mouse_sensitivity();
        self.rotate(degrees(delta_x * sensitivity), degrees(delta_y * sensitivity));
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::ZERO, ProjectionSettings::default())
    }
}
