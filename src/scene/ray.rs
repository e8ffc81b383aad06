//! Mouse picking: unprojects a screen position into a world-space ray

use crate::math::{Matrix4, Result, Vector2, Vector3, Vector4};
use log::trace;

/// A picking ray recomputed from the camera every frame.
///
/// Every stage of the unprojection is cached so callers can inspect it:
/// normalized device coordinates, the clip-space point, the eye-space
/// direction and the world-space direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    use_mouse: bool,
    screen_start: Vector2,
    origin: Vector3,
    direction: Vector3,
    normalized_coords: Vector2,
    clip_coords: Vector4,
    eye_coords: Vector4,
    world_coords: Vector4,
    view_matrix: Matrix4,
    projection_matrix: Matrix4,
    inverted_view: Matrix4,
    inverted_projection: Matrix4,
}

impl Ray {
    /// `use_mouse` follows the mouse on every update; otherwise the ray always
    /// passes through `screen_start`, given in normalized device coordinates.
    #[must_use]
    pub fn new(use_mouse: bool, screen_start: Vector2) -> Self {
        Self {
            use_mouse,
            screen_start,
            origin: Vector3::ZERO,
            direction: Vector3::ZERO,
            normalized_coords: Vector2::ZERO,
            clip_coords: Vector4::ZERO,
            eye_coords: Vector4::ZERO,
            world_coords: Vector4::ZERO,
            view_matrix: Matrix4::IDENTITY,
            projection_matrix: Matrix4::IDENTITY,
            inverted_view: Matrix4::IDENTITY,
            inverted_projection: Matrix4::IDENTITY,
        }
    }

    /// Recomputes the ray from the camera position, the mouse position in
    /// `[0, 1]` screen space and the camera matrices.
    ///
    /// # Errors
    /// [`crate::math::MathError::SingularMatrix`] if either matrix cannot be
    /// inverted. The ray keeps its previous state in that case.
    pub fn update(
        &mut self,
        current_position: &Vector3,
        mouse_position: &Vector2,
        view_matrix: &Matrix4,
        projection_matrix: &Matrix4,
    ) -> Result<()> {
        let inverted_projection = projection_matrix.invert()?;
        let inverted_view = view_matrix.invert()?;

        self.origin = *current_position;
        self.normalized_coords = if self.use_mouse {
            normalized_device_coordinates(mouse_position)
        } else {
            self.screen_start
        };

        self.view_matrix = *view_matrix;
        self.projection_matrix = *projection_matrix;
        self.inverted_view = inverted_view;
        self.inverted_projection = inverted_projection;
        self.clip_coords = Vector4::new(self.normalized_coords.x, self.normalized_coords.y, -1.0, 1.0);
        self.update_eye_coords();
        self.update_world_coords();

        trace!(
            "Ray updated: origin {}, ndc {}, direction {}",
            self.origin,
            self.normalized_coords,
            self.direction
        );
        Ok(())
    }

    fn update_eye_coords(&mut self) {
        let eye = self.inverted_projection.transform(&self.clip_coords);
        // Only the direction matters, so z points forward and w drops translation.
        self.eye_coords = Vector4::new(eye.x, eye.y, -1.0, 0.0);
    }

    fn update_world_coords(&mut self) {
        self.world_coords = self.inverted_view.transform(&self.eye_coords);
        self.direction = self.world_coords.xyz().normalize();
    }

    #[must_use]
    pub fn point_on_ray(&self, distance: f32) -> Vector3 {
        self.origin.add(&self.direction.scale(distance))
    }

    /// Projects a world position with the matrices of the last update. See
    /// [`project_to_screen`].
    #[must_use]
    pub fn convert_to_screen_space(&self, position: &Vector3) -> Vector3 {
        project_to_screen(position, &self.view_matrix, &self.projection_matrix)
    }

    #[must_use]
    pub fn use_mouse(&self) -> bool {
        self.use_mouse
    }

    pub fn set_use_mouse(&mut self, use_mouse: bool) {
        self.use_mouse = use_mouse;
    }

    #[must_use]
    pub fn screen_start(&self) -> Vector2 {
        self.screen_start
    }

    pub fn set_screen_start(&mut self, screen_start: Vector2) {
        self.screen_start = screen_start;
    }

    #[must_use]
    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    /// Unit world-space direction, zero before the first update.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    #[must_use]
    pub fn normalized_coords(&self) -> Vector2 {
        self.normalized_coords
    }

    #[must_use]
    pub fn clip_coords(&self) -> Vector4 {
        self.clip_coords
    }

    #[must_use]
    pub fn eye_coords(&self) -> Vector4 {
        self.eye_coords
    }

    /// World-space direction before normalization.
    #[must_use]
    pub fn world_coords(&self) -> Vector4 {
        self.world_coords
    }

    #[must_use]
    pub fn inverted_view(&self) -> &Matrix4 {
        &self.inverted_view
    }

    #[must_use]
    pub fn inverted_projection(&self) -> &Matrix4 {
        &self.inverted_projection
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(true, Vector2::ZERO)
    }
}

/// Maps a `[0, 1]` screen position to `[-1, 1]` normalized device coordinates.
#[must_use]
pub fn normalized_device_coordinates(screen: &Vector2) -> Vector2 {
    Vector2::new(2.0 * screen.x - 1.0, 2.0 * screen.y - 1.0)
}

/// Projects a world position to `[0, 1]` screen space, keeping clip-space z in
/// the third component. This is the inverse of picking: the projection already
/// flips y, so y grows downwards like the mouse position.
///
/// Returns [`Vector3::ZERO`] when the point is behind the camera or on its
/// plane (w not positive), where the perspective divide has no finite result.
#[must_use]
pub fn project_to_screen(position: &Vector3, view: &Matrix4, projection: &Matrix4) -> Vector3 {
    let coords = Vector4::from_vector3(*position, 1.0);
    let coords = projection.transform(&view.transform(&coords));

    if coords.w <= 0.0 {
        return Vector3::ZERO;
    }

    Vector3::new(
        (coords.x / coords.w + 1.0) / 2.0,
        (coords.y / coords.w + 1.0) / 2.0,
        coords.z,
    )
}
