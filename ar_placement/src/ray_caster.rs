use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    pub fn is_valid(&self) -> bool {
        self.direction.length_squared() > f32::EPSILON
    }
}

/// Utility functions for building rays from the viewport and testing them
/// against planar surfaces.
pub struct RayCaster;

impl RayCaster {
    /// Default vertical field of view used when the camera projection is not accessible.
    pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_4; // 45 degrees

    /// Returns the pixel coordinate of the viewport center.
    pub fn viewport_center(viewport_size: Vec2) -> Vec2 {
        viewport_size * 0.5
    }

    /// Creates a ray from screen coordinates through the camera viewport.
    ///
    /// This method converts 2D screen coordinates to a 3D ray in world space,
    /// taking into account the camera's position, orientation, and field of view.
    ///
    /// # Arguments
    /// * `screen_pos` - Screen coordinates (in pixels, Y pointing down)
    /// * `camera_transform` - Camera's world transform
    /// * `viewport_size` - Viewport dimensions in pixels
    /// * `fov_y` - Vertical field of view in radians
    ///
    /// # Returns
    /// A ray in world space, or None if the viewport is empty
    pub fn screen_to_world_ray(
        screen_pos: Vec2,
        camera_transform: &GlobalTransform,
        viewport_size: Vec2,
        fov_y: f32,
    ) -> Option<Ray> {
        // Validate viewport dimensions
        if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
            warn!("Invalid viewport dimensions: {:?}", viewport_size);
            return None;
        }

        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let ndc = Vec2::new(
            (screen_pos.x / viewport_size.x) * 2.0 - 1.0,
            1.0 - (screen_pos.y / viewport_size.y) * 2.0, // Flip Y (screen Y increases downward)
        );

        let camera_pos = camera_transform.translation();
        let camera_forward = *camera_transform.forward();
        let camera_right = *camera_transform.right();
        let camera_up = *camera_transform.up();

        let aspect_ratio = viewport_size.x / viewport_size.y;
        let half_height = (fov_y * 0.5).tan();
        let x_offset = ndc.x * half_height * aspect_ratio;
        let y_offset = ndc.y * half_height;

        let ray = Ray::new(
            camera_pos,
            camera_forward + camera_right * x_offset + camera_up * y_offset,
        );

        if ray.is_valid() {
            Some(ray)
        } else {
            warn!(
                "Generated invalid ray: origin={:?}, direction={:?}",
                ray.origin, ray.direction
            );
            None
        }
    }

    /// Tests ray intersection with an infinite plane.
    ///
    /// # Arguments
    /// * `ray` - The ray to test intersection with
    /// * `plane_point` - Any point on the plane
    /// * `plane_normal` - Plane normal (need not face the ray)
    ///
    /// # Returns
    /// Distance along the ray to the intersection, or None if the ray is
    /// parallel to the plane or the plane lies behind the ray origin
    pub fn ray_plane_intersection(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
        let denom = plane_normal.dot(ray.direction);
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (plane_point - ray.origin).dot(plane_normal) / denom;
        (t >= 0.0).then_some(t)
    }
}
