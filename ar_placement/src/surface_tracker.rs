use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::ArCamera;
use crate::placement::PlacementController;
use crate::pose::Pose;
use crate::ray_caster::{Ray, RayCaster};
use crate::settings::PlacementSettings;
use crate::surfaces::{DetectedSurfaces, SurfaceProvider};

/// Finds where the viewer is pointing on the tracked surfaces.
pub struct SurfaceTracker;

impl SurfaceTracker {
    /// Returns the pose of the nearest hit that falls inside a surface's
    /// measured boundary. Hits on the infinite plane outside the boundary are
    /// skipped, and no hit at all is an ordinary outcome.
    pub fn query_hit(provider: &impl SurfaceProvider, ray: &Ray) -> Option<Pose> {
        provider
            .raycast(ray)
            .into_iter()
            .find(|hit| hit.within_boundary)
            .map(|hit| hit.pose)
    }

    /// Builds the ray through the viewport center for the given camera.
    pub fn center_ray(
        camera_transform: &GlobalTransform,
        viewport_size: Vec2,
        fov_y: f32,
    ) -> Option<Ray> {
        RayCaster::screen_to_world_ray(
            RayCaster::viewport_center(viewport_size),
            camera_transform,
            viewport_size,
            fov_y,
        )
    }
}

/// Per-frame reticle update: raycast from the viewport center and feed the
/// result into the placement controller.
pub fn track_surfaces(
    surfaces: Res<DetectedSurfaces>,
    settings: Res<PlacementSettings>,
    camera_query: Query<&GlobalTransform, With<ArCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut controller: ResMut<PlacementController>,
) {
    let hit = match (camera_query.get_single(), window_query.get_single()) {
        (Ok(camera_transform), Ok(window)) => {
            let viewport_size = Vec2::new(window.width(), window.height());
            SurfaceTracker::center_ray(camera_transform, viewport_size, settings.camera_fov_y)
                .and_then(|ray| SurfaceTracker::query_hit(surfaces.as_ref(), &ray))
        }
        _ => {
            debug!("No AR camera or primary window this frame; hiding reticle");
            None
        }
    };

    controller.tick(hit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::DetectedSurface;

    fn surfaces() -> DetectedSurfaces {
        let mut surfaces = DetectedSurfaces::default();
        surfaces.upsert(DetectedSurface::rectangle(
            1,
            Pose::IDENTITY,
            Vec2::splat(1.0),
        ));
        surfaces.upsert(DetectedSurface::rectangle(
            2,
            Pose::from_position(Vec3::new(3.0, 0.8, 0.0)),
            Vec2::splat(0.3),
        ));
        surfaces
    }

    #[test]
    fn nearest_bounded_hit_wins() {
        let surfaces = surfaces();
        let ray = Ray::new(Vec3::new(3.0, 2.0, 0.0), Vec3::NEG_Y);
        let pose = SurfaceTracker::query_hit(&surfaces, &ray).expect("table hit");
        assert!(pose.position.abs_diff_eq(Vec3::new(3.0, 0.8, 0.0), 1e-5));
    }

    #[test]
    fn plane_outside_boundary_is_not_a_hit() {
        let surfaces = surfaces();
        // Both planes are crossed, neither inside its boundary
        let ray = Ray::new(Vec3::new(2.0, 2.0, 0.0), Vec3::NEG_Y);
        assert_eq!(SurfaceTracker::query_hit(&surfaces, &ray), None);
    }

    #[test]
    fn falls_through_to_farther_bounded_surface() {
        let surfaces = surfaces();
        // Table plane at y=0.8 is crossed outside its boundary first
        let ray = Ray::new(Vec3::new(0.5, 2.0, 0.0), Vec3::NEG_Y);
        let pose = SurfaceTracker::query_hit(&surfaces, &ray).expect("floor hit");
        assert!(pose.position.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn empty_surface_set_has_no_hit() {
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        assert_eq!(
            SurfaceTracker::query_hit(&DetectedSurfaces::default(), &ray),
            None
        );
    }
}
