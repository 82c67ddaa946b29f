use bevy::prelude::*;

use crate::pose::Pose;

/// Minimum dot product between an object's up axis and world up for it to be
/// treated as resting on a floor-like surface.
pub const FLOOR_ALIGNMENT_THRESHOLD: f32 = 0.5;

const MIN_HORIZONTAL_LENGTH_SQUARED: f32 = 1e-6;

/// Turns a floor-placed pose about world up so its forward axis faces the
/// viewer, keeping the object upright.
///
/// Poses whose up axis is not aligned with world up (walls, ceilings) are
/// returned unchanged, as are poses with the viewer straight above or below.
pub fn orient_to_viewer(pose: Pose, viewer_position: Vec3) -> Pose {
    if pose.up().dot(Vec3::Y) <= FLOOR_ALIGNMENT_THRESHOLD {
        return pose;
    }

    let to_viewer = viewer_position - pose.position;
    let horizontal = Vec3::new(to_viewer.x, 0.0, to_viewer.z);
    if horizontal.length_squared() < MIN_HORIZONTAL_LENGTH_SQUARED {
        debug!("Viewer is directly above the object; keeping its current heading");
        return pose;
    }

    let rotation = Transform::IDENTITY
        .looking_to(horizontal.normalize(), Vec3::Y)
        .rotation;
    pose.with_rotation(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn floor_pose_faces_viewer_horizontally() {
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, -2.0));
        let viewer = Vec3::new(0.0, 1.6, 0.0);

        let oriented = orient_to_viewer(pose, viewer);
        let forward = oriented.forward();

        assert!(forward.y.abs() < 1e-5);
        assert!(forward.abs_diff_eq(Vec3::Z, 1e-5));
        assert!(oriented.up().abs_diff_eq(Vec3::Y, 1e-5));
        assert_eq!(oriented.position, pose.position);
    }

    #[test]
    fn floor_pose_turns_toward_side_viewer() {
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_y(1.0));
        let oriented = orient_to_viewer(pose, Vec3::new(3.0, -1.0, 0.0));
        assert!(oriented.forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn slightly_tilted_floor_is_straightened() {
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_x(0.3));
        let oriented = orient_to_viewer(pose, Vec3::new(0.0, 1.0, 2.0));
        assert!(oriented.forward().y.abs() < 1e-5);
        assert!(oriented.up().abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn wall_pose_is_untouched() {
        let pose = Pose::new(
            Vec3::new(0.0, 1.0, -3.0),
            Quat::from_rotation_x(FRAC_PI_2),
        );
        assert_eq!(orient_to_viewer(pose, Vec3::new(2.0, 1.6, 0.0)), pose);
    }

    #[test]
    fn alignment_threshold_splits_steep_slopes() {
        let viewer = Vec3::new(0.0, 0.0, 5.0);

        // cos(1.0) ≈ 0.54: still floor-like
        let gentle = Pose::new(Vec3::ZERO, Quat::from_rotation_z(1.0));
        assert!(gentle.up().dot(Vec3::Y) > FLOOR_ALIGNMENT_THRESHOLD);
        assert_ne!(orient_to_viewer(gentle, viewer), gentle);

        // cos(1.1) ≈ 0.45: treated like a wall
        let steep = Pose::new(Vec3::ZERO, Quat::from_rotation_z(1.1));
        assert!(steep.up().dot(Vec3::Y) <= FLOOR_ALIGNMENT_THRESHOLD);
        assert_eq!(orient_to_viewer(steep, viewer), steep);
    }

    #[test]
    fn viewer_overhead_keeps_heading() {
        let pose = Pose::new(Vec3::new(1.0, 0.0, 1.0), Quat::from_rotation_y(0.7));
        let oriented = orient_to_viewer(pose, Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(oriented, pose);
        assert!(oriented.rotation.is_finite());
    }
}
