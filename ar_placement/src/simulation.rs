//! Stand-in for an AR tracking backend on desktop: a fixed floor and wall
//! are written into `DetectedSurfaces`, and the arrow keys turn the camera so
//! the reticle can be swept across them.

use bevy::prelude::*;

use crate::camera::ArCamera;
use crate::pose::Pose;
use crate::surfaces::{DetectedSurface, DetectedSurfaces};

pub const FLOOR_ID: u64 = 1;
pub const WALL_ID: u64 = 2;

/// Surfaces a typical room scan would report first.
pub fn simulated_surfaces() -> Vec<DetectedSurface> {
    vec![
        DetectedSurface::rectangle(
            FLOOR_ID,
            Pose::from_position(Vec3::new(0.0, 0.0, -1.0)),
            Vec2::new(2.0, 2.0),
        ),
        // Normal (+Y local) rotated to face +Z, towards the viewer
        DetectedSurface::rectangle(
            WALL_ID,
            Pose::new(
                Vec3::new(0.0, 1.2, -3.0),
                Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            ),
            Vec2::new(1.5, 1.0),
        ),
    ]
}

pub fn spawn_simulated_surfaces(
    mut commands: Commands,
    mut surfaces: ResMut<DetectedSurfaces>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.3, 0.6, 1.0, 0.25),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    });

    for surface in simulated_surfaces() {
        let (min, max) = surface.boundary.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), point| (min.min(*point), max.max(*point)),
        );
        let mesh = meshes.add(Plane3d::new(Vec3::Y, (max - min) * 0.5));

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material.clone()),
            surface.pose.to_transform(Vec3::ONE),
            Name::new(format!("Simulated surface {}", surface.id)),
        ));

        info!(
            "Simulated {:?} surface {} at {:?}",
            surface.alignment(),
            surface.id,
            surface.pose.position
        );
        surfaces.upsert(surface);
    }
}

/// Radians per second the arrow keys turn the desktop camera.
const LOOK_SPEED: f32 = 1.0;

pub fn look_around(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera_query: Query<&mut Transform, With<ArCamera>>,
) {
    let mut yaw = 0.0;
    let mut pitch = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) {
        yaw += 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        yaw -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        pitch += 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        pitch -= 1.0;
    }
    if yaw == 0.0 && pitch == 0.0 {
        return;
    }

    let step = LOOK_SPEED * time.delta_secs();
    for mut transform in &mut camera_query {
        transform.rotate_y(yaw * step);
        transform.rotate_local_x(pitch * step);
    }
}
