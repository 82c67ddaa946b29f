use bevy::prelude::*;

/// Marker for the camera whose pose stands in for the AR viewer.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub struct ArCamera;

/// Eye height used for the desktop stand-in viewer.
const EYE_HEIGHT: f32 = 1.6;

/// Sets up the 3D camera and lighting for the scene
pub fn setup_camera_and_lighting(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, EYE_HEIGHT, 2.5).looking_at(Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
        ArCamera,
        Name::new("AR Camera"),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// World position of the viewer, if the AR camera exists.
pub fn viewer_position(camera_query: &Query<&GlobalTransform, With<ArCamera>>) -> Option<Vec3> {
    camera_query
        .get_single()
        .ok()
        .map(|transform| transform.translation())
}
