use bevy::prelude::*;

use crate::placement::PlacementController;

/// Marker for the reticle visual that follows the tracked surface.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub struct Reticle;

/// Spawns the reticle hidden; it only appears once a surface is tracked.
pub fn spawn_reticle(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Annulus::new(0.08, 0.1).mesh().resolution(32));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: bevy::color::LinearRgba::rgb(0.6, 0.6, 0.6),
        unlit: true,
        cull_mode: None,
        ..default()
    });

    commands
        .spawn((
            Transform::IDENTITY,
            Visibility::Hidden,
            Reticle,
            Name::new("Reticle"),
        ))
        .with_children(|parent| {
            // Annulus is built in the XY plane; lay it flat on the surface (local XZ)
            parent.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                    .with_translation(Vec3::Y * 0.002),
                Name::new("Reticle Ring"),
            ));
        });
}

/// Mirrors the controller's reticle state onto the reticle entity.
pub fn sync_reticle(
    controller: Res<PlacementController>,
    mut reticle_query: Query<(&mut Transform, &mut Visibility), With<Reticle>>,
) {
    let reticle = controller.reticle();
    for (mut transform, mut visibility) in &mut reticle_query {
        if reticle.visible {
            reticle.pose.apply_to(&mut transform);
            *visibility = Visibility::Visible;
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}
