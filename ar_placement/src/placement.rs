use bevy::prelude::*;

use crate::orientation::orient_to_viewer;
use crate::pose::Pose;
use crate::settings::PlacementSettings;
use crate::spawn_animator::SpawnAnimation;

/// How a tap on a tracked surface is interpreted. Fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PlacementMode {
    /// One object; later taps move it.
    #[default]
    Repositioning,
    /// Every tap spawns a new, independent object.
    MultiSpawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct ReticleState {
    pub visible: bool,
    pub pose: Pose,
}

/// Marker for objects placed by a tap.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub struct PlacedObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// No surface under the reticle; nothing changed.
    Ignored,
    Spawned(Entity),
    Moved(Entity),
}

/// Scene-side operations the controller needs on placed objects.
pub trait PlacementHost {
    /// Creates a placed object at `pose` and returns its handle.
    fn spawn(&mut self, pose: Pose) -> Entity;

    /// Moves an existing object. Returns false if the handle no longer
    /// refers to a live object.
    fn set_pose(&mut self, entity: Entity, pose: Pose) -> bool;

    /// Restarts the object's scale-in animation from zero.
    fn trigger_animation(&mut self, entity: Entity);
}

/// Owns the reticle and decides between spawning and moving on each tap.
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlacementController {
    mode: PlacementMode,
    reticle: ReticleState,
    placed: Vec<Entity>,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new(PlacementMode::default())
    }
}

impl PlacementController {
    pub fn new(mode: PlacementMode) -> Self {
        Self {
            mode,
            reticle: ReticleState::default(),
            placed: Vec::new(),
        }
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn reticle(&self) -> &ReticleState {
        &self.reticle
    }

    /// Objects placed so far, oldest first. Holds at most one entry in
    /// repositioning mode.
    pub fn placed(&self) -> &[Entity] {
        &self.placed
    }

    /// Applies this frame's surface query result to the reticle.
    pub fn tick(&mut self, hit: Option<Pose>) {
        match hit {
            Some(pose) => {
                if !self.reticle.visible {
                    debug!("Surface found, showing reticle at {:?}", pose.position);
                }
                self.reticle.pose = pose;
                self.reticle.visible = true;
            }
            None => {
                if self.reticle.visible {
                    debug!("Surface lost, hiding reticle");
                }
                self.reticle.visible = false;
            }
        }
    }

    /// Handles a tap: spawns or moves an object at the reticle, facing the viewer.
    pub fn on_tap(&mut self, viewer_position: Vec3, host: &mut impl PlacementHost) -> TapOutcome {
        if !self.reticle.visible {
            debug!("Tap ignored: no surface under the reticle");
            return TapOutcome::Ignored;
        }

        let pose = orient_to_viewer(self.reticle.pose, viewer_position);

        if self.mode == PlacementMode::Repositioning
            && let Some(entity) = self.placed.first().copied()
        {
            if host.set_pose(entity, pose) {
                host.trigger_animation(entity);
                info!("Moved placed object {:?} to {:?}", entity, pose.position);
                return TapOutcome::Moved(entity);
            }
            warn!("Placed object {:?} is gone, placing a new one", entity);
            self.placed.clear();
        }

        let entity = host.spawn(pose);
        host.trigger_animation(entity);
        self.placed.push(entity);
        info!(
            "Placed object {:?} at {:?} ({} total)",
            entity,
            pose.position,
            self.placed.len()
        );
        TapOutcome::Spawned(entity)
    }
}

/// Mesh and material shared by every placed object.
#[derive(Resource, Debug, Clone)]
pub struct PlacedObjectAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn setup_placed_object_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Cone {
        radius: 0.5,
        height: 1.0,
    });
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.55, 0.1),
        metallic: 0.2,
        perceptual_roughness: 0.6,
        ..default()
    });

    commands.insert_resource(PlacedObjectAssets { mesh, material });
    info!("Initialized placed object assets");
}

/// Transform and animation of every placed object.
pub type PlacedObjectQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, &'static mut SpawnAnimation),
    With<PlacedObject>,
>;

/// `PlacementHost` backed by the Bevy world.
///
/// Spawns go through `Commands`; pose and animation updates go straight to
/// the placed object's components.
pub struct BevyPlacementHost<'a, 'cw, 'cs, 'w, 's> {
    pub commands: &'a mut Commands<'cw, 'cs>,
    pub objects: &'a mut PlacedObjectQuery<'w, 's>,
    pub assets: Option<&'a PlacedObjectAssets>,
    pub settings: &'a PlacementSettings,
}

impl PlacementHost for BevyPlacementHost<'_, '_, '_, '_, '_> {
    fn spawn(&mut self, pose: Pose) -> Entity {
        let animation = SpawnAnimation::new(self.settings.object_scale, &self.settings.animation);
        let mut entity = self.commands.spawn((
            pose.to_transform(animation.current_scale()),
            animation,
            PlacedObject,
            Name::new("Placed Object"),
        ));
        if let Some(assets) = self.assets {
            entity.insert((
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
            ));
        }
        entity.id()
    }

    fn set_pose(&mut self, entity: Entity, pose: Pose) -> bool {
        match self.objects.get_mut(entity) {
            Ok((mut transform, _)) => {
                pose.apply_to(&mut transform);
                true
            }
            Err(err) => {
                debug!("Cannot move placed object {:?}: {:?}", entity, err);
                false
            }
        }
    }

    fn trigger_animation(&mut self, entity: Entity) {
        // Objects spawned this frame are not queryable yet; they start triggered.
        if let Ok((mut transform, mut animation)) = self.objects.get_mut(entity) {
            transform.scale = animation.trigger();
        }
    }
}
