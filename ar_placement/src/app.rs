use bevy::color::palettes::css;
use bevy::prelude::*;

use crate::camera::{ArCamera, setup_camera_and_lighting};
use crate::input::{TapEvent, TapInput, collect_taps, handle_taps, tap_input_enabled};
use crate::placement::{PlacedObject, PlacementController, setup_placed_object_assets};
use crate::reticle::{Reticle, spawn_reticle, sync_reticle};
use crate::settings::PlacementSettings;
use crate::spawn_animator::{SpawnAnimation, animate_spawned_objects};
use crate::surface_tracker::track_surfaces;
use crate::surfaces::DetectedSurfaces;

/// Per-frame ordering: the reticle is updated before taps are read, and
/// animations advance after placement, so an object spawned or moved this
/// frame already takes its first animation step before it is drawn.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum PlacementSet {
    Track,
    Input,
    Place,
    Animate,
}

/// Surface tracking, tap placement and spawn animation.
///
/// Rendering setup is left to `create_app`, so the plugin also runs headless.
#[derive(Default)]
pub struct ArPlacementPlugin {
    pub settings: PlacementSettings,
}

impl Plugin for ArPlacementPlugin {
    fn build(&self, app: &mut App) {
        info!("Placement mode: {:?}", self.settings.mode);

        app.insert_resource(self.settings.clone())
            .insert_resource(PlacementController::new(self.settings.mode))
            .init_resource::<DetectedSurfaces>()
            .init_resource::<TapInput>()
            .add_event::<TapEvent>()
            .register_type::<PlacementSettings>()
            .register_type::<PlacementController>()
            .register_type::<DetectedSurfaces>()
            .register_type::<TapInput>()
            .register_type::<SpawnAnimation>()
            .register_type::<PlacedObject>()
            .register_type::<Reticle>()
            .register_type::<ArCamera>()
            .configure_sets(
                Update,
                (
                    PlacementSet::Track,
                    PlacementSet::Input,
                    PlacementSet::Place,
                    PlacementSet::Animate,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    track_surfaces.in_set(PlacementSet::Track),
                    collect_taps
                        .run_if(tap_input_enabled)
                        .in_set(PlacementSet::Input),
                    handle_taps.in_set(PlacementSet::Place),
                    (animate_spawned_objects, sync_reticle).in_set(PlacementSet::Animate),
                ),
            );
    }
}

/// Create the Bevy app with common configuration
pub fn create_app(settings: PlacementSettings) -> App {
    log::info!("AR Placement is starting");

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "AR Placement".into(),
                    resolution: (800.0, 600.0).into(),
                    present_mode: bevy::window::PresentMode::Fifo,
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::DEBUG,
                filter: "ar_placement=debug,wgpu=error,naga=error".to_string(),
                ..default()
            }),
    )
    .add_plugins(ArPlacementPlugin { settings });

    // Camera feed stands in as a dark backdrop
    app.insert_resource(ClearColor(css::DARK_SLATE_GRAY.into()));

    app.add_systems(
        Startup,
        (
            setup_camera_and_lighting,
            setup_placed_object_assets,
            spawn_reticle,
        )
            .chain(),
    );

    #[cfg(feature = "pc")]
    app.add_systems(Startup, crate::simulation::spawn_simulated_surfaces)
        .add_systems(
            Update,
            crate::simulation::look_around.before(PlacementSet::Track),
        );

    app
}
