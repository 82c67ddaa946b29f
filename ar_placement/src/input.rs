use bevy::prelude::*;
#[cfg(feature = "pc")]
use bevy::window::PrimaryWindow;

use crate::camera::{ArCamera, viewer_position};
use crate::placement::{
    BevyPlacementHost, PlacedObjectAssets, PlacedObjectQuery, PlacementController, TapOutcome,
};
use crate::settings::PlacementSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TapSource {
    Touch(u64),
    Mouse,
}

/// A press that began this frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub source: TapSource,
    pub position: Vec2,
}

/// Whether taps are currently collected. Disabling it is the equivalent of
/// unsubscribing from touch input.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct TapInput {
    pub enabled: bool,
}

impl Default for TapInput {
    fn default() -> Self {
        Self { enabled: true }
    }
}

pub fn tap_input_enabled(input: Res<TapInput>) -> bool {
    input.enabled
}

/// Turns new touches (and left clicks on desktop) into `TapEvent`s.
pub fn collect_taps(
    touches: Option<Res<Touches>>,
    #[cfg(feature = "pc")] mouse: Option<Res<ButtonInput<MouseButton>>>,
    #[cfg(feature = "pc")] window_query: Query<&Window, With<PrimaryWindow>>,
    mut taps: EventWriter<TapEvent>,
) {
    if let Some(touches) = touches {
        for touch in touches.iter_just_pressed() {
            taps.send(TapEvent {
                source: TapSource::Touch(touch.id()),
                position: touch.position(),
            });
        }
    }

    #[cfg(feature = "pc")]
    if let Some(mouse) = mouse
        && mouse.just_pressed(MouseButton::Left)
    {
        let position = window_query
            .get_single()
            .ok()
            .and_then(|window| window.cursor_position())
            .unwrap_or_default();
        taps.send(TapEvent {
            source: TapSource::Mouse,
            position,
        });
    }
}

/// Feeds at most one tap per frame into the placement controller.
pub fn handle_taps(
    mut taps: EventReader<TapEvent>,
    camera_query: Query<&GlobalTransform, With<ArCamera>>,
    mut commands: Commands,
    mut objects: PlacedObjectQuery,
    assets: Option<Res<PlacedObjectAssets>>,
    settings: Res<PlacementSettings>,
    mut controller: ResMut<PlacementController>,
) {
    let mut frame_taps = taps.read();
    let Some(tap) = frame_taps.next().copied() else {
        return;
    };
    let dropped = frame_taps.count();
    if dropped > 0 {
        debug!("Discarding {} extra taps this frame", dropped);
    }

    let Some(viewer) = viewer_position(&camera_query) else {
        warn!("No AR camera found for tap at {:?}", tap.position);
        return;
    };

    let mut host = BevyPlacementHost {
        commands: &mut commands,
        objects: &mut objects,
        assets: assets.as_deref(),
        settings: &settings,
    };

    match controller.on_tap(viewer, &mut host) {
        TapOutcome::Ignored => debug!("Tap from {:?} ignored", tap.source),
        outcome => debug!("Tap from {:?}: {:?}", tap.source, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{PlacedObject, PlacementMode};
    use crate::pose::Pose;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::input::touch::{TouchInput, TouchPhase, touch_screen_input_system};

    fn app(mode: PlacementMode) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<TapEvent>()
            .insert_resource(PlacementSettings::default().with_mode(mode))
            .insert_resource(PlacementController::new(mode))
            .add_systems(Update, handle_taps);
        app.world_mut().spawn((
            ArCamera,
            GlobalTransform::from(Transform::from_xyz(0.0, 1.6, 2.0)),
        ));
        app
    }

    fn tap() -> TapEvent {
        TapEvent {
            source: TapSource::Touch(0),
            position: Vec2::new(400.0, 300.0),
        }
    }

    fn show_reticle(app: &mut App, position: Vec3) {
        app.world_mut()
            .resource_mut::<PlacementController>()
            .tick(Some(Pose::from_position(position)));
    }

    fn placed_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<PlacedObject>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn one_tap_per_frame() {
        let mut app = app(PlacementMode::MultiSpawn);
        show_reticle(&mut app, Vec3::ZERO);

        app.world_mut().send_event(tap());
        app.world_mut().send_event(tap());
        app.update();

        assert_eq!(placed_count(&mut app), 1);
        assert_eq!(app.world().resource::<PlacementController>().placed().len(), 1);
    }

    #[test]
    fn multi_spawn_taps_accumulate() {
        let mut app = app(PlacementMode::MultiSpawn);
        for x in 0..3 {
            show_reticle(&mut app, Vec3::new(x as f32, 0.0, -1.0));
            app.world_mut().send_event(tap());
            app.update();
        }
        assert_eq!(placed_count(&mut app), 3);
    }

    #[test]
    fn repositioning_reuses_the_object() {
        let mut app = app(PlacementMode::Repositioning);
        for x in 0..3 {
            show_reticle(&mut app, Vec3::new(x as f32, 0.0, -1.0));
            app.world_mut().send_event(tap());
            app.update();
        }
        assert_eq!(placed_count(&mut app), 1);

        let entity = app.world().resource::<PlacementController>().placed()[0];
        let transform = app.world().get::<Transform>(entity).expect("placed");
        assert_eq!(transform.translation, Vec3::new(2.0, 0.0, -1.0));
    }

    #[test]
    fn hidden_reticle_ignores_taps() {
        let mut app = app(PlacementMode::MultiSpawn);
        app.world_mut().send_event(tap());
        app.update();
        assert_eq!(placed_count(&mut app), 0);
    }

    fn touch_app(enabled: bool) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<TouchInput>()
            .init_resource::<Touches>()
            .add_event::<TapEvent>()
            .insert_resource(TapInput { enabled })
            .add_systems(PreUpdate, touch_screen_input_system)
            .add_systems(Update, collect_taps.run_if(tap_input_enabled));
        app
    }

    fn touch(app: &mut App, id: u64, phase: TouchPhase, position: Vec2) {
        app.world_mut().send_event(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        });
    }

    fn collected(app: &App) -> Vec<TapEvent> {
        app.world()
            .resource::<Events<TapEvent>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn new_touch_becomes_tap() {
        let mut app = touch_app(true);
        touch(&mut app, 7, TouchPhase::Started, Vec2::new(120.0, 80.0));
        app.update();

        assert_eq!(
            collected(&app),
            vec![TapEvent {
                source: TapSource::Touch(7),
                position: Vec2::new(120.0, 80.0),
            }]
        );

        // A held finger is not a new tap
        touch(&mut app, 7, TouchPhase::Moved, Vec2::new(125.0, 80.0));
        app.update();
        assert!(collected(&app).is_empty());
    }

    #[test]
    fn disabled_input_collects_nothing() {
        let mut app = touch_app(false);
        touch(&mut app, 3, TouchPhase::Started, Vec2::new(10.0, 10.0));
        app.update();
        assert!(collected(&app).is_empty());

        app.world_mut().resource_mut::<TapInput>().enabled = true;
        touch(&mut app, 4, TouchPhase::Started, Vec2::new(20.0, 20.0));
        app.update();
        assert_eq!(collected(&app).len(), 1);
        assert_eq!(collected(&app)[0].source, TapSource::Touch(4));
    }

    #[test]
    fn disabled_input_reports_disabled() {
        let mut world = World::new();
        world.insert_resource(TapInput { enabled: false });
        let enabled = world
            .run_system_once(tap_input_enabled)
            .expect("condition runs");
        assert!(!enabled);
    }
}
