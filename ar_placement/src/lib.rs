pub mod app;
pub mod camera;
pub mod input;
pub mod orientation;
pub mod placement;
pub mod pose;
pub mod ray_caster;
pub mod reticle;
pub mod settings;
pub mod simulation;
pub mod spawn_animator;
pub mod surface_tracker;
pub mod surfaces;

pub use app::{ArPlacementPlugin, PlacementSet, create_app};
pub use placement::{PlacementController, PlacementHost, PlacementMode, TapOutcome};
pub use pose::Pose;
pub use settings::{AnimationSettings, PlacementSettings};
