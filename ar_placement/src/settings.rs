use bevy::prelude::*;

use crate::placement::PlacementMode;
use crate::ray_caster::RayCaster;
use crate::spawn_animator::ScaleCurve;

/// Timing of the scale-in animation. Only constructible with a usable duration.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AnimationSettings {
    duration: f32,
    curve: ScaleCurve,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: Self::DEFAULT_DURATION,
            curve: ScaleCurve::EaseInOut,
        }
    }
}

impl AnimationSettings {
    pub const DEFAULT_DURATION: f32 = 0.5;

    pub fn new(duration: f32, curve: ScaleCurve) -> Result<Self, String> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(format!("Invalid animation duration: {}", duration));
        }
        Ok(Self { duration, curve })
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn curve(&self) -> ScaleCurve {
        self.curve
    }
}

/// Configuration of the placement feature, fixed for the lifetime of the app.
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlacementSettings {
    pub mode: PlacementMode,
    pub animation: AnimationSettings,
    /// Scale a placed object settles at once its pop-in finishes.
    pub object_scale: Vec3,
    /// Vertical field of view of the AR camera in radians.
    pub camera_fov_y: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            mode: PlacementMode::Repositioning,
            animation: AnimationSettings::default(),
            object_scale: Vec3::splat(0.2),
            camera_fov_y: RayCaster::DEFAULT_FOV_Y,
        }
    }
}

impl PlacementSettings {
    pub fn with_mode(mut self, mode: PlacementMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_animation(mut self, animation: AnimationSettings) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_object_scale(mut self, scale: Vec3) -> Result<Self, String> {
        if !scale.is_finite() || scale.min_element() <= 0.0 {
            return Err(format!("Invalid object scale: {:?}", scale));
        }
        self.object_scale = scale;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let settings = PlacementSettings::default();
        assert_eq!(settings.mode, PlacementMode::Repositioning);
        assert_eq!(settings.animation.duration(), 0.5);
        assert_eq!(settings.animation.curve(), ScaleCurve::EaseInOut);
    }

    #[test]
    fn rejects_unusable_durations() {
        assert!(AnimationSettings::new(0.0, ScaleCurve::Linear).is_err());
        assert!(AnimationSettings::new(-1.0, ScaleCurve::Linear).is_err());
        assert!(AnimationSettings::new(f32::NAN, ScaleCurve::Linear).is_err());
        assert!(AnimationSettings::new(f32::INFINITY, ScaleCurve::Linear).is_err());
        assert!(AnimationSettings::new(0.25, ScaleCurve::Linear).is_ok());
    }

    #[test]
    fn rejects_degenerate_object_scale() {
        assert!(
            PlacementSettings::default()
                .with_object_scale(Vec3::new(1.0, 0.0, 1.0))
                .is_err()
        );
        let settings = PlacementSettings::default()
            .with_object_scale(Vec3::splat(0.5))
            .expect("valid scale");
        assert_eq!(settings.object_scale, Vec3::splat(0.5));
    }
}
