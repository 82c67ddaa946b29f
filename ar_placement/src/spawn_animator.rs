use bevy::prelude::*;

use crate::settings::AnimationSettings;

/// Easing applied to the scale-in animation. Every curve maps [0, 1] onto
/// [0, 1] monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ScaleCurve {
    Linear,
    EaseIn,
    EaseOut,
    /// Cubic Hermite with flat tangents at both ends.
    #[default]
    EaseInOut,
}

impl ScaleCurve {
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            ScaleCurve::Linear => t,
            ScaleCurve::EaseIn => t * t,
            ScaleCurve::EaseOut => t * (2.0 - t),
            ScaleCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Scale-in "pop" played when an object is placed or moved.
///
/// The base scale is captured once at construction; every run scales relative
/// to it, so retriggering mid-animation never compounds.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpawnAnimation {
    base_scale: Vec3,
    duration: f32,
    curve: ScaleCurve,
    elapsed: f32,
    running: bool,
}

impl SpawnAnimation {
    /// Creates an animation that is already triggered, so a new object starts
    /// invisible and grows in on the following frames.
    pub fn new(base_scale: Vec3, settings: &AnimationSettings) -> Self {
        Self {
            base_scale,
            duration: settings.duration(),
            curve: settings.curve(),
            elapsed: 0.0,
            running: true,
        }
    }

    pub fn base_scale(&self) -> Vec3 {
        self.base_scale
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn curve(&self) -> ScaleCurve {
        self.curve
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Animation progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.running {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Scale the object should currently have.
    pub fn current_scale(&self) -> Vec3 {
        if self.running {
            self.base_scale * self.curve.evaluate(self.progress())
        } else {
            self.base_scale
        }
    }

    /// Discards any run in progress and starts over from scale zero.
    pub fn trigger(&mut self) -> Vec3 {
        self.elapsed = 0.0;
        self.running = true;
        Vec3::ZERO
    }

    /// Advances the animation and returns the scale to apply.
    pub fn tick(&mut self, delta_secs: f32) -> Vec3 {
        if !self.running {
            return self.base_scale;
        }

        self.elapsed += delta_secs.max(0.0);
        if self.elapsed >= self.duration {
            // Pin to the base scale instead of trusting the curve endpoint
            self.running = false;
            return self.base_scale;
        }

        self.current_scale()
    }
}

/// Advances every running spawn animation and writes the result into the transform.
pub fn animate_spawned_objects(
    time: Res<Time>,
    mut animated: Query<(Entity, &mut Transform, &mut SpawnAnimation)>,
) {
    let delta = time.delta_secs();
    for (entity, mut transform, mut animation) in &mut animated {
        if !animation.is_running() {
            continue;
        }

        transform.scale = animation.tick(delta);

        if !animation.is_running() {
            debug!("Spawn animation finished for {:?}", entity);
        }
    }
}
