use bevy::prelude::*;

/// World-space position and orientation of a tracked surface hit or placed object.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Local +Y in world space. For a surface pose this is the surface normal.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local -Z in world space, matching `Transform::forward`.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn with_rotation(self, rotation: Quat) -> Self {
        Self { rotation, ..self }
    }

    pub fn to_transform(&self, scale: Vec3) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation,
            scale,
        }
    }

    /// Copies position and rotation into `transform`, leaving its scale alone.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.position;
        transform.rotation = self.rotation;
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }
}

impl From<&GlobalTransform> for Pose {
    fn from(transform: &GlobalTransform) -> Self {
        let (_scale, rotation, translation) = transform.to_scale_rotation_translation();
        Self::new(translation, rotation)
    }
}
