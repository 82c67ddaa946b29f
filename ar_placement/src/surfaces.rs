use bevy::prelude::*;

use crate::pose::Pose;
use crate::ray_caster::{Ray, RayCaster};

/// Coarse classification of a detected plane by its normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SurfaceAlignment {
    HorizontalUp,
    HorizontalDown,
    Vertical,
}

impl SurfaceAlignment {
    // cos(25°): anything tilted further than this counts as a wall.
    const HORIZONTAL_COS: f32 = 0.906;

    pub fn from_normal(normal: Vec3) -> Self {
        let dot = normal.normalize_or_zero().dot(Vec3::Y);
        if dot >= Self::HORIZONTAL_COS {
            SurfaceAlignment::HorizontalUp
        } else if dot <= -Self::HORIZONTAL_COS {
            SurfaceAlignment::HorizontalDown
        } else {
            SurfaceAlignment::Vertical
        }
    }
}

/// A planar surface reported by the tracking backend.
///
/// The plane passes through `pose.position` with normal `pose.up()`. The
/// measured boundary is a polygon in plane-local XZ coordinates.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct DetectedSurface {
    pub id: u64,
    pub pose: Pose,
    pub boundary: Vec<Vec2>,
}

impl DetectedSurface {
    pub fn new(id: u64, pose: Pose, boundary: Vec<Vec2>) -> Self {
        Self { id, pose, boundary }
    }

    /// Rectangular surface centered on `pose` with the given half extents along local X and Z.
    pub fn rectangle(id: u64, pose: Pose, half_extents: Vec2) -> Self {
        let Vec2 { x, y } = half_extents;
        Self::new(
            id,
            pose,
            vec![
                Vec2::new(-x, -y),
                Vec2::new(x, -y),
                Vec2::new(x, y),
                Vec2::new(-x, y),
            ],
        )
    }

    pub fn normal(&self) -> Vec3 {
        self.pose.up()
    }

    pub fn alignment(&self) -> SurfaceAlignment {
        SurfaceAlignment::from_normal(self.normal())
    }

    /// Projects a world point into plane-local XZ coordinates.
    pub fn to_local(&self, world_point: Vec3) -> Vec2 {
        let local = self.pose.rotation.inverse() * (world_point - self.pose.position);
        Vec2::new(local.x, local.z)
    }

    /// Even-odd point in polygon test against the measured boundary.
    pub fn contains_local_point(&self, point: Vec2) -> bool {
        if self.boundary.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = self.boundary.len() - 1;
        for i in 0..self.boundary.len() {
            let a = self.boundary[i];
            let b = self.boundary[j];
            if (a.y > point.y) != (b.y > point.y) {
                let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
                if point.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Intersects `ray` with this surface's infinite plane.
    pub fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let distance = RayCaster::ray_plane_intersection(ray, self.pose.position, self.normal())?;
        let point = ray.at(distance);
        Some(SurfaceHit {
            surface_id: self.id,
            pose: Pose::new(point, self.pose.rotation),
            distance,
            within_boundary: self.contains_local_point(self.to_local(point)),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceHit {
    pub surface_id: u64,
    pub pose: Pose,
    pub distance: f32,
    /// Whether the hit lies inside the surface's measured boundary rather
    /// than only on its infinite plane.
    pub within_boundary: bool,
}

/// Source of ray hits against currently tracked surfaces.
pub trait SurfaceProvider {
    /// Returns every plane hit along `ray`, sorted by ascending distance.
    fn raycast(&self, ray: &Ray) -> Vec<SurfaceHit>;
}

/// The set of surfaces currently tracked by the platform.
///
/// An AR backend keeps this resource up to date; the desktop build seeds it
/// with simulated surfaces.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct DetectedSurfaces {
    surfaces: Vec<DetectedSurface>,
}

impl DetectedSurfaces {
    /// Inserts a surface, replacing any existing surface with the same id.
    pub fn upsert(&mut self, surface: DetectedSurface) {
        if let Some(existing) = self.surfaces.iter_mut().find(|s| s.id == surface.id) {
            *existing = surface;
        } else {
            self.surfaces.push(surface);
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<DetectedSurface> {
        let index = self.surfaces.iter().position(|s| s.id == id)?;
        Some(self.surfaces.remove(index))
    }

    pub fn clear(&mut self) {
        self.surfaces.clear();
    }

    pub fn get(&self, id: u64) -> Option<&DetectedSurface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectedSurface> {
        self.surfaces.iter()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl SurfaceProvider for DetectedSurfaces {
    fn raycast(&self, ray: &Ray) -> Vec<SurfaceHit> {
        if !ray.is_valid() {
            return Vec::new();
        }

        let mut hits: Vec<SurfaceHit> = self
            .surfaces
            .iter()
            .filter_map(|surface| surface.raycast(ray))
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }
}
