use std::f32;

use cgmath::EuclideanSpace;

use crate::geometry::{max_dimension, ComponentWiseExt};
use crate::{Float, Point3f, Vec3f};

/// Axis-aligned bounding box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    pub min: Point3f,
    pub max: Point3f,
}

impl Bounds3f {
    pub fn with_bounds(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// A box with `min = +inf` and `max = -inf`, so joining anything with it yields that thing.
    pub fn empty() -> Self {
        Self::with_bounds(
            Point3f::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            Point3f::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        )
    }

    pub fn from_point(p: Point3f) -> Self {
        Self::with_bounds(p, p)
    }

    pub fn from_points(points: impl IntoIterator<Item = Point3f>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bounds, p| bounds.join_point(&p))
    }

    pub fn join(&self, other: &Bounds3f) -> Self {
        Self::with_bounds(
            self.min.min_by_component(other.min),
            self.max.max_by_component(other.max),
        )
    }

    pub fn join_point(&self, p: &Point3f) -> Self {
        Self::with_bounds(
            self.min.min_by_component(*p),
            self.max.max_by_component(*p),
        )
    }

    /// Grow the box by `delta` along every axis in both directions.
    pub fn expand(&self, delta: Float) -> Self {
        let d = Vec3f::new(delta, delta, delta);
        Self::with_bounds(self.min - d, self.max + d)
    }

    pub fn diagonal(&self) -> Vec3f {
        self.max - self.min
    }

    /// Midpoint of the box. NaN for an empty box.
    pub fn centroid(&self) -> Point3f {
        self.min.midpoint(self.max)
    }

    /// Axis (0, 1 or 2) along which the box is widest, preferring lower axes on ties.
    pub fn maximum_extent(&self) -> usize {
        max_dimension(self.diagonal())
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// True if every point of `other` lies inside this box. An empty `other` is always contained.
    pub fn contains(&self, other: &Bounds3f) -> bool {
        other.min.x >= self.min.x && other.min.y >= self.min.y && other.min.z >= self.min.z
            && other.max.x <= self.max.x && other.max.y <= self.max.y && other.max.z <= self.max.z
    }

    pub fn surface_area(&self) -> Float {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    /// Position of `p` relative to the corners, 0 at `min` and 1 at `max` on each axis.
    pub fn offset(&self, p: &Point3f) -> Vec3f {
        let mut o = *p - self.min;
        for axis in 0..3 {
            if self.max[axis] > self.min[axis] {
                o[axis] /= self.max[axis] - self.min[axis];
            }
        }
        o
    }
}

impl Default for Bounds3f {
    fn default() -> Self {
        Self::empty()
    }
}
