use crate::geometry::bounds::Bounds3f;
use crate::Point3f;

pub mod sphere;

/// Anything the BVH builder can partition.
pub trait Shape {
    /// Bounds over the whole shutter interval.
    fn world_bound(&self) -> Bounds3f;

    fn centroid(&self) -> Point3f {
        self.world_bound().centroid()
    }
}
