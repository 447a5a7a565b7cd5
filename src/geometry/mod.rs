use crate::{Float, Point3f};

pub mod bounds;

pub use bounds::*;

/// Component-wise min/max for points, which cgmath only provides for its `Array` types.
pub trait ComponentWiseExt {
    fn min_by_component(self, other: Self) -> Self;

    fn max_by_component(self, other: Self) -> Self;
}

impl ComponentWiseExt for Point3f {
    fn min_by_component(self, other: Self) -> Self {
        Point3f::new(
            Float::min(self.x, other.x),
            Float::min(self.y, other.y),
            Float::min(self.z, other.z),
        )
    }

    fn max_by_component(self, other: Self) -> Self {
        Point3f::new(
            Float::max(self.x, other.x),
            Float::max(self.y, other.y),
            Float::max(self.z, other.z),
        )
    }
}

/// Index of the largest component. Ties go to the lower axis.
pub fn max_dimension(v: crate::Vec3f) -> usize {
    if v.x >= v.y && v.x >= v.z {
        0
    } else if v.y >= v.z {
        1
    } else {
        2
    }
}
