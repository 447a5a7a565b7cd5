#[macro_use] pub mod macros; // must stay at the top
pub mod error;
pub mod geometry;
pub mod shapes;
pub mod material;
pub mod bvh;
pub mod scene;

pub use geometry::*;
pub use error::SceneError;
pub use shapes::sphere::Sphere;
pub use material::{Material, MaterialKind};
pub use bvh::{Bvh, BvhConfig, SplitMethod};
pub use scene::{Scene, SceneBuffers};

use cgmath::{Point3, Vector3};

pub type Float = f32;

pub type Point3f = Point3<Float>;
pub type Vec3f = Vector3<Float>;
