use cgmath::Zero;

use crate::error::{SceneError, SceneResult};
use crate::geometry::bounds::Bounds3f;
use crate::material::Material;
use crate::shapes::Shape;
use crate::{Float, Point3f, Vec3f};

/// A sphere, optionally moving along a straight line over the shutter interval `t in [0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center0: Point3f,
    center_delta: Vec3f,
    radius: Float,
    is_moving: bool,
    material: Material,
    bounds: Bounds3f,
}

impl Sphere {
    pub fn new(center: Point3f, radius: Float, material: Material) -> SceneResult<Self> {
        Self::build(center, Vec3f::zero(), false, radius, material)
    }

    /// A sphere centered at `center0` at `t = 0` and at `center1` at `t = 1`.
    pub fn moving(center0: Point3f, center1: Point3f, radius: Float, material: Material) -> SceneResult<Self> {
        Self::build(center0, center1 - center0, true, radius, material)
    }

    fn build(
        center0: Point3f,
        center_delta: Vec3f,
        is_moving: bool,
        radius: Float,
        material: Material
    ) -> SceneResult<Self> {
        // also catches NaN
        if !(radius > 0.0) {
            return Err(SceneError::NonPositiveRadius { radius });
        }
        if !radius.is_finite() {
            return Err(SceneError::NonFiniteRadius { radius });
        }
        let center1 = center0 + center_delta;
        let finite = |p: Point3f| p.x.is_finite() && p.y.is_finite() && p.z.is_finite();
        if !finite(center0) || !finite(center1) {
            return Err(SceneError::NonFiniteCenter);
        }

        let bounds = Bounds3f::from_point(center0)
            .expand(radius)
            .join(&Bounds3f::from_point(center1).expand(radius));

        Ok(Self {
            center0,
            center_delta,
            radius,
            is_moving,
            material,
            bounds,
        })
    }

    pub fn center0(&self) -> Point3f {
        self.center0
    }

    /// Displacement between `t = 0` and `t = 1`; zero for static spheres.
    pub fn center_delta(&self) -> Vec3f {
        self.center_delta
    }

    pub fn center_at(&self, time: Float) -> Point3f {
        self.center0 + self.center_delta * time
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }
}

impl Shape for Sphere {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }
}
