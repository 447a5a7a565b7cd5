use std::borrow::Cow;

use crate::bvh::{flatten, Bvh, BvhConfig, LinearBvhNode};
use crate::error::{SceneError, SceneResult};
use crate::geometry::bounds::Bounds3f;
use crate::material::{MaterialBuckets, MaterialKind};
use crate::shapes::sphere::Sphere;

/// The primitive list of a scene, and the entry point for turning it into GPU buffers.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    config: BvhConfig,
}

/// Everything the traversal kernel needs, produced in one go and never modified afterwards.
/// A changed scene gets a fresh `SceneBuffers`.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBuffers {
    nodes: Vec<LinearBvhNode>,
    materials: MaterialBuckets,
    bounds: Bounds3f,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BvhConfig) -> Self {
        Self {
            spheres: Vec::new(),
            config,
        }
    }

    pub fn add(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn clear(&mut self) {
        self.spheres.clear();
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn config(&self) -> BvhConfig {
        self.config
    }

    pub fn world_bound(&self) -> Bounds3f {
        self.spheres.iter()
            .fold(Bounds3f::empty(), |b, s| b.join(&s.bounds()))
    }

    pub fn build_bvh(&self) -> SceneResult<Bvh> {
        Bvh::build_with(&self.spheres, self.config)
    }

    pub fn build_buffers(&self) -> SceneResult<SceneBuffers> {
        if self.spheres.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        let bvh = self.build_bvh()?;
        let (nodes, materials) = flatten(&bvh, &self.spheres)?;
        tracing::info!(
            spheres = self.spheres.len(),
            nodes = nodes.len(),
            depth = bvh.depth(),
            "Scene buffers ready"
        );
        Ok(SceneBuffers {
            nodes,
            materials,
            bounds: bvh.bounds(),
        })
    }

    /// `[x, y, z, radius]` per sphere in insertion order, for kernels that skip the BVH.
    pub fn sphere_data(&self) -> Vec<[f32; 4]> {
        self.spheres.iter()
            .map(|s| {
                let c = s.center0();
                [c.x, c.y, c.z, s.radius()]
            })
            .collect()
    }
}

impl Extend<Sphere> for Scene {
    fn extend<T: IntoIterator<Item = Sphere>>(&mut self, iter: T) {
        self.spheres.extend(iter)
    }
}

impl SceneBuffers {
    pub fn nodes(&self) -> &[LinearBvhNode] {
        &self.nodes
    }

    pub fn materials(&self) -> &MaterialBuckets {
        &self.materials
    }

    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    pub fn material_bytes(&self, kind: MaterialKind) -> Cow<'_, [u8]> {
        self.materials.bytes(kind)
    }
}
