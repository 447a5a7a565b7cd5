use std::convert::TryFrom;
use std::time::Instant;

use bytemuck::{Pod, Zeroable};

use crate::bvh::{Bvh, BvhBuildNode};
use crate::error::{SceneError, SceneResult};
use crate::material::MaterialBuckets;
use crate::shapes::sphere::Sphere;

/// Index value meaning "no such node".
pub const NO_NODE: i32 = -1;

/// One node of the flattened tree, exactly as the traversal kernel reads it.
///
/// 20 four-byte words, no implicit padding:
///
/// | word  | field            |
/// |-------|------------------|
/// | 0-2   | `min`            |
/// | 3-5   | `max`            |
/// | 6     | `left`           |
/// | 7     | `right`          |
/// | 8     | `parent`         |
/// | 9     | `is_leaf`        |
/// | 10-12 | `center`         |
/// | 13-15 | `center_delta`   |
/// | 16    | `radius`         |
/// | 17    | `material_type`  |
/// | 18    | `material_index` |
/// | 19    | `is_moving`      |
///
/// Interior nodes leave everything from `center` on zeroed.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LinearBvhNode {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub left: i32,
    pub right: i32,
    pub parent: i32,
    pub is_leaf: u32,
    pub center: [f32; 3],
    pub center_delta: [f32; 3],
    pub radius: f32,
    pub material_type: u32,
    pub material_index: u32,
    pub is_moving: u32,
}

impl LinearBvhNode {
    fn interior(node: &BvhBuildNode, parent: i32) -> Self {
        let bounds = node.bounds();
        Self {
            min: bounds.min.into(),
            max: bounds.max.into(),
            left: NO_NODE,
            right: NO_NODE,
            parent,
            ..Self::zeroed()
        }
    }

    fn leaf(node: &BvhBuildNode, parent: i32, sphere: &Sphere, material_index: u32) -> Self {
        Self {
            is_leaf: 1,
            center: sphere.center0().into(),
            center_delta: sphere.center_delta().into(),
            radius: sphere.radius(),
            material_type: sphere.material().kind().tag(),
            material_index,
            is_moving: sphere.is_moving() as u32,
            ..Self::interior(node, parent)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf != 0
    }
}

/// Converts an arena position into a node buffer index.
pub(crate) fn node_index(idx: usize) -> SceneResult<i32> {
    i32::try_from(idx).map_err(|_| SceneError::CapacityExceeded { nodes: idx + 1 })
}

#[derive(Copy, Clone)]
enum ChildSide {
    Root,
    Left,
    Right,
}

/// Lay the tree out in depth-first pre-order and gather leaf materials into per-kind buckets.
///
/// Each record stores its parent and child indices explicitly, so no assumption about the shape of
/// the tree is needed on the kernel side. `spheres` must be the slice `bvh` was built from.
pub fn flatten(bvh: &Bvh, spheres: &[Sphere]) -> SceneResult<(Vec<LinearBvhNode>, MaterialBuckets)> {
    assert_eq!(bvh.prim_count(), spheres.len(), "BVH was built over a different primitive list");

    let start = Instant::now();
    let span = tracing::debug_span!("flatten_bvh", nodes = bvh.len());
    let _enter = span.enter();

    // fail before doing any work if the last index can't be represented
    node_index(bvh.len().saturating_sub(1))?;

    let mut linear: Vec<LinearBvhNode> = Vec::with_capacity(bvh.len());
    let mut buckets = MaterialBuckets::new();

    let mut stack: Vec<(usize, i32, ChildSide)> = vec![(0, NO_NODE, ChildSide::Root)];
    while let Some((node_idx, parent, side)) = stack.pop() {
        let this = node_index(linear.len())?;
        let node = &bvh.nodes()[node_idx];

        let record = match node {
            BvhBuildNode::Leaf { prim, .. } => {
                let sphere = &spheres[*prim];
                let material_index = buckets.push(sphere.material())?;
                LinearBvhNode::leaf(node, parent, sphere, material_index)
            }
            BvhBuildNode::Interior { children, .. } => {
                stack.push((children[1], this, ChildSide::Right));
                stack.push((children[0], this, ChildSide::Left));
                LinearBvhNode::interior(node, parent)
            }
        };
        linear.push(record);

        match side {
            ChildSide::Root => {}
            ChildSide::Left => linear[parent as usize].left = this,
            ChildSide::Right => linear[parent as usize].right = this,
        }
    }

    tracing::debug!(
        records = linear.len(),
        materials = buckets.total_len(),
        "Flattened BVH in {} us", start.elapsed().as_micros()
    );
    Ok((linear, buckets))
}
