use std::ops::Range;
use std::time::Instant;

use crate::error::{SceneError, SceneResult};
use crate::geometry::bounds::Bounds3f;
use crate::shapes::Shape;
use crate::Point3f;

pub mod linear;
mod split;

pub use linear::{flatten, LinearBvhNode, NO_NODE};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SplitMethod {
    /// Sort by centroid along the widest centroid axis and split at `n / 2`.
    EqualCounts,
    /// Split at the midpoint of the centroid bounds, falling back to `EqualCounts` if one side
    /// would be empty.
    Middle,
    /// Bucketed surface area heuristic along the widest centroid axis.
    SAH,
}

impl Default for SplitMethod {
    fn default() -> Self {
        SplitMethod::EqualCounts
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BvhConfig {
    pub split_method: SplitMethod,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BvhBuildNode {
    Leaf {
        bounds: Bounds3f,
        /// Index into the primitive slice the tree was built from.
        prim: usize,
    },

    Interior {
        bounds: Bounds3f,
        children: [usize; 2],
        split_axis: usize,
    },
}

impl BvhBuildNode {
    pub fn bounds(&self) -> Bounds3f {
        match self {
            BvhBuildNode::Leaf { bounds, .. } => *bounds,
            BvhBuildNode::Interior { bounds, .. } => *bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhBuildNode::Leaf { .. })
    }
}

/// A binary BVH with one primitive per leaf.
///
/// Nodes live in a single arena. The root is at index 0 and children are always stored after
/// their parent, in depth-first order with the left child first.
#[derive(Clone, Debug, PartialEq)]
pub struct Bvh {
    nodes: Vec<BvhBuildNode>,
    n_prims: usize,
}

#[derive(Copy, Clone)]
pub(crate) struct BvhPrimInfo {
    pub prim_id: usize,
    pub bounds: Bounds3f,
    pub centroid: Point3f,
}

impl BvhPrimInfo {
    fn new<S: Shape>(prim_id: usize, prim: &S) -> Self {
        Self { prim_id, bounds: prim.world_bound(), centroid: prim.centroid() }
    }
}

#[derive(Copy, Clone)]
enum Slot {
    Root,
    Left(usize),
    Right(usize),
}

impl Bvh {
    pub fn build<S: Shape>(prims: &[S]) -> SceneResult<Self> {
        Self::build_with(prims, BvhConfig::default())
    }

    /// Builds the tree without touching `prims`; only an internal index list is reordered.
    pub fn build_with<S: Shape>(prims: &[S], config: BvhConfig) -> SceneResult<Self> {
        if prims.is_empty() {
            return Err(SceneError::EmptyScene);
        }

        let start = Instant::now();
        let span = tracing::debug_span!("build_bvh", prims = prims.len(), split = ?config.split_method);
        let _enter = span.enter();

        let mut prim_info: Vec<BvhPrimInfo> = prims.iter().enumerate()
            .map(|(i, p)| BvhPrimInfo::new(i, p))
            .collect();

        let n_prims = prim_info.len();
        let mut nodes: Vec<BvhBuildNode> = Vec::with_capacity(2 * n_prims - 1);

        // Left is pushed last so nodes come out in depth-first, left-first order.
        let mut todo: Vec<(Range<usize>, Slot)> = vec![(0..n_prims, Slot::Root)];

        while let Some((range, slot)) = todo.pop() {
            let node_idx = nodes.len();
            let infos = &mut prim_info[range.clone()];

            if infos.len() == 1 {
                nodes.push(BvhBuildNode::Leaf { bounds: infos[0].bounds, prim: infos[0].prim_id });
            } else {
                let (mid, split_axis) = split::partition_prims(infos, config.split_method);
                tracing::trace!(node = node_idx, n = infos.len(), mid, split_axis, "split");

                // bounds are filled in by `join_child_bounds` once the children exist
                nodes.push(BvhBuildNode::Interior {
                    bounds: Bounds3f::empty(),
                    children: [node_idx, node_idx],
                    split_axis,
                });

                let mid = range.start + mid;
                todo.push((mid..range.end, Slot::Right(node_idx)));
                todo.push((range.start..mid, Slot::Left(node_idx)));
            }

            match slot {
                Slot::Root => {}
                Slot::Left(parent) => Self::set_child(&mut nodes[parent], 0, node_idx),
                Slot::Right(parent) => Self::set_child(&mut nodes[parent], 1, node_idx),
            }
        }

        Self::join_child_bounds(&mut nodes);

        let bvh = Self { nodes, n_prims };
        tracing::debug!(
            nodes = bvh.len(),
            depth = bvh.depth(),
            "Built BVH in {} us", start.elapsed().as_micros()
        );
        Ok(bvh)
    }

    /// Children always come after their parent, so walking the arena backwards sees both
    /// children of a node before the node itself.
    fn join_child_bounds(nodes: &mut [BvhBuildNode]) {
        for idx in (0..nodes.len()).rev() {
            if let BvhBuildNode::Interior { children: [left, right], .. } = nodes[idx] {
                let joined = nodes[left].bounds().join(&nodes[right].bounds());
                if let BvhBuildNode::Interior { bounds, .. } = &mut nodes[idx] {
                    *bounds = joined;
                }
            }
        }
    }

    fn set_child(parent: &mut BvhBuildNode, which: usize, child: usize) {
        if let BvhBuildNode::Interior { children, .. } = parent {
            children[which] = child;
        }
    }

    pub fn root(&self) -> &BvhBuildNode {
        &self.nodes[0]
    }

    pub fn bounds(&self) -> Bounds3f {
        self.root().bounds()
    }

    pub fn nodes(&self) -> &[BvhBuildNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> Option<&BvhBuildNode> {
        self.nodes.get(idx)
    }

    /// Total number of nodes, leaves and interior.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn prim_count(&self) -> usize {
        self.n_prims
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Primitive indices in left-to-right leaf order.
    pub fn leaf_prims(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            BvhBuildNode::Leaf { prim, .. } => Some(*prim),
            BvhBuildNode::Interior { .. } => None,
        })
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let BvhBuildNode::Interior { children, .. } = &self.nodes[idx] {
                stack.push((children[0], depth + 1));
                stack.push((children[1], depth + 1));
            }
        }
        max_depth
    }
}
