use crate::bvh::{BvhPrimInfo, SplitMethod};
use crate::geometry::bounds::Bounds3f;

const SAH_BUCKETS: usize = 12;

/// Reorder `prims` so that `prims[..mid]` goes to the left child and `prims[mid..]` to the right.
/// Returns `(mid, axis)`; both sides are always non-empty.
///
/// All reordering is stable, so equal keys keep their input order and builds are reproducible.
pub(crate) fn partition_prims(prims: &mut [BvhPrimInfo], method: SplitMethod) -> (usize, usize) {
    let n = prims.len();
    debug_assert!(n >= 2);

    let centroid_bounds = Bounds3f::from_points(prims.iter().map(|prim| prim.centroid));
    let axis = centroid_bounds.maximum_extent();

    // Two prims are never reordered: a split that can't separate them would leave a side empty.
    if n == 2 {
        return (1, axis);
    }

    let mid = match method {
        SplitMethod::EqualCounts => None,
        SplitMethod::Middle => split_middle(prims, &centroid_bounds, axis),
        SplitMethod::SAH => split_sah(prims, &centroid_bounds, axis),
    };

    let mid = mid.unwrap_or_else(|| split_equal_counts(prims, axis));
    (mid, axis)
}

fn split_equal_counts(prims: &mut [BvhPrimInfo], axis: usize) -> usize {
    // total order, so infinite or NaN centroids can't break the sort
    prims.sort_by(|a, b| a.centroid[axis].total_cmp(&b.centroid[axis]));
    prims.len() / 2
}

/// Stable partition: everything for which `goes_left` holds keeps its relative order and moves
/// to the front. Returns the number of such elements.
fn stable_partition(prims: &mut [BvhPrimInfo], goes_left: impl Fn(&BvhPrimInfo) -> bool) -> usize {
    prims.sort_by_key(|prim| !goes_left(prim));
    prims.iter().take_while(|prim| goes_left(*prim)).count()
}

fn split_middle(prims: &mut [BvhPrimInfo], centroid_bounds: &Bounds3f, axis: usize) -> Option<usize> {
    let midpoint = (centroid_bounds.min[axis] + centroid_bounds.max[axis]) / 2.0;
    let mid = stable_partition(prims, |prim| prim.centroid[axis] < midpoint);
    if mid == 0 || mid == prims.len() {
        None
    } else {
        Some(mid)
    }
}

fn sah_bucket(prim: &BvhPrimInfo, centroid_bounds: &Bounds3f, axis: usize) -> usize {
    let b = (SAH_BUCKETS as f32 * centroid_bounds.offset(&prim.centroid)[axis]) as usize;
    b.min(SAH_BUCKETS - 1)
}

fn split_sah(prims: &mut [BvhPrimInfo], centroid_bounds: &Bounds3f, axis: usize) -> Option<usize> {
    if centroid_bounds.max[axis] <= centroid_bounds.min[axis] {
        return None;
    }

    let mut counts = [0usize; SAH_BUCKETS];
    let mut bucket_bounds = [Bounds3f::empty(); SAH_BUCKETS];
    let mut node_bounds = Bounds3f::empty();
    for prim in prims.iter() {
        let b = sah_bucket(prim, centroid_bounds, axis);
        counts[b] += 1;
        bucket_bounds[b] = bucket_bounds[b].join(&prim.bounds);
        node_bounds = node_bounds.join(&prim.bounds);
    }

    let node_area = node_bounds.surface_area();
    let mut best: Option<(usize, f32)> = None;
    for split in 0..(SAH_BUCKETS - 1) {
        let (mut b0, mut c0) = (Bounds3f::empty(), 0);
        for b in 0..=split {
            b0 = b0.join(&bucket_bounds[b]);
            c0 += counts[b];
        }
        let (mut b1, mut c1) = (Bounds3f::empty(), 0);
        for b in (split + 1)..SAH_BUCKETS {
            b1 = b1.join(&bucket_bounds[b]);
            c1 += counts[b];
        }
        if c0 == 0 || c1 == 0 {
            continue;
        }

        let cost = if node_area > 0.0 {
            0.125 + (c0 as f32 * b0.surface_area() + c1 as f32 * b1.surface_area()) / node_area
        } else {
            0.125 + (c0 + c1) as f32
        };
        if best.map_or(true, |(_, best_cost)| cost < best_cost) {
            best = Some((split, cost));
        }
    }

    let (split, _) = best?;
    let mid = stable_partition(prims, |prim| sah_bucket(prim, centroid_bounds, axis) <= split);
    if mid == 0 || mid == prims.len() {
        None
    } else {
        Some(mid)
    }
}
