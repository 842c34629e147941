//! Surface Area Heuristic Algorithm

use super::common::*;
use super::BVH_MAX_DEPTH;
use order_stat::kth_by;
use rt_core::geometry::*;
use rt_core::pbrt::*;
use std::cmp::Ordering;

const N_BUCKETS: usize = 12;

/// Recursively build the tree over `primitive_info[start..end]`, reordering
/// the slice so each node's primitives are contiguous.
///
/// * `split_method`      - Middle|EqualCounts|SAH
/// * `max_prims_in_node` - Maximum number of primitives in the node.
/// * `primitive_info`    - Primitive information.
/// * `start`             - Starting index. For first call it should be 0.
/// * `end`               - Ending index + 1. For first call it should be number
///                         of primitives.
/// * `depth`             - Depth of the node. For first call it should be 0.
/// * `total_nodes`       - Used to return total number of nodes.
/// * `ordered_prims`     - Receives primitive indices in leaf order.
#[allow(clippy::too_many_arguments)]
pub fn build(
    split_method: SplitMethod,
    max_prims_in_node: usize,
    primitive_info: &mut [BVHPrimitiveInfo],
    start: usize,
    end: usize,
    depth: usize,
    total_nodes: &mut usize,
    ordered_prims: &mut Vec<u32>,
) -> BVHBuildNode {
    // Compute bounds of all primitives in BVH node.
    let mut bounds = Bounds3f::empty();
    for info in primitive_info[start..end].iter() {
        bounds = bounds.union(&info.bounds);
    }

    let mut dim = Axis::default(); // Will be set if we need to make interior node.

    let n_primitives = end - start;

    // Traversal stacks hold one entry per level; stop splitting at the limit.
    let interior_midpoint = if n_primitives == 1 || depth + 1 >= BVH_MAX_DEPTH {
        None
    } else {
        // Compute bound of primitive centroids, choose split dimension dim.
        let mut centroid_bounds = Bounds3f::empty();
        for info in primitive_info[start..end].iter() {
            centroid_bounds = centroid_bounds.union_point(&info.centroid);
        }
        dim = centroid_bounds.maximum_extent();

        // Partition primitives into two sets and build children.
        if centroid_bounds.p_max[dim] == centroid_bounds.p_min[dim] {
            None
        } else {
            match split_method {
                SplitMethod::Middle => Some(split_middle(
                    primitive_info,
                    start,
                    end,
                    dim,
                    &centroid_bounds,
                )),

                SplitMethod::EqualCounts => {
                    Some(split_equal_counts(primitive_info, start, end, dim))
                }

                SplitMethod::SAH => split_sah(
                    primitive_info,
                    start,
                    end,
                    dim,
                    &centroid_bounds,
                    &bounds,
                    max_prims_in_node,
                ),
            }
        }
    };

    *total_nodes += 1;
    if let Some(mid) = interior_midpoint {
        let c0 = build(
            split_method,
            max_prims_in_node,
            primitive_info,
            start,
            mid,
            depth + 1,
            total_nodes,
            ordered_prims,
        );
        let c1 = build(
            split_method,
            max_prims_in_node,
            primitive_info,
            mid,
            end,
            depth + 1,
            total_nodes,
            ordered_prims,
        );
        BVHBuildNode::new_interior_node(dim, c0, c1)
    } else {
        let first_prim_offset = ordered_prims.len();
        for info in primitive_info[start..end].iter() {
            ordered_prims.push(info.primitive_number as u32);
        }
        BVHBuildNode::new_leaf_node(first_prim_offset, n_primitives, bounds)
    }
}

/// Split at the midpoint of the centroid bounds along `dim`.
///
/// * `primitive_info`  - Vector containing all primitive info.
/// * `start`           - Starting index in primitive_info.
/// * `end`             - Ending index + 1 in primitive_info.
/// * `dim`             - Axis used to partition primitives.
/// * `centroid_bounds` - Bounding box of primtive centroids in primtive_info
///                       from start to end.
fn split_middle(
    primitive_info: &mut [BVHPrimitiveInfo],
    start: usize,
    end: usize,
    dim: Axis,
    centroid_bounds: &Bounds3f,
) -> usize {
    let pmid = (centroid_bounds.p_min[dim] + centroid_bounds.p_max[dim]) / 2.0;
    let infos = primitive_info[start..end].iter_mut();
    let split = itertools::partition(infos, |pi| pi.centroid[dim] < pmid);
    let mid = start + split;

    if mid != start && mid != end {
        mid
    } else {
        // Heavily overlapping centroids can defeat the midpoint split.
        split_equal_counts(primitive_info, start, end, dim)
    }
}

/// Partition primitives into equally sized subsets by centroid along `dim`.
///
/// * `primitive_info`  - Vector containing all primitive info.
/// * `start`           - Starting index in primitive_info.
/// * `end`             - Ending index + 1 in primitive_info.
/// * `dim`             - Axis used to partition primitives.
fn split_equal_counts(
    primitive_info: &mut [BVHPrimitiveInfo],
    start: usize,
    end: usize,
    dim: Axis,
) -> usize {
    let mid = (start + end) / 2;

    kth_by(&mut primitive_info[start..end], mid - start, |a, b| {
        a.centroid[dim]
            .partial_cmp(&b.centroid[dim])
            .unwrap_or(Ordering::Equal)
    });

    mid
}

/// Returns the SAH bucket for a centroid.
fn bucket_index(centroid_bounds: &Bounds3f, centroid: &Point3f, dim: Axis) -> usize {
    let b = (N_BUCKETS as Float * centroid_bounds.offset(centroid)[dim]) as usize;
    b.min(N_BUCKETS - 1)
}

/// Bin centroids into buckets along `dim` and split at the bucket boundary
/// with the lowest surface area cost. Returns `None` when a leaf is cheaper
/// and small enough.
///
/// * `primitive_info`    - Vector containing all primitive info.
/// * `start`             - Start index in primitive_info.
/// * `end`               - End index in primitive_info.
/// * `dim`               - Axis used to partition primitives.
/// * `centroid_bounds`   - Bounding box of primtive centroids in primtive_info
///                         from start to end.
/// * `bounds`            - Bound box of all primitives in BVH node.
/// * `max_prims_in_node` - Maximum primitives allowed in node.
fn split_sah(
    primitive_info: &mut [BVHPrimitiveInfo],
    start: usize,
    end: usize,
    dim: Axis,
    centroid_bounds: &Bounds3f,
    bounds: &Bounds3f,
    max_prims_in_node: usize,
) -> Option<usize> {
    let n_primitives = end - start;
    if n_primitives <= 2 {
        return Some(split_equal_counts(primitive_info, start, end, dim));
    }

    let mut buckets = [BucketInfo::default(); N_BUCKETS];

    for info in primitive_info[start..end].iter() {
        let b = bucket_index(centroid_bounds, &info.centroid, dim);
        buckets[b].count += 1;
        buckets[b].bounds = buckets[b].bounds.union(&info.bounds);
    }

    // Cost of splitting after bucket i from a forward sweep over the buckets
    // on the left and a backward sweep over the buckets on the right.
    let mut left = [(0_usize, 0.0 as Float); N_BUCKETS - 1];
    let (mut count, mut b) = (0, Bounds3f::empty());
    for (i, bucket) in buckets.iter().take(N_BUCKETS - 1).enumerate() {
        count += bucket.count;
        b = b.union(&bucket.bounds);
        left[i] = (count, b.surface_area());
    }

    let inv_area = 1.0 / bounds.surface_area();
    let (mut min_cost, mut min_cost_split_bucket) = (INFINITY, 0);
    let (mut count, mut b) = (0, Bounds3f::empty());
    for i in (0..N_BUCKETS - 1).rev() {
        count += buckets[i + 1].count;
        b = b.union(&buckets[i + 1].bounds);
        let (left_count, left_area) = left[i];
        let cost = 1.0 + (left_count as Float * left_area + count as Float * b.surface_area()) * inv_area;
        if cost <= min_cost {
            min_cost = cost;
            min_cost_split_bucket = i;
        }
    }

    let leaf_cost = n_primitives as Float;
    if n_primitives > max_prims_in_node || min_cost < leaf_cost {
        let infos = primitive_info[start..end].iter_mut();
        let split = itertools::partition(infos, |pi| {
            bucket_index(centroid_bounds, &pi.centroid, dim) <= min_cost_split_bucket
        });
        Some(start + split)
    } else {
        None
    }
}
