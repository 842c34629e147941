//! Bounding Volume Hierarchy

mod common;
mod sah;
mod traversal;

use rt_core::geometry::*;

// Re-export
pub use common::*;

/// Maximum depth of the hierarchy; traversal stacks are sized by it.
pub const BVH_MAX_DEPTH: usize = 64;

/// Default maximum number of primitives in a leaf.
pub const DEFAULT_MAX_PRIMS_IN_NODE: usize = 4;

/// Bounding Volume Hierarchy over a list of boxes. Leaves refer to the boxes
/// by their index in the input list.
#[derive(Clone, Debug, Default)]
pub struct BVH {
    /// Flattened nodes; the root is at index 0.
    pub nodes: Vec<BVHNode>,

    /// Primitive indices referenced by leaf node ranges.
    pub primitive_indices: Vec<u32>,

    /// Depth of the deepest node.
    pub max_depth: usize,
}

impl BVH {
    /// Build a BVH.
    ///
    /// * `bounds`            - Bounding box of each primitive.
    /// * `max_prims_in_node` - Maximum number of primitives in a leaf.
    /// * `split_method`      - Method used to partition primitives.
    pub fn new(bounds: &[Bounds3f], max_prims_in_node: usize, split_method: SplitMethod) -> Self {
        let n_primitives = bounds.len();
        if n_primitives == 0 {
            return Self::default();
        }
        assert!(
            n_primitives <= u32::MAX as usize,
            "too many primitives for a BVH: {}",
            n_primitives
        );

        let mut primitive_info: Vec<BVHPrimitiveInfo> = bounds
            .iter()
            .enumerate()
            .map(|(i, b)| BVHPrimitiveInfo::new(i, *b))
            .collect();

        let mut total_nodes = 0_usize;
        let mut ordered_prims = Vec::with_capacity(n_primitives);
        let root = sah::build(
            split_method,
            max_prims_in_node.max(1),
            &mut primitive_info,
            0,
            n_primitives,
            0,
            &mut total_nodes,
            &mut ordered_prims,
        );

        let mut nodes = Vec::with_capacity(total_nodes);
        nodes.push(BVHNode::default());
        let mut max_depth = 0;
        Self::flatten_bvh_tree(&root, 0, 0, &mut nodes, &mut max_depth);
        assert!(max_depth < BVH_MAX_DEPTH, "BVH depth {} exceeds the limit", max_depth);

        info!(
            "BVH created with {} nodes for {} primitives, max depth {} ({:?})",
            nodes.len(),
            n_primitives,
            max_depth,
            split_method,
        );

        Self {
            nodes,
            primitive_indices: ordered_prims,
            max_depth,
        }
    }

    /// Returns the bounding box of all primitives.
    pub fn bounding_box(&self) -> Bounds3f {
        self.nodes.first().map_or_else(Bounds3f::empty, |n| n.bounds)
    }

    /// Returns true if there are no primitives.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Write a build node into `nodes[index]`. Children of interior nodes are
    /// appended as a pair before recursing into them.
    ///
    /// * `node`      - The build node.
    /// * `index`     - Slot of the node in `nodes`.
    /// * `depth`     - Depth of the node.
    /// * `nodes`     - The flattened nodes.
    /// * `max_depth` - Used to return the depth of the deepest node.
    fn flatten_bvh_tree(
        node: &BVHBuildNode,
        index: usize,
        depth: usize,
        nodes: &mut Vec<BVHNode>,
        max_depth: &mut usize,
    ) {
        *max_depth = (*max_depth).max(depth);
        match node {
            BVHBuildNode::Leaf { bounds, first, count } => {
                nodes[index] = BVHNode::new_leaf_node(*bounds, *first as u32, *count as u32);
            }
            BVHBuildNode::Interior { bounds, axis, children } => {
                let first_child = nodes.len();
                nodes.push(BVHNode::default());
                nodes.push(BVHNode::default());
                nodes[index] = BVHNode::new_interior_node(*bounds, first_child as u32, *axis as u8);
                Self::flatten_bvh_tree(&children[0], first_child, depth + 1, nodes, max_depth);
                Self::flatten_bvh_tree(&children[1], first_child + 1, depth + 1, nodes, max_depth);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::pbrt::*;
    use rt_core::rng::*;

    fn random_boxes(rng: &mut RNG, n: usize) -> Vec<Bounds3f> {
        (0..n)
            .map(|_| {
                let c = Point3f::new(
                    rng.uniform_float() * 20.0 - 10.0,
                    rng.uniform_float() * 20.0 - 10.0,
                    rng.uniform_float() * 20.0 - 10.0,
                );
                let h = Vector3f::new(
                    0.05 + rng.uniform_float(),
                    0.05 + rng.uniform_float(),
                    0.05 + rng.uniform_float(),
                );
                Bounds3f::new(c - h, c + h)
            })
            .collect()
    }

    fn check_structure(bvh: &BVH, bounds: &[Bounds3f]) {
        let mut seen = vec![0_u32; bounds.len()];
        let mut leaves = 0;
        for node in bvh.nodes.iter() {
            if node.is_leaf() {
                leaves += 1;
                let range = node.offset as usize..(node.offset + node.n_primitives) as usize;
                for &p in bvh.primitive_indices[range].iter() {
                    seen[p as usize] += 1;
                    assert_eq!(node.bounds.union(&bounds[p as usize]), node.bounds);
                }
            } else {
                let first = node.offset as usize;
                assert!(first > 0 && first + 1 < bvh.nodes.len());
                for child in &bvh.nodes[first..first + 2] {
                    assert_eq!(node.bounds.union(&child.bounds), node.bounds);
                }
            }
        }
        assert!(seen.iter().all(|&s| s == 1), "every primitive must be in exactly one leaf");
        assert_eq!(bvh.nodes.len(), 2 * leaves - 1);
        assert!(bvh.max_depth < BVH_MAX_DEPTH);
    }

    #[test]
    fn empty_input() {
        let bvh = BVH::new(&[], 4, SplitMethod::SAH);
        assert!(bvh.is_empty());
        assert!(bvh.bounding_box().is_empty());
    }

    #[test]
    fn single_primitive_is_a_leaf() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 2.0, 3.0));
        let bvh = BVH::new(&[b], 4, SplitMethod::SAH);
        assert_eq!(bvh.nodes.len(), 1);
        assert!(bvh.nodes[0].is_leaf());
        assert_eq!(bvh.bounding_box(), b);
        assert_eq!(bvh.primitive_indices, vec![0]);
    }

    #[test]
    fn all_split_methods_produce_valid_trees() {
        let mut rng = RNG::new(7);
        let bounds = random_boxes(&mut rng, 1000);
        let all = bounds.iter().fold(Bounds3f::empty(), |b, p| b.union(p));
        for method in [SplitMethod::SAH, SplitMethod::Middle, SplitMethod::EqualCounts] {
            let bvh = BVH::new(&bounds, 4, method);
            check_structure(&bvh, &bounds);
            assert_eq!(bvh.bounding_box(), all);
        }
    }

    #[test]
    fn identical_centroids_share_a_leaf() {
        let b = Bounds3f::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let bounds = vec![b; 10];
        let bvh = BVH::new(&bounds, 2, SplitMethod::SAH);
        assert_eq!(bvh.nodes.len(), 1);
        assert_eq!(bvh.nodes[0].n_primitives, 10);
    }

    #[test]
    fn depth_is_limited() {
        // Exponentially spaced boxes make every split peel off one primitive.
        let bounds: Vec<Bounds3f> = (0..90)
            .map(|i| {
                let x = (2.5 as Float).powi(i);
                Bounds3f::new(Point3f::new(x, 0.0, 0.0), Point3f::new(x * 1.01, 1.0, 1.0))
            })
            .collect();
        let bvh = BVH::new(&bounds, 1, SplitMethod::Middle);
        check_structure(&bvh, &bounds);
        assert_eq!(bvh.max_depth, BVH_MAX_DEPTH - 1);
    }
}
