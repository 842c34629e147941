//! BVH Common

use rt_core::geometry::*;
use rt_core::pbrt::*;

/// Splitting method to use to subdivide primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SplitMethod {
    /// Surface Area Heuristic.
    SAH,

    /// Splitting planes at the midpoint of each region of space.
    Middle,

    /// Partition primitives into equally sized subsets such that the first half of the primitives have smallest
    /// centroid coordinate values along the chosen axis, and second have have the largest centroid coordinate values.
    EqualCounts,
}

/// SAH bucket information.
#[derive(Copy, Clone, Debug, Default)]
pub struct BucketInfo {
    /// Count of primitives.
    pub count: usize,

    /// Bounding box for the bucket.
    pub bounds: Bounds3f,
}

/// Stores information about a primitive.
#[derive(Copy, Clone, Debug)]
pub struct BVHPrimitiveInfo {
    /// Index of the primitive in the input list.
    pub primitive_number: usize,

    /// The bounding box of primitive.
    pub bounds: Bounds3f,

    /// The centroid of bounding box of primitive.
    pub centroid: Point3f,
}

impl BVHPrimitiveInfo {
    /// Create a `BVHPrimitiveInfo`.
    ///
    /// * `primitive_number` - Index of the primitive in the input list.
    /// * `bounds`           - The bounding box of primitive.
    pub fn new(primitive_number: usize, bounds: Bounds3f) -> Self {
        Self {
            primitive_number,
            bounds,
            centroid: bounds.centroid(),
        }
    }
}

/// Node of the BVH while it is being built.
pub enum BVHBuildNode {
    /// Primitives `first..first + count` of the ordered primitive list.
    Leaf {
        bounds: Bounds3f,
        first: usize,
        count: usize,
    },

    /// Two children split along `axis`.
    Interior {
        bounds: Bounds3f,
        axis: Axis,
        children: [Box<BVHBuildNode>; 2],
    },
}

impl BVHBuildNode {
    /// Create a leaf BVH node.
    ///
    /// * `first`  - Index of first primitive in the ordered primitive list.
    /// * `count`  - Number of primitives.
    /// * `bounds` - Bounding box.
    pub fn new_leaf_node(first: usize, count: usize, bounds: Bounds3f) -> Self {
        Self::Leaf { bounds, first, count }
    }

    /// Allocates an interior BVH node.
    ///
    /// * `axis` - Axis used for partitioning children.
    /// * `c0`   - First child.
    /// * `c1`   - Second child.
    pub fn new_interior_node(axis: Axis, c0: BVHBuildNode, c1: BVHBuildNode) -> Self {
        Self::Interior {
            bounds: c0.bounds().union(&c1.bounds()),
            axis,
            children: [Box::new(c0), Box::new(c1)],
        }
    }

    /// Returns the bounding box.
    pub fn bounds(&self) -> Bounds3f {
        match self {
            Self::Leaf { bounds, .. } => *bounds,
            Self::Interior { bounds, .. } => *bounds,
        }
    }
}

/// Flattened BVH node. Children of an interior node are stored next to each
/// other so one index addresses both.
#[derive(Copy, Clone, Debug, Default)]
pub struct BVHNode {
    /// Bounding box for the node.
    pub bounds: Bounds3f,

    /// For leaf nodes, offset into `BVH::primitive_indices`. For interior nodes, index of the first child.
    pub offset: u32,

    /// For leaf nodes, the number of primitives in the node. For interior nodes, 0.
    pub n_primitives: u32,

    /// For interior nodes, which coordinate axis was used for partitioning.
    pub axis: u8,
}

impl BVHNode {
    /// Creates a leaf node.
    ///
    /// * `bounds`       - Bounding box for the node.
    /// * `offset`       - Offset into `BVH::primitive_indices`.
    /// * `n_primitives` - Number of primitives in the node.
    pub fn new_leaf_node(bounds: Bounds3f, offset: u32, n_primitives: u32) -> Self {
        Self {
            bounds,
            offset,
            n_primitives,
            axis: 0,
        }
    }

    /// Creates an interior node.
    ///
    /// * `bounds`      - Bounding box for the node.
    /// * `first_child` - Index of the first child.
    /// * `axis`        - Axis used for partitioning.
    pub fn new_interior_node(bounds: Bounds3f, first_child: u32, axis: u8) -> Self {
        Self {
            bounds,
            offset: first_child,
            n_primitives: 0,
            axis,
        }
    }

    /// Returns true for leaf nodes.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.n_primitives > 0
    }
}
