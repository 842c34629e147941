//! BVH traversal for single rays, shadow rays and 8-ray packets.

use super::*;
use rt_core::pbrt::*;
use rt_core::simd::*;
use rt_core::traversal::*;

impl BVH {
    /// Find the closest hit along a ray. `leaf` is called for every primitive
    /// in a visited leaf and updates the hit point when it finds a closer hit.
    ///
    /// * `ctx`  - Traversal context.
    /// * `leaf` - Primitive intersection callback taking the primitive index.
    pub fn traverse<F>(&self, ctx: &mut SingleTraversalContext, mut leaf: F)
    where
        F: FnMut(&mut SingleTraversalContext, u32),
    {
        if self.nodes.is_empty() {
            return;
        }

        let counters = &mut ctx.context.counters;
        counters.num_rays += 1;
        counters.num_ray_box_tests += 1;
        if self.nodes[0].bounds.intersect_ray(ctx.ray, ctx.hit_point.distance).is_none() {
            return;
        }
        counters.num_passed_ray_box_tests += 1;

        // Deferred far children and their entry distances.
        let mut stack = [(0_u32, 0.0 as Float); BVH_MAX_DEPTH];
        let mut stack_size = 0;
        let mut current = 0_usize;

        loop {
            let node = &self.nodes[current];
            if node.is_leaf() {
                let first = node.offset as usize;
                for &prim in &self.primitive_indices[first..first + node.n_primitives as usize] {
                    leaf(ctx, prim);
                }
            } else {
                let c0 = node.offset as usize;
                let c1 = c0 + 1;
                let distance = ctx.hit_point.distance;
                let hit0 = self.nodes[c0].bounds.intersect_ray(ctx.ray, distance);
                let hit1 = self.nodes[c1].bounds.intersect_ray(ctx.ray, distance);

                let counters = &mut ctx.context.counters;
                counters.num_ray_box_tests += 2;
                match (hit0, hit1) {
                    (Some((near0, _)), Some((near1, _))) => {
                        counters.num_passed_ray_box_tests += 2;
                        let (first, second, second_near) = if near1 < near0 {
                            (c1, c0, near0)
                        } else {
                            (c0, c1, near1)
                        };
                        stack[stack_size] = (second as u32, second_near);
                        stack_size += 1;
                        current = first;
                        continue;
                    }
                    (Some(_), None) => {
                        counters.num_passed_ray_box_tests += 1;
                        current = c0;
                        continue;
                    }
                    (None, Some(_)) => {
                        counters.num_passed_ray_box_tests += 1;
                        current = c1;
                        continue;
                    }
                    (None, None) => {}
                }
            }

            // Pop the next node still in front of the closest hit.
            loop {
                if stack_size == 0 {
                    return;
                }
                stack_size -= 1;
                let (index, near) = stack[stack_size];
                if near < ctx.hit_point.distance {
                    current = index as usize;
                    break;
                }
            }
        }
    }

    /// Returns true as soon as any primitive is hit before the hit point
    /// distance.
    ///
    /// * `ctx`  - Traversal context; the hit point distance is the maximum distance.
    /// * `leaf` - Primitive test callback taking the primitive index.
    pub fn traverse_shadow<F>(&self, ctx: &mut SingleTraversalContext, mut leaf: F) -> bool
    where
        F: FnMut(&mut SingleTraversalContext, u32) -> bool,
    {
        if self.nodes.is_empty() {
            return false;
        }

        ctx.context.counters.num_rays += 1;
        let max_distance = ctx.hit_point.distance;

        let mut stack = [0_u32; BVH_MAX_DEPTH];
        stack[0] = 0;
        let mut stack_size = 1;

        while stack_size > 0 {
            stack_size -= 1;
            let node = &self.nodes[stack[stack_size] as usize];

            ctx.context.counters.num_ray_box_tests += 1;
            if node.bounds.intersect_ray(ctx.ray, max_distance).is_none() {
                continue;
            }
            ctx.context.counters.num_passed_ray_box_tests += 1;

            if node.is_leaf() {
                let first = node.offset as usize;
                for &prim in &self.primitive_indices[first..first + node.n_primitives as usize] {
                    if leaf(ctx, prim) {
                        return true;
                    }
                }
            } else {
                // Any hit will do; visit the child on the ray's side of the split first.
                let (first, second) = if ctx.ray.dir[node.axis as usize] < 0.0 {
                    (node.offset + 1, node.offset)
                } else {
                    (node.offset, node.offset + 1)
                };
                stack[stack_size] = second;
                stack[stack_size + 1] = first;
                stack_size += 2;
            }
        }

        false
    }

    /// Find the closest hit for each of 8 rays. A node is visited if any lane
    /// hits its box; children are visited in the order preferred by most
    /// lanes. `leaf` is called with the lanes that hit the leaf box.
    ///
    /// * `ctx`  - Packet traversal context.
    /// * `leaf` - Primitive intersection callback taking the active lanes and the
    ///            primitive index.
    pub fn traverse_packet<F>(&self, ctx: &mut PacketTraversalContext, mut leaf: F)
    where
        F: FnMut(&mut PacketTraversalContext, Mask8, u32),
    {
        if self.nodes.is_empty() {
            return;
        }

        let lanes = SIMD_WIDTH as u64;
        ctx.context.counters.num_rays += lanes;
        ctx.context.counters.num_ray_box_tests += lanes;
        let (root_mask, _) = ctx.ray.intersect_box(&self.nodes[0].bounds, &ctx.hit_point.distance);
        ctx.context.counters.num_passed_ray_box_tests += root_mask.count() as u64;
        if !root_mask.any() {
            return;
        }

        // Deferred nodes with the lanes that hit them when they were pushed.
        let mut stack = [(0_u32, Mask8::NONE); BVH_MAX_DEPTH];
        let mut stack_size = 0;
        let mut current = (0_usize, root_mask);

        loop {
            let (index, mask) = current;
            let node = &self.nodes[index];
            if node.is_leaf() {
                let first = node.offset as usize;
                for &prim in &self.primitive_indices[first..first + node.n_primitives as usize] {
                    leaf(ctx, mask, prim);
                }
            } else {
                let c0 = node.offset as usize;
                let c1 = c0 + 1;
                let distance = ctx.hit_point.distance;
                let (mask0, near0) = ctx.ray.intersect_box(&self.nodes[c0].bounds, &distance);
                let (mask1, near1) = ctx.ray.intersect_box(&self.nodes[c1].bounds, &distance);

                let counters = &mut ctx.context.counters;
                counters.num_ray_box_tests += 2 * lanes;
                counters.num_passed_ray_box_tests += (mask0.count() + mask1.count()) as u64;

                match (mask0.any(), mask1.any()) {
                    (true, true) => {
                        let both = mask0 & mask1;
                        let second_nearer = both & near1.lt(&near0);
                        let ((first, first_mask), second) = if 2 * second_nearer.count() > both.count() {
                            ((c1, mask1), (c0 as u32, mask0))
                        } else {
                            ((c0, mask0), (c1 as u32, mask1))
                        };
                        stack[stack_size] = second;
                        stack_size += 1;
                        current = (first, first_mask);
                        continue;
                    }
                    (true, false) => {
                        current = (c0, mask0);
                        continue;
                    }
                    (false, true) => {
                        current = (c1, mask1);
                        continue;
                    }
                    (false, false) => {}
                }
            }

            if stack_size == 0 {
                return;
            }
            stack_size -= 1;
            let (index, mask) = stack[stack_size];
            current = (index as usize, mask);
        }
    }
}
