//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A strictly binary tree with exactly one primitive per leaf. Construction
//! splits at the median centroid along the longest axis of the centroid
//! bounds, which gives a balanced tree of depth `ceil(log2(N))`.
//!
//! The tree does not own the primitives. Leaves store indices into the slice
//! the tree was built from, and queries take that same slice back.

use crate::{Hittable, Intersection};
use prism_math::{Aabb, Ray};

/// BVH node - either a leaf with one primitive or an interior node with
/// exactly two children.
///
/// Using an enum allows for more cache-efficient traversal since
/// we avoid dynamic dispatch overhead.
#[derive(Debug)]
pub enum BvhNode {
    /// Leaf referencing a single primitive.
    Leaf { bounds: Aabb, primitive: usize },
    /// Internal node, bounds are the merge of both children.
    Interior {
        bounds: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    pub fn bounds(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { bounds, .. } | BvhNode::Interior { bounds, .. } => bounds,
        }
    }

    fn leaf(bounds: &[Aabb], primitive: usize) -> Box<BvhNode> {
        Box::new(BvhNode::Leaf {
            bounds: bounds[primitive],
            primitive,
        })
    }

    fn interior(left: Box<BvhNode>, right: Box<BvhNode>) -> Box<BvhNode> {
        Box::new(BvhNode::Interior {
            bounds: Aabb::surrounding(left.bounds(), right.bounds()),
            left,
            right,
        })
    }
}

/// Shape of a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BvhStats {
    pub leaves: usize,
    pub interior: usize,
    /// Number of edges on the longest root-to-leaf path
    pub depth: usize,
}

/// Bounding volume hierarchy over a slice of primitives.
#[derive(Debug, Default)]
pub struct Bvh {
    root: Option<Box<BvhNode>>,
    primitive_count: usize,
}

impl Bvh {
    /// Build a BVH over `primitives`.
    ///
    /// An empty slice yields a tree without a root that never reports a hit.
    pub fn new<P: Hittable>(primitives: &[P]) -> Self {
        if primitives.is_empty() {
            log::debug!("BVH over an empty primitive set");
            return Self::default();
        }

        let bounds: Vec<Aabb> = primitives.iter().map(|p| p.bounds()).collect();
        let mut order: Vec<usize> = (0..primitives.len()).collect();

        let bvh = Self {
            root: Some(Self::build(&bounds, &mut order)),
            primitive_count: primitives.len(),
        };

        let stats = bvh.stats();
        log::info!(
            "Built BVH: {} primitives, {} leaves, {} interior nodes, depth {}",
            bvh.primitive_count,
            stats.leaves,
            stats.interior,
            stats.depth
        );

        bvh
    }

    /// Recursive BVH construction over a range of primitive indices.
    ///
    /// Median split: partition the range by centroid on the longest axis of
    /// the centroid bounds, split in half, recurse.
    fn build(bounds: &[Aabb], order: &mut [usize]) -> Box<BvhNode> {
        match order.len() {
            0 => unreachable!("BVH ranges are never empty"),
            1 => BvhNode::leaf(bounds, order[0]),
            2 => BvhNode::interior(
                BvhNode::leaf(bounds, order[0]),
                BvhNode::leaf(bounds, order[1]),
            ),
            n => {
                let centroid_bounds =
                    Aabb::from_iter_points(order.iter().map(|&i| bounds[i].centroid()));
                let axis = centroid_bounds.longest_axis();

                let mid = n / 2;
                order.select_nth_unstable_by(mid, |&a, &b| {
                    let a_val = bounds[a].centroid()[axis];
                    let b_val = bounds[b].centroid()[axis];
                    a_val.total_cmp(&b_val)
                });

                let (left, right) = order.split_at_mut(mid);
                BvhNode::interior(Self::build(bounds, left), Self::build(bounds, right))
            }
        }
    }

    /// Number of primitives the tree was built over.
    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.root.as_deref()
    }

    /// Bounds of the whole tree ([`Aabb::EMPTY`] without a root).
    pub fn bounds(&self) -> Aabb {
        self.root.as_ref().map_or(Aabb::EMPTY, |root| *root.bounds())
    }

    /// Find the nearest hit along `ray`.
    ///
    /// `primitives` must be the slice the tree was built from.
    pub fn ray_cast<'a, P: Hittable>(&self, primitives: &'a [P], ray: &Ray) -> Intersection<'a> {
        debug_assert_eq!(primitives.len(), self.primitive_count);

        match &self.root {
            Some(root) => Self::traverse(root, primitives, ray),
            None => Intersection::NONE,
        }
    }

    /// Visits the left subtree, then the right one, whenever a node's box is
    /// hit. The right result only replaces the left one when it is strictly
    /// closer.
    fn traverse<'a, P: Hittable>(node: &BvhNode, primitives: &'a [P], ray: &Ray) -> Intersection<'a> {
        if !node.bounds().hit(ray) {
            return Intersection::NONE;
        }

        match node {
            BvhNode::Leaf { primitive, .. } => primitives[*primitive].ray_cast(ray),
            BvhNode::Interior { left, right, .. } => {
                let hit_left = Self::traverse(left, primitives, ray);
                if !hit_left.happened {
                    return Self::traverse(right, primitives, ray);
                }

                let hit_right = Self::traverse(right, primitives, ray);
                if hit_right.is_closer_than(&hit_left) {
                    hit_right
                } else {
                    hit_left
                }
            }
        }
    }

    /// Count leaves and interior nodes and measure the depth.
    pub fn stats(&self) -> BvhStats {
        fn walk(node: &BvhNode, depth: usize, stats: &mut BvhStats) {
            stats.depth = stats.depth.max(depth);
            match node {
                BvhNode::Leaf { .. } => stats.leaves += 1,
                BvhNode::Interior { left, right, .. } => {
                    stats.interior += 1;
                    walk(left, depth + 1, stats);
                    walk(right, depth + 1, stats);
                }
            }
        }

        let mut stats = BvhStats::default();
        if let Some(root) = &self.root {
            walk(root, 0, &mut stats);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{closest_hit, Color, Material, Primitive, Sphere, Triangle};
    use prism_math::Vec3;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)))
    }

    fn sphere_row(n: usize) -> Vec<Sphere> {
        (0..n)
            .map(|i| Sphere::new(Vec3::new(i as f32, 0.0, -5.0), 0.4, gray()))
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let spheres: Vec<Sphere> = Vec::new();
        let bvh = Bvh::new(&spheres);

        assert!(bvh.is_empty());
        assert_eq!(bvh.stats(), BvhStats::default());
        assert!(bvh.bounds().is_empty());

        let hit = bvh.ray_cast(&spheres, &Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!(!hit.happened);
    }

    #[test]
    fn test_bvh_single_sphere() {
        let spheres = sphere_row(1);
        let bvh = Bvh::new(&spheres);

        // Should create a leaf
        assert!(matches!(bvh.root(), Some(BvhNode::Leaf { primitive: 0, .. })));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = bvh.ray_cast(&spheres, &ray);
        assert!(hit.happened);
        assert!((hit.distance - 4.6).abs() < 1e-4);
    }

    #[test]
    fn test_bvh_two_primitives_keep_order() {
        let spheres = sphere_row(2);
        let bvh = Bvh::new(&spheres);

        let Some(BvhNode::Interior { left, right, bounds }) = bvh.root() else {
            panic!("expected an interior root");
        };
        assert!(matches!(**left, BvhNode::Leaf { primitive: 0, .. }));
        assert!(matches!(**right, BvhNode::Leaf { primitive: 1, .. }));
        assert_eq!(*bounds, Aabb::surrounding(&spheres[0].bounds(), &spheres[1].bounds()));
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let spheres = sphere_row(10);
        let bvh = Bvh::new(&spheres);

        // Test ray that hits sphere at x=5
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = bvh.ray_cast(&spheres, &ray);
        assert!(hit.happened);

        // Hit point should be near z = -4.6 (sphere at z=-5, radius 0.4)
        assert!((hit.coords.z - (-4.6)).abs() < 0.01);
        assert!((hit.coords.x - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_bvh_reports_nearest_of_overlapping() {
        // Sorted so the far sphere lands in the left subtree
        let spheres = vec![
            Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, gray()),
            Sphere::new(Vec3::new(0.1, 0.0, -10.0), 1.0, gray()),
            Sphere::new(Vec3::new(0.2, 0.0, -3.0), 1.0, gray()),
        ];
        let bvh = Bvh::new(&spheres);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = bvh.ray_cast(&spheres, &ray);
        assert!((hit.distance - closest_hit(&spheres, &ray).distance).abs() < 1e-5);
        assert!(hit.distance < 3.0);
    }

    #[test]
    fn test_bvh_node_counts() {
        for n in 1..=33 {
            let spheres = sphere_row(n);
            let stats = Bvh::new(&spheres).stats();

            assert_eq!(stats.leaves, n, "leaves for n={n}");
            assert_eq!(stats.interior, n - 1, "interior nodes for n={n}");
            // ceil(log2(n))
            let expected_depth = n.next_power_of_two().trailing_zeros() as usize;
            assert_eq!(stats.depth, expected_depth, "depth for n={n}");
        }
    }

    #[test]
    fn test_bvh_every_primitive_in_one_leaf() {
        fn collect(node: &BvhNode, out: &mut Vec<usize>) {
            match node {
                BvhNode::Leaf { primitive, .. } => out.push(*primitive),
                BvhNode::Interior { left, right, .. } => {
                    collect(left, out);
                    collect(right, out);
                }
            }
        }

        let spheres = sphere_row(17);
        let bvh = Bvh::new(&spheres);
        let mut found = Vec::new();
        collect(bvh.root().unwrap(), &mut found);
        found.sort_unstable();
        assert_eq!(found, (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn test_interior_bounds_contain_children() {
        fn check(node: &BvhNode) {
            if let BvhNode::Interior { bounds, left, right } = node {
                assert!(bounds.contains(left.bounds()));
                assert!(bounds.contains(right.bounds()));
                check(left);
                check(right);
            }
        }

        let spheres: Vec<Sphere> = (0..20)
            .map(|i| {
                let f = i as f32;
                Sphere::new(Vec3::new(f.sin() * 5.0, f.cos() * 3.0, -f), 0.3 + 0.05 * f, gray())
            })
            .collect();
        check(Bvh::new(&spheres).root().unwrap());
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let spheres = sphere_row(12);
        let bvh = Bvh::new(&spheres);
        let ray = Ray::new(Vec3::new(3.2, 0.1, 2.0), Vec3::new(0.05, 0.0, -1.0));

        let first = bvh.ray_cast(&spheres, &ray);
        for _ in 0..10 {
            let again = bvh.ray_cast(&spheres, &ray);
            assert_eq!(again.happened, first.happened);
            assert_eq!(again.distance.to_bits(), first.distance.to_bits());
            assert_eq!(again.coords, first.coords);
        }
    }

    fn coord() -> impl Strategy<Value = f32> {
        -10.0f32..10.0
    }

    fn vec3() -> impl Strategy<Value = Vec3> {
        (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    fn primitive() -> impl Strategy<Value = Primitive> {
        prop_oneof![
            (vec3(), 0.1f32..2.0).prop_map(|(c, r)| Primitive::from(Sphere::new(c, r, gray()))),
            (vec3(), vec3(), vec3())
                .prop_map(|(a, b, c)| Primitive::from(Triangle::from_positions(a, b, c, gray()))),
        ]
    }

    proptest! {
        #[test]
        fn bvh_matches_linear_scan(
            primitives in prop::collection::vec(primitive(), 0..40),
            rays in prop::collection::vec((vec3(), vec3()), 1..20),
        ) {
            let bvh = Bvh::new(&primitives);

            for (origin, direction) in rays {
                prop_assume!(direction.length_squared() > 1e-4);
                let ray = Ray::new(origin * 2.0, direction.normalize());

                let fast = bvh.ray_cast(&primitives, &ray);
                let slow = closest_hit(&primitives, &ray);

                prop_assert_eq!(fast.happened, slow.happened);
                if slow.happened {
                    prop_assert!(
                        (fast.distance - slow.distance).abs() <= 1e-4 * slow.distance.max(1.0),
                        "bvh {} vs linear {}",
                        fast.distance,
                        slow.distance
                    );
                }
            }
        }
    }
}
