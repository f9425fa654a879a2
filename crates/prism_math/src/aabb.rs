use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Defined by its minimum and maximum corners. Every box built from points
/// satisfies `min <= max` componentwise; the only exception is
/// [`Aabb::EMPTY`], whose inverted infinite corners make it the identity of
/// [`Aabb::surrounding`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The box containing nothing. Merging it with any box yields that box.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create an AABB from two corner points, in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a zero-volume AABB around a single point.
    pub fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Create the smallest AABB containing all of the given points.
    ///
    /// Returns [`Aabb::EMPTY`] for an empty iterator.
    pub fn from_iter_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding_point(&acc, p))
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Extend a box so that it also contains `p`.
    pub fn surrounding_point(b: &Aabb, p: Vec3) -> Self {
        Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }
    }

    /// Returns true for a box that contains no points at all.
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Returns true if `p` lies inside or on the surface of the box.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Returns true if `other` lies entirely within this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        other.is_empty() || (self.contains_point(other.min) && self.contains_point(other.max))
    }

    /// Extent of the box along each axis.
    pub fn diagonal(&self) -> Vec3 {
        self.max - self.min
    }

    /// Test if a ray intersects this AABB anywhere along `t >= 0`.
    ///
    /// Slab method: the entry/exit interval is narrowed one axis at a time
    /// and the test bails out as soon as it is empty or entirely behind the
    /// origin. Only a yes/no answer is produced.
    pub fn hit(&self, r: &Ray) -> bool {
        let origin = r.origin();
        let inv = r.inv_direction();
        let mut ray_t = Interval::UNIVERSE;

        for axis in 0..3 {
            let adinv = inv[axis];
            let mut t0 = (self.min[axis] - origin[axis]) * adinv;
            let mut t1 = (self.max[axis] - origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t = ray_t.intersect(t0, t1);
            if ray_t.max < 0.0 || ray_t.min > ray_t.max {
                return false;
            }
        }

        true
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    ///
    /// Ties prefer X only when it is strictly longest, otherwise Y over Z
    /// only when Y is strictly longer.
    pub fn longest_axis(&self) -> usize {
        let d = self.diagonal();

        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        0.5 * self.min + 0.5 * self.max
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min, Vec3::ZERO);
        assert_eq!(surrounding.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_surrounding_point() {
        let grown = Aabb::surrounding_point(&unit_box(), Vec3::new(3.0, 0.0, -2.0));

        assert_eq!(grown.min, Vec3::new(-1.0, -1.0, -2.0));
        assert_eq!(grown.max, Vec3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_is_merge_identity() {
        let b = Aabb::from_points(Vec3::new(2.0, 3.0, 4.0), Vec3::new(5.0, 6.0, 7.0));

        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &b), b);
        assert_eq!(Aabb::surrounding(&b, &Aabb::EMPTY), b);
        assert_eq!(Aabb::default(), Aabb::EMPTY);
        assert!(Aabb::EMPTY.is_empty());
    }

    #[test]
    fn test_zeroed_box_is_not_an_identity() {
        // An all-zero box drags the merge result towards the origin
        let zeroed = Aabb::from_point(Vec3::ZERO);
        let b = Aabb::from_points(Vec3::new(2.0, 3.0, 4.0), Vec3::new(5.0, 6.0, 7.0));

        assert_ne!(Aabb::surrounding(&zeroed, &b), b);
    }

    #[test]
    fn test_merge_over_nothing_stays_empty() {
        let merged = Aabb::from_iter_points(std::iter::empty());
        assert!(merged.is_empty());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, 1.0));
        assert!(!merged.hit(&ray));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_hit_flat_box() {
        // Triangles lying in a coordinate plane produce zero-thickness boxes.
        let flat = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));

        let ray = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(flat.hit(&ray));

        let ray = Ray::new(Vec3::new(2.0, 0.2, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!flat.hit(&ray));
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(aabb.centroid(), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_aabb_longest_axis() {
        let aabb_x = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(aabb_x.longest_axis(), 0);

        let aabb_y = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0));
        assert_eq!(aabb_y.longest_axis(), 1);

        let aabb_z = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0));
        assert_eq!(aabb_z.longest_axis(), 2);
    }

    #[test]
    fn test_aabb_longest_axis_ties() {
        let cube = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        assert_eq!(cube.longest_axis(), 2);

        let xy = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(xy.longest_axis(), 1);
    }

    fn point() -> impl Strategy<Value = Vec3> {
        (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    fn aabb() -> impl Strategy<Value = Aabb> {
        (point(), point()).prop_map(|(a, b)| Aabb::from_points(a, b))
    }

    proptest! {
        #[test]
        fn merge_is_commutative_and_contains_both(a in aabb(), b in aabb()) {
            let ab = Aabb::surrounding(&a, &b);
            prop_assert_eq!(ab, Aabb::surrounding(&b, &a));
            prop_assert!(ab.contains(&a));
            prop_assert!(ab.contains(&b));
        }

        #[test]
        fn ray_from_inside_always_hits(
            b in aabb(),
            s in (0.01f32..0.99, 0.01f32..0.99, 0.01f32..0.99),
            d in point(),
        ) {
            prop_assume!(d.length_squared() > 1e-6);
            let origin = b.min + Vec3::new(s.0, s.1, s.2) * b.diagonal();
            prop_assert!(b.hit(&Ray::new(origin, d)));
        }
    }
}
