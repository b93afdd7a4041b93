use std::cmp::Ordering;

use log::debug;

use crate::{
    math::{Axis, Ray, Vector3, VECTOR_MAX, VECTOR_MIN},
    object::Triangle,
};

/// The largest number of triangles a BVH leaf will hold.
pub const MAX_LEAF_SIZE: usize = 8;

/// A direction component this small counts as parallel to a slab, so the
/// ray can only pass if its origin already sits inside that slab.
const SLAB_EPSILON: f64 = 1e-12;

/// An axis-aligned bounding box, stored by its minimum and maximum corners.
#[derive(Debug, Clone)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    /// The exact bounding box of a set of triangles, addressed by index.
    pub fn around(triangles: &[Triangle], indices: &[usize]) -> Self {
        let mut min = VECTOR_MAX;
        let mut max = VECTOR_MIN;

        for &i in indices {
            let triangle = &triangles[i];
            for &v in &[triangle.v0, triangle.v1, triangle.v2] {
                min.x = min.x.min(v.x);
                min.y = min.y.min(v.y);
                min.z = min.z.min(v.z);
                max.x = max.x.max(v.x);
                max.y = max.y.max(v.y);
                max.z = max.z.max(v.z);
            }
        }

        Self { min, max }
    }

    /// The box enclosing this box and another.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        self.max.axis(axis) - self.min.axis(axis)
    }

    /// The axis along which this box is widest.
    pub fn longest_axis(&self) -> Axis {
        let (ex, ey, ez) = (
            self.extent(Axis::X),
            self.extent(Axis::Y),
            self.extent(Axis::Z),
        );
        if ex >= ey && ex >= ez {
            Axis::X
        } else if ey >= ez {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Slab-test the ray against this box over the running interval
    /// `[t_min, t_max]`, shrinking the interval axis by axis and rejecting
    /// as soon as it empties.
    pub fn intersect(&self, ray: &Ray, mut t_min: f64, mut t_max: f64) -> bool {
        for &axis in &[Axis::X, Axis::Y, Axis::Z] {
            let o = ray.origin.axis(axis);
            let d = ray.direction.axis(axis);
            let (min, max) = (self.min.axis(axis), self.max.axis(axis));

            if d.abs() < SLAB_EPSILON {
                if o < min || o > max {
                    return false;
                }
                continue;
            }

            let inv = 1. / d;
            let mut t0 = (min - o) * inv;
            let mut t1 = (max - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return false;
            }
        }

        true
    }
}

/// A node of a bounding volume hierarchy over a mesh's triangles.
///
/// Leaves hold indices into the mesh's triangle list; branches exclusively
/// own their two children, whose boxes their own box encloses. The tree is
/// built once and never mutated afterward.
#[derive(Debug)]
pub enum BvhNode {
    Leaf {
        bounds: Aabb,
        triangles: Vec<usize>,
    },
    Branch {
        bounds: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    /// Build a BVH over `indices` by median split: leaves at or below
    /// `max_leaf_size`, and otherwise a sort of the triangles by centroid
    /// along the box's longest axis, split at the median.
    ///
    /// `indices` must be non-empty.
    pub fn build(triangles: &[Triangle], indices: Vec<usize>, max_leaf_size: usize) -> Self {
        debug_assert!(!indices.is_empty());
        let node = Self::build_node(triangles, indices, max_leaf_size.max(1));
        debug!(
            "built bvh over {} triangles ({} nodes)",
            triangles.len(),
            node.node_count()
        );
        node
    }

    fn build_node(triangles: &[Triangle], mut indices: Vec<usize>, max_leaf_size: usize) -> Self {
        let bounds = Aabb::around(triangles, &indices);
        if indices.len() <= max_leaf_size {
            return BvhNode::Leaf {
                bounds,
                triangles: indices,
            };
        }

        let axis = bounds.longest_axis();
        indices.sort_unstable_by(|&a, &b| {
            triangles[a]
                .centroid()
                .axis(axis)
                .partial_cmp(&triangles[b].centroid().axis(axis))
                .unwrap_or(Ordering::Equal)
        });

        let upper = indices.split_off(indices.len() / 2);
        let left = Box::new(Self::build_node(triangles, indices, max_leaf_size));
        let right = Box::new(Self::build_node(triangles, upper, max_leaf_size));
        let bounds = left.bounds().union(right.bounds());

        BvhNode::Branch {
            bounds,
            left,
            right,
        }
    }

    pub fn bounds(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { bounds, .. } => bounds,
            BvhNode::Branch { bounds, .. } => bounds,
        }
    }

    fn node_count(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Find the nearest triangle hit within `(t_min, t_max)` under this
    /// node. Rays that miss the node's box are rejected wholesale; leaves
    /// test every triangle they hold; branches take the nearer of their
    /// two children's results.
    pub fn intersect(
        &self,
        triangles: &[Triangle],
        ray: &Ray,
        t_min: f64,
        t_max: f64,
    ) -> Option<(usize, f64)> {
        if !self.bounds().intersect(ray, t_min, t_max) {
            return None;
        }

        match self {
            BvhNode::Leaf {
                triangles: indices, ..
            } => {
                let mut nearest: Option<(usize, f64)> = None;
                for &i in indices {
                    let t = triangles[i].intersect(ray);
                    if t_min < t && t < t_max && nearest.map_or(true, |(_, best)| t < best) {
                        nearest = Some((i, t));
                    }
                }
                nearest
            }
            BvhNode::Branch { left, right, .. } => {
                let lhs = left.intersect(triangles, ray, t_min, t_max);
                let rhs = right.intersect(triangles, ray, t_min, t_max);
                match (lhs, rhs) {
                    (Some(l), Some(r)) => Some(if l.1 <= r.1 { l } else { r }),
                    (Some(l), None) => Some(l),
                    (None, rhs) => rhs,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::material::Material;

    use super::*;

    fn unit_box() -> Aabb {
        Aabb {
            min: Vector3::new(-1., -1., -1.),
            max: Vector3::new(1., 1., 1.),
        }
    }

    #[test]
    fn slab_test_accepts_and_rejects() {
        let aabb = unit_box();
        let toward = Ray::new(Vector3::new(0., 0., -5.), Vector3::new(0., 0., 1.));
        let away = Ray::new(Vector3::new(0., 0., -5.), Vector3::new(0., 0., -1.));
        let offset = Ray::new(Vector3::new(0., 3., -5.), Vector3::new(0., 0., 1.));

        assert!(aabb.intersect(&toward, 0., f64::INFINITY));
        assert!(!aabb.intersect(&away, 0., f64::INFINITY));
        assert!(!aabb.intersect(&offset, 0., f64::INFINITY));
    }

    #[test]
    fn slab_test_honors_the_running_interval() {
        let aabb = unit_box();
        let ray = Ray::new(Vector3::new(0., 0., -5.), Vector3::new(0., 0., 1.));

        // the box spans t in [4, 6] along this ray
        assert!(aabb.intersect(&ray, 0., 4.5));
        assert!(!aabb.intersect(&ray, 0., 3.9));
        assert!(!aabb.intersect(&ray, 6.1, f64::INFINITY));
    }

    #[test]
    fn axis_parallel_rays_need_an_origin_inside_the_slab() {
        let aabb = unit_box();
        let inside = Ray::new(Vector3::new(0.5, 0.5, -5.), Vector3::new(0., 0., 1.));
        let outside = Ray::new(Vector3::new(2., 0.5, -5.), Vector3::new(0., 0., 1.));

        assert!(aabb.intersect(&inside, 0., f64::INFINITY));
        assert!(!aabb.intersect(&outside, 0., f64::INFINITY));
    }

    fn random_triangles(rng: &mut StdRng, count: usize) -> Vec<Triangle> {
        let mut point = |rng: &mut StdRng| {
            Vector3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            )
        };

        let mut triangles = Vec::with_capacity(count);
        while triangles.len() < count {
            let (a, b, c) = (point(rng), point(rng), point(rng));
            if let Ok(triangle) = Triangle::new(a, b, c, Material::default()) {
                triangles.push(triangle);
            }
        }
        triangles
    }

    fn brute_force(
        triangles: &[Triangle],
        ray: &Ray,
        t_min: f64,
        t_max: f64,
    ) -> Option<(usize, f64)> {
        let mut nearest: Option<(usize, f64)> = None;
        for (i, triangle) in triangles.iter().enumerate() {
            let t = triangle.intersect(ray);
            if t_min < t && t < t_max && nearest.map_or(true, |(_, best)| t < best) {
                nearest = Some((i, t));
            }
        }
        nearest
    }

    #[test]
    fn bvh_traversal_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);

        for round in 0..8 {
            let triangles = random_triangles(&mut rng, 50 + round * 25);
            let indices = (0..triangles.len()).collect();
            let bvh = BvhNode::build(&triangles, indices, MAX_LEAF_SIZE);

            for _ in 0..200 {
                let origin = Vector3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );
                let direction = Vector3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
                if direction.magnitude() == 0. {
                    continue;
                }
                let ray = Ray::new(origin, direction);

                let expected = brute_force(&triangles, &ray, 0., f64::INFINITY);
                let found = bvh.intersect(&triangles, &ray, 0., f64::INFINITY);

                match (expected, found) {
                    (None, None) => {}
                    (Some((ei, et)), Some((fi, ft))) => {
                        assert_eq!(ei, fi);
                        assert_relative_eq!(et, ft, epsilon = 1e-9);
                    }
                    (expected, found) => {
                        panic!("bvh disagreed with brute force: {:?} vs {:?}", expected, found)
                    }
                }
            }
        }
    }

    #[test]
    fn single_triangle_builds_a_leaf() {
        let triangles = random_triangles(&mut StdRng::seed_from_u64(3), 1);
        let bvh = BvhNode::build(&triangles, vec![0], MAX_LEAF_SIZE);
        assert!(matches!(bvh, BvhNode::Leaf { .. }));
    }
}
