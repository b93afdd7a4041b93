use log::{info, warn};

use crate::{
    acceleration::{BvhNode, MAX_LEAF_SIZE},
    error::Result,
    material::Material,
    math::{Ray, Vector3, VECTOR_MAX, VECTOR_MIN},
};

use super::Triangle;

/// A triangle mesh with an owned BVH over its triangles.
///
/// The triangle list and the BVH are private so they cannot drift apart:
/// every mutation rebuilds the BVH before returning, which means the
/// acceleration structure is always complete by the time a render can
/// observe it.
#[derive(Debug, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    bvh: Option<BvhNode>,
}

impl Mesh {
    /// Instantiate a new Mesh over a list of triangles, building its BVH.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let mut mesh = Self {
            triangles,
            bvh: None,
        };
        mesh.rebuild_bvh();
        mesh
    }

    /// Load a mesh from a Wavefront OBJ file, triangulating as needed.
    ///
    /// Degenerate (zero-area) faces are skipped with a warning rather than
    /// failing the load; a model that only partially parses still renders.
    pub fn from_obj(file_name: &str, material: Material) -> Result<Self> {
        let (models, _) = tobj::load_obj(
            file_name,
            &tobj::LoadOptions {
                triangulate: true,
                ..Default::default()
            },
        )?;

        let mut triangles = Vec::new();
        let mut skipped = 0usize;

        for model in models {
            let mesh = model.mesh;

            let verts = mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64))
                .collect::<Vec<_>>();

            for face in mesh.indices.chunks_exact(3) {
                let (v0, v1, v2) = (
                    verts[face[0] as usize],
                    verts[face[1] as usize],
                    verts[face[2] as usize],
                );
                match Triangle::new(v0, v1, v2, material) {
                    Ok(triangle) => triangles.push(triangle),
                    Err(_) => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            warn!("skipped {} degenerate faces in {}", skipped, file_name);
        }
        info!("loaded {} triangles from {}", triangles.len(), file_name);

        Ok(Self::new(triangles))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Shift all triangles by some vector.
    pub fn shift(&mut self, delta: Vector3) {
        for triangle in self.triangles.iter_mut() {
            triangle.translate(delta);
        }
        self.rebuild_bvh();
    }

    /// Scale all triangles about the origin.
    pub fn scale(&mut self, factor: f64) {
        assert!(factor != 0., "scale factor must be nonzero");
        for triangle in self.triangles.iter_mut() {
            triangle.scale(factor);
        }
        self.rebuild_bvh();
    }

    /// Shift the mesh so its bounding box is centered on the origin.
    pub fn center(&mut self) {
        if self.triangles.is_empty() {
            return;
        }

        let mut min = VECTOR_MAX;
        let mut max = VECTOR_MIN;
        for triangle in self.triangles.iter() {
            for &v in &[triangle.v0, triangle.v1, triangle.v2] {
                min.x = min.x.min(v.x);
                min.y = min.y.min(v.y);
                min.z = min.z.min(v.z);
                max.x = max.x.max(v.x);
                max.y = max.y.max(v.y);
                max.z = max.z.max(v.z);
            }
        }

        self.shift((min + max) * -0.5);
    }

    /// Find the nearest triangle hit within `(t_min, t_max)` by walking the
    /// BVH. Returns the triangle's index and its parametric distance.
    pub fn intersect(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<(usize, f64)> {
        let bvh = self.bvh.as_ref()?;
        bvh.intersect(&self.triangles, ray, t_min, t_max)
    }

    // An empty mesh has no BVH and intersects nothing.
    fn rebuild_bvh(&mut self) {
        self.bvh = if self.triangles.is_empty() {
            None
        } else {
            let indices = (0..self.triangles.len()).collect();
            Some(BvhNode::build(&self.triangles, indices, MAX_LEAF_SIZE))
        };
    }
}
