use nalgebra::{Point3, Vector2, Vector3};

use crate::{
    misc::FloatingPoint,
    surface::NurbsSurface3D,
    tessellation::{RegularTessellationOptions, Tessellation},
};

/// Surface tessellation representation
/// This struct is used to create a mesh data from surface
#[derive(Clone, Debug)]
pub struct SurfaceTessellation<T: FloatingPoint> {
    pub(crate) points: Vec<Point3<T>>,
    pub(crate) normals: Vec<Vector3<T>>,
    pub(crate) faces: Vec<[usize; 3]>,
    pub(crate) uvs: Vec<Vector2<T>>,
    /// number of grid samples along u and v
    pub(crate) grid: (usize, usize),
}

impl<T: FloatingPoint> SurfaceTessellation<T> {
    /// Triangulate a surface sampled on the given parameter grid
    /// vertices are stored row by row (constant u), each cell yields two triangles
    pub fn new(surface: &NurbsSurface3D<T>, us: &[T], vs: &[T]) -> Self {
        let nu = us.len();
        let nv = vs.len();

        let mut points = Vec::with_capacity(nu * nv);
        let mut normals = Vec::with_capacity(nu * nv);
        let mut uvs = Vec::with_capacity(nu * nv);
        for u in us {
            for v in vs {
                points.push(surface.point_at(*u, *v));
                normals.push(surface.normal_at(*u, *v));
                uvs.push(Vector2::new(*u, *v));
            }
        }

        let mut faces = Vec::with_capacity(nu.saturating_sub(1) * nv.saturating_sub(1) * 2);
        for i in 0..nu.saturating_sub(1) {
            for j in 0..nv.saturating_sub(1) {
                let a = i * nv + j;
                let b = a + nv;
                let c = b + 1;
                let d = a + 1;
                faces.push([a, b, c]);
                faces.push([a, c, d]);
            }
        }

        Self {
            points,
            normals,
            faces,
            uvs,
            grid: (nu, nv),
        }
    }

    pub fn points(&self) -> &Vec<Point3<T>> {
        &self.points
    }

    pub fn normals(&self) -> &Vec<Vector3<T>> {
        &self.normals
    }

    pub fn uvs(&self) -> &Vec<Vector2<T>> {
        &self.uvs
    }

    pub fn faces(&self) -> &Vec<[usize; 3]> {
        &self.faces
    }

    pub fn grid(&self) -> (usize, usize) {
        self.grid
    }

    /// Normal of a triangle from its vertex positions
    /// falls back to the averaged vertex normals when the triangle is degenerate
    pub fn face_normal(&self, face: &[usize; 3]) -> Vector3<T> {
        let [a, b, c] = face.map(|i| &self.points[i]);
        let n = (b - a).cross(&(c - a));
        n.try_normalize(T::default_epsilon()).unwrap_or_else(|| {
            let sum = face
                .iter()
                .fold(Vector3::zeros(), |acc, i| acc + self.normals[*i]);
            sum.try_normalize(T::default_epsilon())
                .unwrap_or_else(Vector3::zeros)
        })
    }
}

impl<T: FloatingPoint> Tessellation<RegularTessellationOptions<T>> for NurbsSurface3D<T> {
    type Output = anyhow::Result<SurfaceTessellation<T>>;

    /// Tessellate the surface on a regular grid given by the evaluation deltas
    fn tessellate(&self, options: RegularTessellationOptions<T>) -> Self::Output {
        let (us, vs) = self.regular_parameters(options.delta_u, options.delta_v)?;
        Ok(SurfaceTessellation::new(self, &us, &vs))
    }
}
