use itertools::Itertools;
use nalgebra::{
    allocator::Allocator, Const, DefaultAllocator, DimName, DimNameDiff, DimNameSub, OPoint,
    OVector, Vector3, U1,
};

use crate::{
    knot::KnotVector,
    misc::{dehomogenize, grid_sample_size, homogenize, split_weight, Binomial, FloatingPoint},
};

/// NURBS surface representation
/// by generics, it can be used for 2D or 3D surfaces with f32 or f64 scalar types
#[derive(Clone, Debug)]
pub struct NurbsSurface<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    /// control points with homogeneous coordinates, indexed as `[u][v]`
    /// the last element of each point is the `weight`
    control_points: Vec<Vec<OPoint<T, D>>>,
    u_degree: usize,
    v_degree: usize,
    u_knots: KnotVector<T>,
    v_knots: KnotVector<T>,
}

/// 2D NURBS surface alias
pub type NurbsSurface2D<T> = NurbsSurface<T, Const<3>>;
/// 3D NURBS surface alias
pub type NurbsSurface3D<T> = NurbsSurface<T, Const<4>>;

impl<T: FloatingPoint, D: DimName> NurbsSurface<T, D>
where
    DefaultAllocator: Allocator<D>,
    D: DimNameSub<U1>,
    DefaultAllocator: Allocator<DimNameDiff<D, U1>>,
{
    /// Create a new NURBS surface from a grid of homogeneous control points
    /// # Failures
    /// - if either degree is zero
    /// - if the control point grid is ragged or too small for the degrees
    /// - if a knot vector does not fit its direction
    /// - if a control point has a non-positive weight
    pub fn try_new(
        u_degree: usize,
        v_degree: usize,
        u_knots: Vec<T>,
        v_knots: Vec<T>,
        control_points: Vec<Vec<OPoint<T, D>>>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            u_degree > 0 && v_degree > 0,
            "Surface degrees must be greater than zero"
        );
        let size_u = control_points.len();
        let size_v = control_points.first().map(|row| row.len()).unwrap_or(0);
        anyhow::ensure!(
            control_points.iter().all(|row| row.len() == size_v),
            "Control point grid must be rectangular"
        );
        anyhow::ensure!(
            size_u > u_degree && size_v > v_degree,
            "Too few control points for surface, got {}x{}, expected at least {}x{}",
            size_u,
            size_v,
            u_degree + 1,
            v_degree + 1
        );
        anyhow::ensure!(
            control_points
                .iter()
                .flatten()
                .all(|p| p[D::dim() - 1] > T::zero()),
            "Control point weights must be positive"
        );

        let u_knots = KnotVector::new(u_knots);
        let v_knots = KnotVector::new(v_knots);
        u_knots
            .validate(u_degree, size_u)
            .map_err(|e| e.context("Invalid knot vector in u direction"))?;
        v_knots
            .validate(v_degree, size_v)
            .map_err(|e| e.context("Invalid knot vector in v direction"))?;

        Ok(Self {
            control_points,
            u_degree,
            v_degree,
            u_knots,
            v_knots,
        })
    }

    /// Create a NURBS surface from a flat list of cartesian control points
    /// the points are ordered with v varying fastest, i.e. `points[u * size_v + v]`
    #[allow(clippy::too_many_arguments)]
    pub fn try_from_weighted(
        u_degree: usize,
        v_degree: usize,
        size_u: usize,
        size_v: usize,
        points: &[OPoint<T, DimNameDiff<D, U1>>],
        weights: &[T],
        u_knots: KnotVector<T>,
        v_knots: KnotVector<T>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            size_u.checked_mul(size_v) == Some(points.len()),
            "Number of control points ({}) does not match size_u x size_v ({} x {})",
            points.len(),
            size_u,
            size_v
        );
        anyhow::ensure!(
            points.len() == weights.len(),
            "Number of weights ({}) does not match the number of control points ({})",
            weights.len(),
            points.len()
        );
        anyhow::ensure!(size_v > 0, "Surface needs control points in v direction");

        let homogeneous = points
            .iter()
            .zip(weights.iter())
            .map(|(p, w)| homogenize(p, *w))
            .collect_vec();
        let control_points = homogeneous
            .chunks(size_v)
            .map(|row| row.to_vec())
            .collect_vec();

        Self::try_new(
            u_degree,
            v_degree,
            u_knots.to_vec(),
            v_knots.to_vec(),
            control_points,
        )
    }

    pub fn u_degree(&self) -> usize {
        self.u_degree
    }

    pub fn v_degree(&self) -> usize {
        self.v_degree
    }

    pub fn u_knots(&self) -> &KnotVector<T> {
        &self.u_knots
    }

    pub fn v_knots(&self) -> &KnotVector<T> {
        &self.v_knots
    }

    pub fn control_points(&self) -> &Vec<Vec<OPoint<T, D>>> {
        &self.control_points
    }

    /// Get the u domain of the knot vector by degree
    pub fn u_knots_domain(&self) -> (T, T) {
        self.u_knots.domain(self.u_degree)
    }

    /// Get the v domain of the knot vector by degree
    pub fn v_knots_domain(&self) -> (T, T) {
        self.v_knots.domain(self.v_degree)
    }

    /// Return the dehomogenized control point grid
    pub fn dehomogenized_control_points(&self) -> Vec<Vec<OPoint<T, DimNameDiff<D, U1>>>> {
        self.control_points
            .iter()
            .map(|row| row.iter().filter_map(dehomogenize).collect())
            .collect()
    }

    /// Evaluate the surface at the given u, v parameters to get a point
    pub fn point_at(&self, u: T, v: T) -> OPoint<T, DimNameDiff<D, U1>> {
        let p = self.point(u, v);
        dehomogenize(&p).unwrap_or_else(OPoint::origin)
    }

    /// Evaluate the surface at the given u, v parameters to get a homogeneous point
    pub fn point(&self, u: T, v: T) -> OPoint<T, D> {
        let n = self.u_knots.len() - self.u_degree - 2;
        let m = self.v_knots.len() - self.v_degree - 2;

        let span_u = self.u_knots.find_knot_span_index(n, self.u_degree, u);
        let span_v = self.v_knots.find_knot_span_index(m, self.v_degree, v);
        let basis_u = self.u_knots.basis_functions(span_u, u, self.u_degree);
        let basis_v = self.v_knots.basis_functions(span_v, v, self.v_degree);
        let uind = span_u - self.u_degree;

        let mut position = OPoint::<T, D>::origin();
        for (l, bv) in basis_v.iter().enumerate() {
            let vind = span_v - self.v_degree + l;

            // sample u isoline
            let mut temp = OVector::<T, D>::zeros();
            for (k, bu) in basis_u.iter().enumerate() {
                temp += &self.control_points[uind + k][vind].coords * *bu;
            }

            position.coords += temp * *bv;
        }

        position
    }

    /// Evaluate the surface on a regular grid over its domain
    /// returns rows of constant u, each row holds points along v
    pub fn evaluate(
        &self,
        delta_u: T,
        delta_v: T,
    ) -> anyhow::Result<Vec<Vec<OPoint<T, DimNameDiff<D, U1>>>>> {
        let (us, vs) = self.regular_parameters(delta_u, delta_v)?;
        Ok(us
            .iter()
            .map(|u| vs.iter().map(|v| self.point_at(*u, *v)).collect())
            .collect())
    }

    /// Regularly spaced parameters in u and v for the given evaluation deltas
    pub fn regular_parameters(&self, delta_u: T, delta_v: T) -> anyhow::Result<(Vec<T>, Vec<T>)> {
        let (nu, nv) = grid_sample_size(delta_u, delta_v)?;
        let us = self.u_knots.regularly_spaced_parameters(self.u_degree, nu);
        let vs = self.v_knots.regularly_spaced_parameters(self.v_degree, nv);
        Ok((us, vs))
    }

    /// Evaluate the cartesian partial derivatives `S_(k,l)` with `k + l <= derivs`
    pub fn rational_derivatives(
        &self,
        u: T,
        v: T,
        derivs: usize,
    ) -> Vec<Vec<OVector<T, DimNameDiff<D, U1>>>> {
        let ders = self.derivatives(u, v, derivs);
        let binom = Binomial::<T>::new(derivs);

        let (a, w): (Vec<Vec<_>>, Vec<Vec<_>>) = ders
            .iter()
            .map(|row| -> (Vec<_>, Vec<_>) { row.iter().map(split_weight).unzip() })
            .unzip();

        let mut skl: Vec<Vec<OVector<T, DimNameDiff<D, U1>>>> = vec![];
        for k in 0..=derivs {
            let mut row: Vec<OVector<T, DimNameDiff<D, U1>>> = vec![];
            for l in 0..=(derivs - k) {
                let mut value = a[k][l].clone();
                for j in 1..=l {
                    value -= &row[l - j] * (binom.get(l, j) * w[0][j]);
                }
                for i in 1..=k {
                    value -= &skl[k - i][l] * (binom.get(k, i) * w[i][0]);
                    let mut inner = OVector::<T, DimNameDiff<D, U1>>::zeros();
                    for j in 1..=l {
                        inner += &skl[k - i][l - j] * (binom.get(l, j) * w[i][j]);
                    }
                    value -= inner * binom.get(k, i);
                }
                row.push(value / w[0][0]);
            }
            skl.push(row);
        }

        skl
    }

    /// Evaluate the homogeneous partial derivatives at the given u, v parameters
    /// the result is indexed `[k][l]` for `k + l <= derivs`, missing orders are zero
    fn derivatives(&self, u: T, v: T, derivs: usize) -> Vec<Vec<OVector<T, D>>> {
        let n = self.u_knots.len() - self.u_degree - 2;
        let m = self.v_knots.len() - self.v_degree - 2;
        let du = derivs.min(self.u_degree);
        let dv = derivs.min(self.v_degree);

        let mut skl = vec![vec![OVector::<T, D>::zeros(); derivs + 1]; derivs + 1];
        let span_u = self.u_knots.find_knot_span_index(n, self.u_degree, u);
        let span_v = self.v_knots.find_knot_span_index(m, self.v_degree, v);
        let uders = self
            .u_knots
            .derivative_basis_functions(span_u, u, self.u_degree, du);
        let vders = self
            .v_knots
            .derivative_basis_functions(span_v, v, self.v_degree, dv);

        for k in 0..=du {
            let temp = (0..=self.v_degree)
                .map(|s| {
                    let mut acc = OVector::<T, D>::zeros();
                    for r in 0..=self.u_degree {
                        acc += &self.control_points[span_u - self.u_degree + r]
                            [span_v - self.v_degree + s]
                            .coords
                            * uders[k][r];
                    }
                    acc
                })
                .collect_vec();

            let dd = (derivs - k).min(dv);
            for l in 0..=dd {
                let mut acc = OVector::<T, D>::zeros();
                for (s, t) in temp.iter().enumerate() {
                    acc += t * vders[l][s];
                }
                skl[k][l] = acc;
            }
        }

        skl
    }
}

impl<T: FloatingPoint> NurbsSurface3D<T> {
    /// Evaluate the unit normal at the given u, v parameters
    /// degenerate points (e.g. a collapsed edge) yield a zero vector
    pub fn normal_at(&self, u: T, v: T) -> Vector3<T> {
        let deriv = self.rational_derivatives(u, v, 1);
        let n = deriv[1][0].cross(&deriv[0][1]);
        n.try_normalize(T::default_epsilon())
            .unwrap_or_else(Vector3::zeros)
    }
}
