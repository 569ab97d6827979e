use nalgebra::allocator::Allocator;
use nalgebra::{Const, DefaultAllocator, DimName, DimNameDiff, DimNameSub, OPoint, OVector, U1};

use crate::knot::KnotVector;
use crate::misc::{
    dehomogenize, homogenize, sample_size, split_weight, Binomial, FloatingPoint,
};

/// NURBS curve representation
/// By generics, it can be used for 2D or 3D curves with f32 or f64 scalar types
#[derive(Clone, Debug)]
pub struct NurbsCurve<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    /// control points with homogeneous coordinates
    /// the last element of the vector is the `weight`
    control_points: Vec<OPoint<T, D>>,
    degree: usize,
    /// the length of the knot vector is equal to the `# of control points + degree + 1`
    knots: KnotVector<T>,
}

/// 2D NURBS curve alias
pub type NurbsCurve2D<T> = NurbsCurve<T, Const<3>>;

/// 3D NURBS curve alias
pub type NurbsCurve3D<T> = NurbsCurve<T, Const<4>>;

impl<T: FloatingPoint, D: DimName> NurbsCurve<T, D>
where
    D: DimNameSub<U1>,
    DefaultAllocator: Allocator<D>,
    DefaultAllocator: Allocator<DimNameDiff<D, U1>>,
{
    /// Create a new NURBS curve from homogeneous control points
    /// # Failures
    /// - if the degree is zero
    /// - if the number of control points is not greater than the degree
    /// - if the knot vector does not fit the degree and control points
    /// - if a control point has a non-positive weight
    ///
    /// # Example
    /// ```
    /// use geomdl_cli::prelude::*;
    /// use nalgebra::Point3;
    ///
    /// let control_points: Vec<Point3<f64>> = vec![
    ///     Point3::new(0., 0., 1.),
    ///     Point3::new(1., 2., 1.),
    ///     Point3::new(3., 2., 1.),
    ///     Point3::new(4., 0., 1.),
    /// ];
    /// let knots = vec![0., 0., 0., 0., 1., 1., 1., 1.];
    /// let curve = NurbsCurve2D::try_new(3, control_points, knots);
    /// assert!(curve.is_ok());
    /// ```
    pub fn try_new(
        degree: usize,
        control_points: Vec<OPoint<T, D>>,
        knots: Vec<T>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(degree > 0, "Curve degree must be greater than zero");
        anyhow::ensure!(
            control_points.len() > degree,
            "Too few control points for curve, got {}, expected at least {}",
            control_points.len(),
            degree + 1
        );
        anyhow::ensure!(
            control_points.iter().all(|p| p[D::dim() - 1] > T::zero()),
            "Control point weights must be positive"
        );

        let knots = KnotVector::new(knots);
        knots.validate(degree, control_points.len())?;

        Ok(Self {
            degree,
            control_points,
            knots,
        })
    }

    /// Create a NURBS curve from cartesian control points and their weights
    pub fn try_from_weighted(
        degree: usize,
        points: &[OPoint<T, DimNameDiff<D, U1>>],
        weights: &[T],
        knots: KnotVector<T>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            points.len() == weights.len(),
            "Number of weights ({}) does not match the number of control points ({})",
            weights.len(),
            points.len()
        );
        let control_points = points
            .iter()
            .zip(weights.iter())
            .map(|(p, w)| homogenize(p, *w))
            .collect();
        Self::try_new(degree, control_points, knots.to_vec())
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &KnotVector<T> {
        &self.knots
    }

    pub fn control_points(&self) -> &Vec<OPoint<T, D>> {
        &self.control_points
    }

    pub fn knots_domain(&self) -> (T, T) {
        self.knots.domain(self.degree)
    }

    /// Return the dehomogenized control points
    pub fn dehomogenized_control_points(&self) -> Vec<OPoint<T, DimNameDiff<D, U1>>> {
        self.control_points
            .iter()
            .filter_map(dehomogenize)
            .collect()
    }

    pub fn weights(&self) -> Vec<T> {
        self.control_points
            .iter()
            .map(|p| p[D::dim() - 1])
            .collect()
    }

    /// Evaluate the curve at a given parameter to get a dehomogenized point
    pub fn point_at(&self, t: T) -> OPoint<T, DimNameDiff<D, U1>> {
        let p = self.point(t);
        // weights are validated to be positive, so the sum never vanishes
        dehomogenize(&p).unwrap_or_else(OPoint::origin)
    }

    /// Evaluate the curve at a given parameter to get a homogeneous point
    pub(crate) fn point(&self, t: T) -> OPoint<T, D> {
        let n = self.knots.len() - self.degree - 2;
        let span = self.knots.find_knot_span_index(n, self.degree, t);
        let basis = self.knots.basis_functions(span, t, self.degree);
        let mut position = OPoint::<T, D>::origin();
        for (i, b) in basis.iter().enumerate() {
            position.coords += &self.control_points[span - self.degree + i].coords * *b;
        }
        position
    }

    /// Evaluate the curve at regularly spaced parameters over its domain
    /// `delta` is the sampling step in normalized parameter space
    pub fn evaluate(&self, delta: T) -> anyhow::Result<Vec<OPoint<T, DimNameDiff<D, U1>>>> {
        let samples = sample_size(delta)?;
        Ok(self
            .knots
            .regularly_spaced_parameters(self.degree, samples)
            .into_iter()
            .map(|t| self.point_at(t))
            .collect())
    }

    /// Evaluate the curve at a given parameter to get a tangent vector
    pub fn tangent_at(&self, u: T) -> OVector<T, DimNameDiff<D, U1>> {
        let mut ders = self.rational_derivatives(u, 1);
        ders.swap_remove(1)
    }

    /// Evaluate the cartesian derivatives up to `derivs` at a given parameter
    /// the first element is the point itself
    pub fn rational_derivatives(&self, u: T, derivs: usize) -> Vec<OVector<T, DimNameDiff<D, U1>>> {
        let ders = self.derivatives(u, derivs);
        let (a_ders, w_ders): (Vec<_>, Vec<_>) = ders.iter().map(split_weight).unzip();

        let binom = Binomial::<T>::new(derivs);
        let mut ck: Vec<OVector<T, DimNameDiff<D, U1>>> = Vec::with_capacity(derivs + 1);
        for k in 0..=derivs {
            let mut v = a_ders[k].clone();
            for i in 1..=k {
                v -= &ck[k - i] * (binom.get(k, i) * w_ders[i]);
            }
            ck.push(v / w_ders[0]);
        }
        ck
    }

    /// Evaluate the homogeneous derivatives at a given parameter
    fn derivatives(&self, u: T, derivs: usize) -> Vec<OVector<T, D>> {
        let n = self.knots.len() - self.degree - 2;
        let du = derivs.min(self.degree);
        let mut derivatives = vec![OVector::<T, D>::zeros(); derivs + 1];

        let span = self.knots.find_knot_span_index(n, self.degree, u);
        let nders = self
            .knots
            .derivative_basis_functions(span, u, self.degree, du);
        for k in 0..=du {
            for j in 0..=self.degree {
                derivatives[k] += &self.control_points[span - self.degree + j].coords * nders[k][j];
            }
        }

        derivatives
    }
}
