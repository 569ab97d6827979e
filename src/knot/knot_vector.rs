use std::ops::Index;

use nalgebra::{convert, RealField};

/// Knot vector representation
#[derive(Clone, Debug, PartialEq)]
pub struct KnotVector<T>(Vec<T>);

impl<T: RealField + Copy> KnotVector<T> {
    pub fn new(knots: Vec<T>) -> Self {
        Self(knots)
    }

    /// Create a clamped uniform knot vector normalized to [0, 1]
    /// the first and last knots are repeated `degree + 1` times
    /// # Example
    /// ```
    /// use geomdl_cli::prelude::KnotVector;
    /// let knots: KnotVector<f64> = KnotVector::try_clamped_uniform(2, 5).unwrap();
    /// assert_eq!(knots.to_vec(), vec![0., 0., 0., 1. / 3., 2. / 3., 1., 1., 1.]);
    /// ```
    pub fn try_clamped_uniform(degree: usize, control_points: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(degree > 0, "Degree must be greater than zero");
        anyhow::ensure!(
            control_points > degree,
            "Too few control points ({}) for degree {}",
            control_points,
            degree
        );

        // interior spans between the clamped ends
        let spans = control_points - degree;
        let denom: T = convert(spans as f64);

        let mut knots = Vec::with_capacity(control_points + degree + 1);
        knots.extend(std::iter::repeat_n(T::zero(), degree));
        for i in 0..=spans {
            let ti: T = convert(i as f64);
            knots.push(ti / denom);
        }
        knots.extend(std::iter::repeat_n(T::one(), degree));
        Ok(Self(knots))
    }

    /// Check that the knot vector fits a shape with the given degree and number of control points
    /// `# of knots == # of control points + degree + 1` and the knots are non-decreasing
    pub fn validate(&self, degree: usize, control_points: usize) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.len() == control_points + degree + 1,
            "Invalid number of knots, got {}, expected {}",
            self.len(),
            control_points + degree + 1
        );
        anyhow::ensure!(
            self.0.windows(2).all(|w| w[0] <= w[1]),
            "Knot vector must be non-decreasing"
        );
        let (start, end) = self.domain(degree);
        anyhow::ensure!(start < end, "Knot vector has an empty domain");
        Ok(())
    }

    /// Rescale the knots into [0, 1]
    pub fn normalize(&mut self) {
        let first = self.first();
        let span = self.last() - first;
        if span > T::zero() {
            self.0.iter_mut().for_each(|k| *k = (*k - first) / span);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    pub fn first(&self) -> T {
        self.0[0]
    }

    pub fn last(&self) -> T {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Get the domain of the knot vector by degree
    pub fn domain(&self, degree: usize) -> (T, T) {
        (self.0[degree], self.0[self.0.len() - 1 - degree])
    }

    /// Find the knot span index by binary search
    /// `n` is the index of the last basis function (`# of knots - degree - 2`)
    ///
    /// # Example
    /// ```
    /// use geomdl_cli::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// assert_eq!(knots.find_knot_span_index(4, 2, 2.5), 4);
    /// assert_eq!(knots.find_knot_span_index(4, 2, 3.0), 4);
    /// assert_eq!(knots.find_knot_span_index(4, 2, 0.0), 2);
    /// ```
    pub fn find_knot_span_index(&self, n: usize, degree: usize, u: T) -> usize {
        if u >= self[n + 1] {
            return n;
        }

        if u <= self[degree] {
            return degree;
        }

        let mut low = degree;
        let mut high = n + 1;
        let mut mid = (low + high) / 2;
        while u < self[mid] || u >= self[mid + 1] {
            if u < self[mid] {
                high = mid;
            } else {
                low = mid;
            }
            mid = (low + high) / 2;
        }

        mid
    }

    /// Compute the non-vanishing basis functions at `u`
    pub fn basis_functions(&self, knot_span_index: usize, u: T, degree: usize) -> Vec<T> {
        let mut basis = vec![T::zero(); degree + 1];
        let mut left = vec![T::zero(); degree + 1];
        let mut right = vec![T::zero(); degree + 1];

        basis[0] = T::one();

        for j in 1..=degree {
            left[j] = u - self[knot_span_index + 1 - j];
            right[j] = self[knot_span_index + j] - u;
            let mut saved = T::zero();

            for r in 0..j {
                let temp = basis[r] / (right[r + 1] + left[j - r]);
                basis[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }

            basis[j] = saved;
        }

        basis
    }

    /// Compute the non-vanishing basis functions and their derivatives up to `derivs`
    /// row `k` of the result holds the `k`th derivative, row 0 the basis values
    pub fn derivative_basis_functions(
        &self,
        knot_span_index: usize,
        u: T,
        degree: usize,
        derivs: usize,
    ) -> Vec<Vec<T>> {
        let n = derivs.min(degree);
        let mut ndu = vec![vec![T::zero(); degree + 1]; degree + 1];
        let mut left = vec![T::zero(); degree + 1];
        let mut right = vec![T::zero(); degree + 1];

        ndu[0][0] = T::one();

        for j in 1..=degree {
            left[j] = u - self[knot_span_index + 1 - j];
            right[j] = self[knot_span_index + j] - u;

            let mut saved = T::zero();
            for r in 0..j {
                // lower triangle holds the knot differences
                ndu[j][r] = right[r + 1] + left[j - r];
                let temp = ndu[r][j - 1] / ndu[j][r];

                ndu[r][j] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            ndu[j][j] = saved;
        }

        let mut ders = vec![vec![T::zero(); degree + 1]; derivs + 1];
        for j in 0..=degree {
            ders[0][j] = ndu[j][degree];
        }

        let p = degree as isize;
        let n = n as isize;
        let mut a = vec![vec![T::zero(); degree + 1]; 2];

        for r in 0..=p {
            let (mut s1, mut s2) = (0, 1);
            a[0][0] = T::one();

            for k in 1..=n {
                let mut d = T::zero();
                let rk = r - k;
                let pk = p - k;

                if r >= k {
                    a[s2][0] = a[s1][0] / ndu[(pk + 1) as usize][rk as usize];
                    d = a[s2][0] * ndu[rk as usize][pk as usize];
                }

                let j1 = if rk >= -1 { 1 } else { -rk };
                let j2 = if r - 1 <= pk { k - 1 } else { p - r };

                for j in j1..=j2 {
                    let ju = j as usize;
                    a[s2][ju] =
                        (a[s1][ju] - a[s1][ju - 1]) / ndu[(pk + 1) as usize][(rk + j) as usize];
                    d += a[s2][ju] * ndu[(rk + j) as usize][pk as usize];
                }

                if r <= pk {
                    a[s2][k as usize] = -a[s1][(k - 1) as usize] / ndu[(pk + 1) as usize][r as usize];
                    d += a[s2][k as usize] * ndu[r as usize][pk as usize];
                }

                ders[k as usize][r as usize] = d;
                std::mem::swap(&mut s1, &mut s2);
            }
        }

        let mut acc = p;
        for k in 1..=n {
            let factor: T = convert(acc as f64);
            ders[k as usize].iter_mut().for_each(|v| *v *= factor);
            acc *= p - k;
        }

        ders
    }

    /// Evenly spaced parameters over the domain, both ends included
    pub fn regularly_spaced_parameters(&self, degree: usize, samples: usize) -> Vec<T> {
        let (start, end) = self.domain(degree);
        if samples < 2 {
            return vec![start];
        }
        let divs: T = convert((samples - 1) as f64);
        let step = (end - start) / divs;
        (0..samples)
            .map(|i| {
                if i == samples - 1 {
                    end
                } else {
                    let ti: T = convert(i as f64);
                    start + ti * step
                }
            })
            .collect()
    }
}

impl<T> Index<usize> for KnotVector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> FromIterator<T> for KnotVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
