use nalgebra::{convert, RealField};

/// Binomial coefficients up to a fixed `n`, stored as rows of Pascal's triangle.
pub struct Binomial<T> {
    rows: Vec<Vec<T>>,
}

impl<T: RealField + Copy> Binomial<T> {
    /// Build the table for every `n <= max_n`
    pub fn new(max_n: usize) -> Self {
        let mut rows: Vec<Vec<T>> = Vec::with_capacity(max_n + 1);
        for n in 0..=max_n {
            let mut row = vec![T::one(); n + 1];
            for k in 1..n {
                row[k] = rows[n - 1][k - 1] + rows[n - 1][k];
            }
            rows.push(row);
        }
        Self { rows }
    }

    /// Returns the binomial coefficient of `n` and `k`, zero when `k > n`.
    /// Falls back to the multiplicative formula beyond the tabulated range.
    pub fn get(&self, n: usize, k: usize) -> T {
        if k > n {
            return T::zero();
        }
        match self.rows.get(n) {
            Some(row) => row[k],
            None => {
                let k = k.min(n - k);
                let r = (0..k).fold(1_f64, |acc, i| acc * (n - i) as f64 / (i + 1) as f64);
                convert(r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Binomial;

    #[test]
    fn pascal_rows() {
        let binomial = Binomial::<f64>::new(5);
        let row: Vec<f64> = (0..=5).map(|k| binomial.get(5, k)).collect();
        assert_eq!(row, vec![1., 5., 10., 10., 5., 1.]);
        assert_eq!(binomial.get(5, 6), 0.);
    }

    #[test]
    fn beyond_table() {
        let binomial = Binomial::<f64>::new(2);
        assert_eq!(binomial.get(6, 3), 20.);
        assert_eq!(binomial.get(2, 1), 2.);
    }
}
