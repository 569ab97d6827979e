use nalgebra::{convert, RealField};

/// Options for tessellating a surface on a regular parameter grid
#[derive(Clone, Debug, PartialEq)]
pub struct RegularTessellationOptions<T: RealField> {
    /// Evaluation delta in u direction, 0 < delta_u < 1
    pub delta_u: T,
    /// Evaluation delta in v direction, 0 < delta_v < 1
    pub delta_v: T,
}

impl<T: RealField + Copy> Default for RegularTessellationOptions<T> {
    fn default() -> Self {
        let delta: T = convert(0.05);
        Self {
            delta_u: delta,
            delta_v: delta,
        }
    }
}

impl<T: RealField + Copy> RegularTessellationOptions<T> {
    pub fn with_delta(mut self, delta: T) -> Self {
        self.delta_u = delta;
        self.delta_v = delta;
        self
    }

    pub fn with_delta_u(mut self, delta_u: T) -> Self {
        self.delta_u = delta_u;
        self
    }

    pub fn with_delta_v(mut self, delta_v: T) -> Self {
        self.delta_v = delta_v;
        self
    }
}
