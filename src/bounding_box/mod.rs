use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint, OVector};

use crate::misc::FloatingPoint;

/// A struct representing an axis-aligned bounding box in D space.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    min: OVector<T, D>,
    max: OVector<T, D>,
}

impl<T: FloatingPoint, D: DimName> BoundingBox<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Create a new bounding box from a minimum and maximum corner.
    pub fn new(min: OVector<T, D>, max: OVector<T, D>) -> Self {
        let lo = min.inf(&max);
        let hi = min.sup(&max);
        Self { min: lo, max: hi }
    }

    /// Create a new bounding box enclosing every point of the iterator.
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use geomdl_cli::prelude::BoundingBox;
    ///
    /// let bb = BoundingBox::from_points([
    ///     Point3::new(1., -1., 0.),
    ///     Point3::new(-2., 3., 0.5),
    /// ])
    /// .unwrap();
    /// assert_eq!(bb.min(), &Vector3::new(-2., -1., 0.));
    /// assert_eq!(bb.max(), &Vector3::new(1., 3., 0.5));
    /// assert!(BoundingBox::<f64, nalgebra::U3>::from_points([]).is_none());
    /// ```
    pub fn from_points<I: IntoIterator<Item = OPoint<T, D>>>(iter: I) -> Option<Self> {
        let mut iter = iter.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold(
            (first.coords.clone(), first.coords),
            |(min, max), p| (min.inf(&p.coords), max.sup(&p.coords)),
        );
        Some(Self { min, max })
    }

    pub fn min(&self) -> &OVector<T, D> {
        &self.min
    }

    pub fn max(&self) -> &OVector<T, D> {
        &self.max
    }

    pub fn center(&self) -> OVector<T, D> {
        (&self.min + &self.max) * nalgebra::convert::<f64, T>(0.5)
    }

    pub fn size(&self) -> OVector<T, D> {
        &self.max - &self.min
    }

    /// Grow the box to enclose another one.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// All `2^D` corner points of the box.
    pub fn corners(&self) -> Vec<OPoint<T, D>> {
        let dim = D::dim();
        (0..(1usize << dim))
            .map(|mask| {
                let coords = OVector::<T, D>::from_fn(|i, _| {
                    if mask & (1 << i) == 0 {
                        self.min[i]
                    } else {
                        self.max[i]
                    }
                });
                OPoint { coords }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point3, Vector3};

    use super::BoundingBox;

    #[test]
    fn union_and_corners() {
        let a = BoundingBox::new(Vector3::new(0., 0., 0.), Vector3::new(1., 1., 1.));
        let b = BoundingBox::new(Vector3::new(2., -1., 0.5), Vector3::new(0.5, 0., 0.));
        let u = a.union(&b);
        assert_eq!(u.min(), &Vector3::new(0., -1., 0.));
        assert_eq!(u.max(), &Vector3::new(2., 1., 1.));
        assert_eq!(u.center(), Vector3::new(1., 0., 0.5));
        assert_eq!(u.size(), Vector3::new(2., 2., 1.));

        let corners = a.corners();
        assert_eq!(corners.len(), 8);
        assert!(corners.contains(&Point3::new(1., 0., 1.)));
    }
}
