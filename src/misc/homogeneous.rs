use nalgebra::{
    allocator::Allocator, Const, DefaultAllocator, DimName, DimNameDiff, DimNameSub, OPoint,
    OVector, U1,
};

use super::FloatingPoint;

/// Lift a cartesian point into homogeneous coordinates with the given weight
/// the weighted coordinates are `(w * x, w * y, ..., w)`
pub fn homogenize<T: FloatingPoint, D: DimName>(
    point: &OPoint<T, DimNameDiff<D, U1>>,
    weight: T,
) -> OPoint<T, D>
where
    D: DimNameSub<U1>,
    DefaultAllocator: Allocator<D>,
    DefaultAllocator: Allocator<DimNameDiff<D, U1>>,
{
    let dim = D::dim() - 1;
    let coords = OVector::<T, D>::from_fn(|i, _| {
        if i < dim {
            point.coords[i] * weight
        } else {
            weight
        }
    });
    OPoint { coords }
}

/// Project a homogeneous point back to cartesian space
/// returns `None` if the weight is zero
pub fn dehomogenize<T: FloatingPoint, D: DimName>(
    point: &OPoint<T, D>,
) -> Option<OPoint<T, DimNameDiff<D, U1>>>
where
    D: DimNameSub<U1>,
    DefaultAllocator: Allocator<D>,
    DefaultAllocator: Allocator<DimNameDiff<D, U1>>,
{
    let v = &point.coords;
    let w = v[D::dim() - 1];
    if w != T::zero() {
        let coords =
            v.generic_view((0, 0), (<D as DimNameSub<U1>>::Output::name(), Const::<1>)) / w;
        Some(OPoint { coords })
    } else {
        None
    }
}

/// Split a homogeneous vector into its weighted cartesian part and its weight
pub fn split_weight<T: FloatingPoint, D: DimName>(
    v: &OVector<T, D>,
) -> (OVector<T, DimNameDiff<D, U1>>, T)
where
    D: DimNameSub<U1>,
    DefaultAllocator: Allocator<D>,
    DefaultAllocator: Allocator<DimNameDiff<D, U1>>,
{
    let dim = D::dim() - 1;
    let a = OVector::<T, DimNameDiff<D, U1>>::from_fn(|i, _| v[i]);
    (a, v[dim])
}
