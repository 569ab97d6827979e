use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::knot::KnotVector;

use super::NurbsSurface3D;

/// bilinear patch over the unit square in the z = 0 plane
fn flat_patch() -> NurbsSurface3D<f64> {
    let points = vec![
        Point3::new(0., 0., 0.),
        Point3::new(0., 1., 0.),
        Point3::new(1., 0., 0.),
        Point3::new(1., 1., 0.),
    ];
    NurbsSurface3D::try_from_weighted(
        1,
        1,
        2,
        2,
        &points,
        &[1.; 4],
        KnotVector::try_clamped_uniform(1, 2).unwrap(),
        KnotVector::try_clamped_uniform(1, 2).unwrap(),
    )
    .unwrap()
}

fn bumpy_patch() -> NurbsSurface3D<f64> {
    let mut points = vec![];
    for u in 0..4 {
        for v in 0..4 {
            let z = if (1..3).contains(&u) && (1..3).contains(&v) {
                2.
            } else {
                0.
            };
            points.push(Point3::new(u as f64, v as f64, z));
        }
    }
    NurbsSurface3D::try_from_weighted(
        3,
        3,
        4,
        4,
        &points,
        &[1.; 16],
        KnotVector::try_clamped_uniform(3, 4).unwrap(),
        KnotVector::try_clamped_uniform(3, 4).unwrap(),
    )
    .unwrap()
}

#[test]
fn corners_are_interpolated() {
    let surface = bumpy_patch();
    assert_relative_eq!(surface.point_at(0., 0.), Point3::new(0., 0., 0.));
    assert_relative_eq!(surface.point_at(1., 0.), Point3::new(3., 0., 0.));
    assert_relative_eq!(surface.point_at(0., 1.), Point3::new(0., 3., 0.));
    assert_relative_eq!(surface.point_at(1., 1.), Point3::new(3., 3., 0.));
}

#[test]
fn bilinear_patch_is_linear() {
    let surface = flat_patch();
    assert_relative_eq!(surface.point_at(0.25, 0.75), Point3::new(0.25, 0.75, 0.));
    assert_relative_eq!(surface.normal_at(0.5, 0.5), Vector3::new(0., 0., 1.));
}

#[test]
fn bump_is_symmetric() {
    let surface = bumpy_patch();
    let center = surface.point_at(0.5, 0.5);
    assert_relative_eq!(center.x, 1.5, epsilon = 1e-12);
    assert_relative_eq!(center.y, 1.5, epsilon = 1e-12);
    assert!(center.z > 0.);
    assert_relative_eq!(surface.normal_at(0.5, 0.5), Vector3::z(), epsilon = 1e-12);
}

#[test]
fn evaluate_builds_regular_grid() {
    let surface = bumpy_patch();
    let grid = surface.evaluate(0.1, 0.2).unwrap();
    assert_eq!(grid.len(), 10);
    assert!(grid.iter().all(|row| row.len() == 5));
    assert_relative_eq!(grid[9][4], Point3::new(3., 3., 0.));
}

#[test]
fn weighted_flat_list_is_row_major_in_v() {
    let surface = flat_patch();
    let grid = surface.dehomogenized_control_points();
    assert_eq!(grid.len(), 2);
    assert_relative_eq!(grid[0][1], Point3::new(0., 1., 0.));
    assert_relative_eq!(grid[1][0], Point3::new(1., 0., 0.));
}

#[test]
fn rejects_mismatched_sizes() {
    let points = vec![Point3::origin(); 6];
    let knots = || KnotVector::try_clamped_uniform(1, 2).unwrap();
    let surface = NurbsSurface3D::try_from_weighted(1, 1, 2, 2, &points, &[1.; 6], knots(), knots());
    assert!(surface.is_err());

    let points = vec![Point3::origin(); 4];
    let surface = NurbsSurface3D::try_from_weighted(1, 1, 2, 2, &points, &[1.; 3], knots(), knots());
    assert!(surface.is_err());
}

#[test]
fn oversized_grid_dimensions_are_rejected() {
    let points = vec![Point3::origin(); 4];
    let knots = || KnotVector::try_clamped_uniform(1, 2).unwrap();
    let size = 1usize << (usize::BITS / 2);
    let surface =
        NurbsSurface3D::try_from_weighted(1, 1, size, size, &points, &[1.; 4], knots(), knots());
    assert!(surface.is_err());
}

#[test]
fn tiny_delta_is_rejected_before_sampling() {
    let surface = bumpy_patch();
    assert_eq!(surface.u_degree(), 3);
    assert_eq!(surface.v_degree(), 3);
    assert!(surface.evaluate(1e-4, 1e-4).is_err());
    assert!(surface.regular_parameters(1e-12, 0.5).is_err());
    let (us, vs) = surface.regular_parameters(0.001, 0.002).unwrap();
    assert_eq!((us.len(), vs.len()), (1000, 500));
}
