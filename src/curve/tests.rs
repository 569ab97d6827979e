use approx::assert_relative_eq;
use nalgebra::{Point2, Point3, Point4, Vector3};

use crate::knot::KnotVector;

use super::{NurbsCurve2D, NurbsCurve3D};

fn quarter_circle() -> NurbsCurve2D<f64> {
    let w = std::f64::consts::FRAC_1_SQRT_2;
    NurbsCurve2D::try_from_weighted(
        2,
        &[
            Point2::new(1., 0.),
            Point2::new(1., 1.),
            Point2::new(0., 1.),
        ],
        &[1., w, 1.],
        KnotVector::new(vec![0., 0., 0., 1., 1., 1.]),
    )
    .unwrap()
}

#[test]
fn clamped_curve_interpolates_end_points() {
    let points = vec![
        Point3::new(5., 5., 0.),
        Point3::new(10., 10., 0.),
        Point3::new(20., 15., 0.),
        Point3::new(35., 15., 0.),
        Point3::new(45., 10., 0.),
        Point3::new(50., 5., 0.),
    ];
    let weights = vec![1.; points.len()];
    let knots = KnotVector::try_clamped_uniform(3, points.len()).unwrap();
    let curve = NurbsCurve3D::try_from_weighted(3, &points, &weights, knots).unwrap();

    let (start, end) = curve.knots_domain();
    assert_relative_eq!(curve.point_at(start), points[0]);
    assert_relative_eq!(curve.point_at(end), points[5]);
}

#[test]
fn rational_quarter_circle_stays_on_unit_circle() {
    let circle = quarter_circle();
    let points = circle.evaluate(0.05).unwrap();
    assert_eq!(points.len(), 20);
    for p in points {
        assert_relative_eq!(p.coords.norm(), 1., epsilon = 1e-10);
    }
}

#[test]
fn tangent_is_perpendicular_to_radius() {
    let circle = quarter_circle();
    for u in [0., 0.3, 0.5, 0.9, 1.] {
        let p = circle.point_at(u);
        let t = circle.tangent_at(u);
        assert_relative_eq!(p.coords.dot(&t), 0., epsilon = 1e-10);
    }
}

#[test]
fn evaluate_includes_both_end_points() {
    let curve = NurbsCurve3D::try_from_weighted(
        1,
        &[Point3::new(0., 0., 0.), Point3::new(2., 4., 6.)],
        &[1., 1.],
        KnotVector::try_clamped_uniform(1, 2).unwrap(),
    )
    .unwrap();
    let points = curve.evaluate(0.25).unwrap();
    assert_eq!(points.len(), 4);
    assert_relative_eq!(points[0], Point3::origin());
    assert_relative_eq!(points[3], Point3::new(2., 4., 6.));
    assert_relative_eq!(points[1], Point3::new(2. / 3., 4. / 3., 2.), epsilon = 1e-12);
}

#[test]
fn linear_derivative_is_constant() {
    let curve = NurbsCurve3D::try_from_weighted(
        1,
        &[Point3::new(0., 0., 0.), Point3::new(2., 4., 6.)],
        &[1., 1.],
        KnotVector::try_clamped_uniform(1, 2).unwrap(),
    )
    .unwrap();
    assert_relative_eq!(curve.tangent_at(0.5), Vector3::new(2., 4., 6.));
}

#[test]
fn rejects_invalid_definitions() {
    let control_points = vec![Point4::new(0., 0., 0., 1.), Point4::new(1., 0., 0., 1.)];
    assert!(NurbsCurve3D::try_new(2, control_points.clone(), vec![0., 0., 0., 1., 1.]).is_err());
    assert!(NurbsCurve3D::try_new(1, control_points.clone(), vec![0., 0., 1.]).is_err());
    assert!(NurbsCurve3D::try_new(0, control_points, vec![0., 1.]).is_err());

    let zero_weight = vec![Point4::new(0., 0., 0., 1.), Point4::new(0., 0., 0., 0.)];
    assert!(NurbsCurve3D::try_new(1, zero_weight, vec![0., 0., 1., 1.]).is_err());
}

#[test]
fn weights_survive_homogenization() {
    let circle = quarter_circle();
    assert_relative_eq!(circle.weights()[1], std::f64::consts::FRAC_1_SQRT_2);
    let cartesian = circle.dehomogenized_control_points();
    assert_relative_eq!(cartesian[1], Point2::new(1., 1.), epsilon = 1e-12);
}

#[test]
fn tiny_delta_is_rejected_before_sampling() {
    let circle = quarter_circle();
    assert!(circle.evaluate(1e-12).is_err());
    assert_eq!(circle.evaluate(1e-5).unwrap().len(), 100_000);
}
