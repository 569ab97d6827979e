use nalgebra::{Matrix3, Point2, Point3, Vector3};

use super::View;

/// Orthographic projection onto a view plane
/// rows of the matrix are the screen right, screen up and towards-viewer axes
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    basis: Matrix3<f64>,
}

impl Projection {
    /// Build a projection looking along `-toward_viewer` with `up` kept vertical on screen
    pub fn looking_from(toward_viewer: Vector3<f64>, up: Vector3<f64>) -> Self {
        let toward = toward_viewer.normalize();
        let up = (up - toward * up.dot(&toward)).normalize();
        let right = up.cross(&toward);
        Self {
            basis: Matrix3::from_rows(&[right.transpose(), up.transpose(), toward.transpose()]),
        }
    }

    /// Project a point to screen coordinates (y up)
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        let q = self.basis * p.coords;
        Point2::new(q.x, q.y)
    }

    /// Distance towards the viewer, larger is closer
    pub fn depth(&self, p: &Point3<f64>) -> f64 {
        (self.basis * p.coords).z
    }

    /// Unit vector pointing from the scene towards the viewer
    pub fn toward_viewer(&self) -> Vector3<f64> {
        self.basis.row(2).transpose()
    }
}

impl From<View> for Projection {
    fn from(view: View) -> Self {
        match view {
            View::Iso => Projection::looking_from(Vector3::new(1., -1., 1.), Vector3::z()),
            View::Xy => Projection::looking_from(Vector3::z(), Vector3::y()),
            View::Xz => Projection::looking_from(-Vector3::y(), Vector3::z()),
            View::Yz => Projection::looking_from(Vector3::x(), Vector3::z()),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Point2, Point3};

    use super::{Projection, View};

    #[test]
    fn axis_aligned_views_drop_one_coordinate() {
        let p = Point3::new(1., 2., 3.);
        assert_relative_eq!(Projection::from(View::Xy).project(&p), Point2::new(1., 2.));
        assert_relative_eq!(Projection::from(View::Xz).project(&p), Point2::new(1., 3.));
        assert_relative_eq!(Projection::from(View::Yz).project(&p), Point2::new(2., 3.));
    }

    #[test]
    fn iso_keeps_z_up_and_depth_toward_viewer() {
        let iso = Projection::from(View::Iso);
        let up = iso.project(&Point3::new(0., 0., 1.));
        assert_relative_eq!(up.x, 0., epsilon = 1e-12);
        assert!(up.y > 0.);
        assert!(iso.depth(&Point3::new(1., -1., 1.)) > iso.depth(&Point3::origin()));
    }
}
