use std::path::PathBuf;

use nalgebra::{Point3, U3};

use crate::{
    bounding_box::BoundingBox,
    curve::NurbsCurve3D,
    misc::check_delta,
    render::Visualization,
    surface::NurbsSurface3D,
    tessellation::{RegularTessellationOptions, SurfaceTessellation, Tessellation},
};

/// Evaluation delta applied to curves that do not define one
pub const DEFAULT_CURVE_DELTA: f64 = 0.01;

/// Evaluation delta applied to surfaces that do not define one
pub const DEFAULT_SURFACE_DELTA: f64 = 0.05;

/// A named curve with its evaluation delta
#[derive(Clone, Debug)]
pub struct CurveShape {
    name: String,
    curve: NurbsCurve3D<f64>,
    delta: f64,
}

impl CurveShape {
    pub fn new(name: impl Into<String>, curve: NurbsCurve3D<f64>) -> Self {
        Self {
            name: name.into(),
            curve,
            delta: DEFAULT_CURVE_DELTA,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn curve(&self) -> &NurbsCurve3D<f64> {
        &self.curve
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f64) -> anyhow::Result<()> {
        check_delta(delta)?;
        self.delta = delta;
        Ok(())
    }

    /// Points evaluated at the current delta
    pub fn evalpts(&self) -> anyhow::Result<Vec<Point3<f64>>> {
        self.curve.evaluate(self.delta)
    }

    pub fn ctrlpts(&self) -> Vec<Point3<f64>> {
        self.curve.dehomogenized_control_points()
    }
}

/// A named surface with its evaluation deltas in u and v
#[derive(Clone, Debug)]
pub struct SurfaceShape {
    name: String,
    surface: NurbsSurface3D<f64>,
    delta: (f64, f64),
}

impl SurfaceShape {
    pub fn new(name: impl Into<String>, surface: NurbsSurface3D<f64>) -> Self {
        Self {
            name: name.into(),
            surface,
            delta: (DEFAULT_SURFACE_DELTA, DEFAULT_SURFACE_DELTA),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surface(&self) -> &NurbsSurface3D<f64> {
        &self.surface
    }

    pub fn delta(&self) -> (f64, f64) {
        self.delta
    }

    pub fn set_delta(&mut self, delta_u: f64, delta_v: f64) -> anyhow::Result<()> {
        check_delta(delta_u)?;
        check_delta(delta_v)?;
        self.delta = (delta_u, delta_v);
        Ok(())
    }

    /// Triangle mesh sampled at the current deltas
    pub fn tessellate(&self) -> anyhow::Result<SurfaceTessellation<f64>> {
        let options = RegularTessellationOptions::default()
            .with_delta_u(self.delta.0)
            .with_delta_v(self.delta.1);
        self.surface.tessellate(options)
    }

    pub fn ctrlpts(&self) -> Vec<Vec<Point3<f64>>> {
        self.surface.dehomogenized_control_points()
    }
}

/// A shape built from a YAML description: one curve or surface, or a container of them
#[derive(Clone, Debug)]
pub enum Shape {
    Curve(CurveShape),
    Surface(SurfaceShape),
    CurveContainer(Vec<CurveShape>),
    SurfaceContainer(Vec<SurfaceShape>),
}

impl Shape {
    /// Human readable kind of the shape
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Curve(_) => "curve",
            Shape::Surface(_) => "surface",
            Shape::CurveContainer(_) => "curve container",
            Shape::SurfaceContainer(_) => "surface container",
        }
    }

    /// Number of curves or surfaces held by the shape
    pub fn len(&self) -> usize {
        match self {
            Shape::Curve(_) | Shape::Surface(_) => 1,
            Shape::CurveContainer(c) => c.len(),
            Shape::SurfaceContainer(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Override the evaluation delta of every member
    pub fn set_delta(&mut self, delta: f64) -> anyhow::Result<()> {
        match self {
            Shape::Curve(c) => c.set_delta(delta),
            Shape::Surface(s) => s.set_delta(delta, delta),
            Shape::CurveContainer(cs) => cs.iter_mut().try_for_each(|c| c.set_delta(delta)),
            Shape::SurfaceContainer(ss) => {
                ss.iter_mut().try_for_each(|s| s.set_delta(delta, delta))
            }
        }
    }

    /// Pick the `index`-th member (1-based) of a container
    /// a single curve or surface only accepts index 1
    pub fn select(self, index: usize) -> anyhow::Result<Shape> {
        let len = self.len();
        anyhow::ensure!(
            (1..=len).contains(&index),
            "Shape index {} is out of range, the file defines {} shape(s)",
            index,
            len
        );
        Ok(match self {
            Shape::CurveContainer(mut cs) => Shape::Curve(cs.swap_remove(index - 1)),
            Shape::SurfaceContainer(mut ss) => Shape::Surface(ss.swap_remove(index - 1)),
            single => single,
        })
    }

    /// Bounding box of all control points
    pub fn bounding_box(&self) -> Option<BoundingBox<f64, U3>> {
        let points: Vec<Point3<f64>> = match self {
            Shape::Curve(c) => c.ctrlpts(),
            Shape::Surface(s) => s.ctrlpts().into_iter().flatten().collect(),
            Shape::CurveContainer(cs) => cs.iter().flat_map(|c| c.ctrlpts()).collect(),
            Shape::SurfaceContainer(ss) => ss
                .iter()
                .flat_map(|s| s.ctrlpts().into_iter().flatten())
                .collect(),
        };
        BoundingBox::from_points(points)
    }

    /// Render the shape with the given visualization and return the written file
    pub fn render(&self, vis: &Visualization) -> anyhow::Result<PathBuf> {
        vis.render(self)
    }
}
