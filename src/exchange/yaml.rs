use std::path::Path;

use nalgebra::Point3;
use serde::{de::DeserializeOwned, Deserialize};
use serde_yaml::Value;

use crate::{
    curve::NurbsCurve3D,
    knot::KnotVector,
    render::VisConfig,
    shape::{CurveShape, Shape, SurfaceShape},
    surface::NurbsSurface3D,
};

use super::ExchangeError;

/// Read and parse a YAML file
pub fn read_yaml_file(path: &Path) -> Result<Value, ExchangeError> {
    let text = std::fs::read_to_string(path).map_err(|source| ExchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_yaml_str(&text)
}

pub fn read_yaml_str(text: &str) -> Result<Value, ExchangeError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Whether a file describes one shape or a list of shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Multiplicity {
    Single,
    Multi,
}

/// The `shape` and `visualization` sections of a shape file
#[derive(Clone, Debug)]
pub struct ShapeDescriptor {
    shape_type: String,
    count: Option<usize>,
    data: Option<Value>,
    visualization: VisConfig,
}

impl ShapeDescriptor {
    /// Extract the descriptor from a parsed YAML document
    /// `shape` and `shape.type` are required here, `shape.data` is checked once a build function is chosen
    pub fn from_document(document: &Value) -> Result<Self, ExchangeError> {
        let shape = require(document, "shape")?;
        let shape_type = scalar_to_string(require(shape, "type")?);
        let count = optional(shape, "count")
            .map(|v| parse::<usize>(v, "count"))
            .transpose()?;
        let data = optional(shape, "data").cloned();
        let visualization = match optional(document, "visualization") {
            None | Some(Value::Null) => VisConfig::default(),
            Some(v) => parse(v, "visualization")?,
        };

        Ok(Self {
            shape_type,
            count,
            data,
            visualization,
        })
    }

    pub fn shape_type(&self) -> &str {
        &self.shape_type
    }

    pub fn data(&self) -> Result<&Value, ExchangeError> {
        self.data
            .as_ref()
            .ok_or_else(|| ExchangeError::MissingKey("data".to_string()))
    }

    pub fn visualization(&self) -> &VisConfig {
        &self.visualization
    }

    /// A list under `data` is a multi shape, a mapping a single one
    pub fn multiplicity(&self) -> Result<Multiplicity, ExchangeError> {
        match (self.data()?, self.count) {
            (Value::Sequence(seq), Some(n)) if n != seq.len() => Err(ExchangeError::invalid(
                "count",
                format!("expected {} shapes, found {}", n, seq.len()),
            )),
            (Value::Sequence(_), _) => Ok(Multiplicity::Multi),
            (Value::Mapping(_), Some(n)) if n > 1 => Err(ExchangeError::invalid(
                "count",
                format!("expected a list of {} shapes under `data`", n),
            )),
            (Value::Mapping(_), _) => Ok(Multiplicity::Single),
            _ => Err(ExchangeError::invalid(
                "data",
                "expected a mapping or a list of mappings",
            )),
        }
    }
}

/// Overrides given on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildOptions {
    /// evaluation delta applied to every built shape
    pub delta: Option<f64>,
    /// 1-based index of the shape to keep from a multi shape
    pub index: Option<usize>,
}

pub type BuildFunction = fn(&Value, &BuildOptions) -> Result<Shape, ExchangeError>;

/// Entry of the (type, multiplicity) build table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    CurveSingle,
    CurveMulti,
    SurfaceSingle,
    SurfaceMulti,
}

#[derive(Clone, Copy, Debug)]
pub struct ShapeBuilder {
    pub kind: ShapeKind,
    pub build: BuildFunction,
}

struct ShapeType {
    name: &'static str,
    single: ShapeBuilder,
    multi: ShapeBuilder,
}

const SHAPE_TYPES: [ShapeType; 2] = [
    ShapeType {
        name: "curve",
        single: ShapeBuilder {
            kind: ShapeKind::CurveSingle,
            build: build_curve_single,
        },
        multi: ShapeBuilder {
            kind: ShapeKind::CurveMulti,
            build: build_curve_multi,
        },
    },
    ShapeType {
        name: "surface",
        single: ShapeBuilder {
            kind: ShapeKind::SurfaceSingle,
            build: build_surface_single,
        },
        multi: ShapeBuilder {
            kind: ShapeKind::SurfaceMulti,
            build: build_surface_multi,
        },
    },
];

/// Shape type names accepted under `shape.type`
pub fn supported_shape_types() -> Vec<&'static str> {
    SHAPE_TYPES.iter().map(|t| t.name).collect()
}

/// Pick the build function for the descriptor's type and multiplicity
pub fn select_build_function(descriptor: &ShapeDescriptor) -> Result<ShapeBuilder, ExchangeError> {
    let entry = SHAPE_TYPES
        .iter()
        .find(|t| t.name == descriptor.shape_type())
        .ok_or_else(|| ExchangeError::UnsupportedShapeType {
            found: descriptor.shape_type().to_string(),
            supported: supported_shape_types(),
        })?;
    Ok(match descriptor.multiplicity()? {
        Multiplicity::Single => entry.single,
        Multiplicity::Multi => entry.multi,
    })
}

/// Build the shape from the descriptor data with the chosen build function
pub fn build_nurbs_shape(
    descriptor: &ShapeDescriptor,
    builder: ShapeBuilder,
    options: &BuildOptions,
) -> Result<Shape, ExchangeError> {
    log::debug!("building shape with {:?}", builder.kind);
    (builder.build)(descriptor.data()?, options)
}

pub fn build_curve_single(data: &Value, options: &BuildOptions) -> Result<Shape, ExchangeError> {
    warn_ignored_index(options);
    let mut shape = Shape::Curve(curve_from_data(data, "curve")?);
    apply_delta(&mut shape, options)?;
    Ok(shape)
}

pub fn build_curve_multi(data: &Value, options: &BuildOptions) -> Result<Shape, ExchangeError> {
    let curves = sequence(data)?
        .iter()
        .enumerate()
        .map(|(i, d)| curve_from_data(d, &format!("curve{}", i + 1)))
        .collect::<Result<Vec<_>, _>>()?;
    finish_multi(Shape::CurveContainer(curves), options)
}

pub fn build_surface_single(data: &Value, options: &BuildOptions) -> Result<Shape, ExchangeError> {
    warn_ignored_index(options);
    let mut shape = Shape::Surface(surface_from_data(data, "surface")?);
    apply_delta(&mut shape, options)?;
    Ok(shape)
}

pub fn build_surface_multi(data: &Value, options: &BuildOptions) -> Result<Shape, ExchangeError> {
    let surfaces = sequence(data)?
        .iter()
        .enumerate()
        .map(|(i, d)| surface_from_data(d, &format!("surface{}", i + 1)))
        .collect::<Result<Vec<_>, _>>()?;
    finish_multi(Shape::SurfaceContainer(surfaces), options)
}

fn finish_multi(mut shape: Shape, options: &BuildOptions) -> Result<Shape, ExchangeError> {
    apply_delta(&mut shape, options)?;
    match options.index {
        Some(index) => Ok(shape.select(index)?),
        None => Ok(shape),
    }
}

fn apply_delta(shape: &mut Shape, options: &BuildOptions) -> Result<(), ExchangeError> {
    if let Some(delta) = options.delta {
        shape.set_delta(delta)?;
    }
    Ok(())
}

fn warn_ignored_index(options: &BuildOptions) {
    if let Some(index) = options.index {
        log::warn!("ignoring shape index {} for a single shape", index);
    }
}

fn curve_from_data(data: &Value, default_name: &str) -> Result<CurveShape, ExchangeError> {
    let degree: usize = parse(require(data, "degree")?, "degree")?;
    let (points, weights) = control_points(data)?;
    let knots = knot_vector(data, "knotvector", degree, points.len())?;

    let curve = NurbsCurve3D::try_from_weighted(degree, &points, &weights, knots)?;
    let mut shape = CurveShape::new(shape_name(data, default_name), curve);
    if let Some(delta) = optional(data, "delta") {
        shape.set_delta(parse(delta, "delta")?)?;
    }
    Ok(shape)
}

/// `delta` of a surface is either shared by both directions or given per direction
#[derive(Deserialize)]
#[serde(untagged)]
enum SurfaceDelta {
    Uniform(f64),
    PerDirection([f64; 2]),
}

fn surface_from_data(data: &Value, default_name: &str) -> Result<SurfaceShape, ExchangeError> {
    let degree_u: usize = parse(require(data, "degree_u")?, "degree_u")?;
    let degree_v: usize = parse(require(data, "degree_v")?, "degree_v")?;
    let size_u: usize = parse(require(data, "size_u")?, "size_u")?;
    let size_v: usize = parse(require(data, "size_v")?, "size_v")?;
    let (points, weights) = control_points(data)?;
    if size_u.checked_mul(size_v) != Some(points.len()) {
        return Err(ExchangeError::invalid(
            "size_u",
            format!(
                "size_u x size_v ({} x {}) does not match the {} control points",
                size_u,
                size_v,
                points.len()
            ),
        ));
    }
    let knots_u = knot_vector(data, "knotvector_u", degree_u, size_u)?;
    let knots_v = knot_vector(data, "knotvector_v", degree_v, size_v)?;

    let surface = NurbsSurface3D::try_from_weighted(
        degree_u, degree_v, size_u, size_v, &points, &weights, knots_u, knots_v,
    )?;
    let mut shape = SurfaceShape::new(shape_name(data, default_name), surface);
    if let Some(delta) = optional(data, "delta") {
        let (du, dv) = match parse::<SurfaceDelta>(delta, "delta")? {
            SurfaceDelta::Uniform(d) => (d, d),
            SurfaceDelta::PerDirection([du, dv]) => (du, dv),
        };
        shape.set_delta(du, dv)?;
    }
    Ok(shape)
}

/// Cartesian control points (2D points get z = 0) and their weights, defaulting to 1
fn control_points(data: &Value) -> Result<(Vec<Point3<f64>>, Vec<f64>), ExchangeError> {
    let ctrlpts = require(data, "control_points")?;
    let raw: Vec<Vec<f64>> = parse(require(ctrlpts, "points")?, "points")?;
    let points = raw
        .iter()
        .map(|p| match p.as_slice() {
            [x, y] => Ok(Point3::new(*x, *y, 0.)),
            [x, y, z] => Ok(Point3::new(*x, *y, *z)),
            _ => Err(ExchangeError::invalid(
                "points",
                format!("expected 2 or 3 coordinates, found {}", p.len()),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let weights = match optional(ctrlpts, "weights") {
        Some(w) => parse(w, "weights")?,
        None => vec![1.; points.len()],
    };
    Ok((points, weights))
}

/// The knot vector under `key`, normalized to [0, 1], or a generated clamped uniform one
fn knot_vector(
    data: &Value,
    key: &str,
    degree: usize,
    control_points: usize,
) -> Result<KnotVector<f64>, ExchangeError> {
    match optional(data, key) {
        Some(v) => {
            let mut knots = KnotVector::new(parse::<Vec<f64>>(v, key)?);
            if knots.is_empty() {
                return Err(ExchangeError::invalid(key, "knot vector is empty"));
            }
            knots.normalize();
            Ok(knots)
        }
        None => Ok(KnotVector::try_clamped_uniform(degree, control_points)?),
    }
}

fn shape_name(data: &Value, default_name: &str) -> String {
    optional(data, "name")
        .map(scalar_to_string)
        .unwrap_or_else(|| default_name.to_string())
}

fn sequence(data: &Value) -> Result<&Vec<Value>, ExchangeError> {
    let seq = data
        .as_sequence()
        .ok_or_else(|| ExchangeError::invalid("data", "expected a list of shapes"))?;
    if seq.is_empty() {
        return Err(ExchangeError::invalid("data", "the list of shapes is empty"));
    }
    Ok(seq)
}

fn require<'a>(value: &'a Value, key: &str) -> Result<&'a Value, ExchangeError> {
    value
        .get(key)
        .ok_or_else(|| ExchangeError::MissingKey(key.to_string()))
}

fn optional<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key)
}

fn parse<T: DeserializeOwned>(value: &Value, key: &str) -> Result<T, ExchangeError> {
    serde_yaml::from_value(value.clone()).map_err(|e| ExchangeError::invalid(key, e))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
