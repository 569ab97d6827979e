use nalgebra::{Point3, U3};

use crate::{
    bounding_box::BoundingBox,
    shape::{CurveShape, Shape, SurfaceShape},
    tessellation::SurfaceTessellation,
};

use super::VisConfig;

/// Evaluated geometry of a single scene item
#[derive(Clone, Debug)]
pub enum SceneGeometry {
    /// evaluated curve points in parameter order
    Polyline(Vec<Point3<f64>>),
    /// triangulated surface
    Mesh(SurfaceTessellation<f64>),
}

/// Control structure of a scene item
#[derive(Clone, Debug)]
pub enum ControlNet {
    Polygon(Vec<Point3<f64>>),
    /// rows of constant u
    Grid(Vec<Vec<Point3<f64>>>),
}

impl ControlNet {
    pub fn points(&self) -> Vec<Point3<f64>> {
        match self {
            ControlNet::Polygon(pts) => pts.clone(),
            ControlNet::Grid(rows) => rows.iter().flatten().cloned().collect(),
        }
    }

    /// Polylines connecting the control points
    /// a grid yields its rows followed by its columns
    pub fn polylines(&self) -> Vec<Vec<Point3<f64>>> {
        match self {
            ControlNet::Polygon(pts) => vec![pts.clone()],
            ControlNet::Grid(rows) => {
                let columns = rows.first().map(|r| r.len()).unwrap_or(0);
                let mut lines = rows.clone();
                lines.extend((0..columns).map(|j| rows.iter().map(|r| r[j]).collect()));
                lines
            }
        }
    }
}

/// A named item ready to be drawn
#[derive(Clone, Debug)]
pub struct SceneItem {
    pub name: String,
    /// `None` when evaluated points are turned off
    pub geometry: Option<SceneGeometry>,
    /// `None` when control points are turned off
    pub control_net: Option<ControlNet>,
}

/// Everything a renderer draws for one shape
#[derive(Clone, Debug)]
pub struct Scene {
    items: Vec<SceneItem>,
    bbox: Option<BoundingBox<f64, U3>>,
}

impl Scene {
    /// Evaluate the shape according to the visualization options
    pub fn try_new(shape: &Shape, config: &VisConfig) -> anyhow::Result<Self> {
        let items = match shape {
            Shape::Curve(c) => vec![curve_item(c, config)?],
            Shape::Surface(s) => vec![surface_item(s, config)?],
            Shape::CurveContainer(cs) => cs
                .iter()
                .map(|c| curve_item(c, config))
                .collect::<anyhow::Result<Vec<_>>>()?,
            Shape::SurfaceContainer(ss) => ss
                .iter()
                .map(|s| surface_item(s, config))
                .collect::<anyhow::Result<Vec<_>>>()?,
        };
        let bbox = if config.bbox {
            shape.bounding_box()
        } else {
            None
        };
        Ok(Self { items, bbox })
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn bbox(&self) -> Option<&BoundingBox<f64, U3>> {
        self.bbox.as_ref()
    }

    /// Every point that ends up in the drawing
    pub fn points(&self) -> Vec<Point3<f64>> {
        let mut points = vec![];
        for item in self.items.iter() {
            match &item.geometry {
                Some(SceneGeometry::Polyline(pts)) => points.extend(pts.iter().cloned()),
                Some(SceneGeometry::Mesh(tess)) => points.extend(tess.points().iter().cloned()),
                None => {}
            }
            if let Some(net) = &item.control_net {
                points.extend(net.points());
            }
        }
        if let Some(bbox) = &self.bbox {
            points.extend(bbox.corners());
        }
        points
    }
}

fn curve_item(curve: &CurveShape, config: &VisConfig) -> anyhow::Result<SceneItem> {
    let geometry = if config.evalpts {
        let pts = curve.evalpts()?;
        log::debug!("curve {:?}: {} evaluated points", curve.name(), pts.len());
        Some(SceneGeometry::Polyline(pts))
    } else {
        None
    };
    Ok(SceneItem {
        name: curve.name().to_string(),
        geometry,
        control_net: config.ctrlpts.then(|| ControlNet::Polygon(curve.ctrlpts())),
    })
}

fn surface_item(surface: &SurfaceShape, config: &VisConfig) -> anyhow::Result<SceneItem> {
    let geometry = if config.evalpts {
        let tess = surface.tessellate()?;
        log::debug!(
            "surface {:?}: {}x{} grid, {} triangles",
            surface.name(),
            tess.grid().0,
            tess.grid().1,
            tess.faces().len()
        );
        Some(SceneGeometry::Mesh(tess))
    } else {
        None
    };
    Ok(SceneItem {
        name: surface.name().to_string(),
        geometry,
        control_net: config.ctrlpts.then(|| ControlNet::Grid(surface.ctrlpts())),
    })
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::{ControlNet, Scene};
    use crate::{
        curve::NurbsCurve3D,
        knot::KnotVector,
        render::VisConfig,
        shape::{CurveShape, Shape},
    };

    #[test]
    fn config_switches_select_scene_contents() {
        let points = [Point3::origin(), Point3::new(1., 1., 0.), Point3::new(2., 0., 1.)];
        let curve = NurbsCurve3D::try_from_weighted(
            2,
            &points,
            &[1.; 3],
            KnotVector::try_clamped_uniform(2, 3).unwrap(),
        )
        .unwrap();
        let shape = Shape::Curve(CurveShape::new("arch", curve));

        let scene = Scene::try_new(&shape, &VisConfig::default()).unwrap();
        assert!(scene.items()[0].geometry.is_some());
        assert!(scene.items()[0].control_net.is_some());
        assert!(scene.bbox().is_none());

        let config = VisConfig::default()
            .with_ctrlpts(false)
            .with_evalpts(false)
            .with_bbox(true);
        let scene = Scene::try_new(&shape, &config).unwrap();
        assert_eq!(scene.items()[0].name, "arch");
        assert!(scene.items()[0].geometry.is_none());
        assert!(scene.items()[0].control_net.is_none());
        assert_eq!(scene.bbox().map(|b| b.corners().len()), Some(8));
        assert_eq!(scene.points().len(), 8);
    }

    #[test]
    fn grid_polylines_cover_rows_and_columns() {
        let grid = ControlNet::Grid(vec![
            vec![Point3::new(0., 0., 0.), Point3::new(0., 1., 0.), Point3::new(0., 2., 0.)],
            vec![Point3::new(1., 0., 0.), Point3::new(1., 1., 0.), Point3::new(1., 2., 0.)],
        ]);
        let lines = grid.polylines();
        assert_eq!(lines.len(), 2 + 3);
        assert_eq!(lines[2], vec![Point3::new(0., 0., 0.), Point3::new(1., 0., 0.)]);
        assert_eq!(grid.points().len(), 6);
    }
}
