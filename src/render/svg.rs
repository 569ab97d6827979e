use std::fmt::Write;

use itertools::Itertools;
use nalgebra::{Point2, Point3, Vector3};

use super::{Projection, Renderer, Rgb, Scene, SceneGeometry, VisConfig};

/// Margin around the drawing in pixels
const MARGIN: f64 = 24.;
/// Height of a legend row in pixels
const LEGEND_ROW: f64 = 18.;
const AXIS_COLORS: [&str; 3] = ["#d62728", "#2ca02c", "#1f77b4"];

/// Renders a scene as a flat-shaded orthographic SVG drawing
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgRenderer;

/// Maps projected scene coordinates into the figure (y down)
struct Viewport {
    projection: Projection,
    scale: f64,
    offset: Point2<f64>,
    height: f64,
}

impl Viewport {
    fn fit(projection: Projection, points: &[Point3<f64>], width: f64, height: f64) -> Self {
        let projected = points.iter().map(|p| projection.project(p)).collect_vec();
        let (min, max) = projected.iter().fold(
            (
                Point2::new(f64::INFINITY, f64::INFINITY),
                Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(min, max), p| {
                (
                    Point2::new(min.x.min(p.x), min.y.min(p.y)),
                    Point2::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        );
        if projected.is_empty() {
            return Self {
                projection,
                scale: 1.,
                offset: Point2::new(width / 2., height / 2.),
                height,
            };
        }

        let extent = max - min;
        let avail_w = (width - 2. * MARGIN).max(1.);
        let avail_h = (height - 2. * MARGIN).max(1.);
        let scale = match (extent.x > f64::EPSILON, extent.y > f64::EPSILON) {
            (true, true) => (avail_w / extent.x).min(avail_h / extent.y),
            (true, false) => avail_w / extent.x,
            (false, true) => avail_h / extent.y,
            (false, false) => 1.,
        };
        // center the drawing inside the figure
        let center = min + extent / 2.;
        let offset = Point2::new(width / 2. - center.x * scale, height / 2. - center.y * scale);
        Self {
            projection,
            scale,
            offset,
            height,
        }
    }

    fn to_screen(&self, p: &Point3<f64>) -> Point2<f64> {
        let q = self.projection.project(p);
        let x = q.x * self.scale + self.offset.x;
        let y = q.y * self.scale + self.offset.y;
        Point2::new(x, self.height - y)
    }

    fn path(&self, points: &[Point3<f64>]) -> String {
        points
            .iter()
            .map(|p| {
                let s = self.to_screen(p);
                format!("{:.3},{:.3}", s.x, s.y)
            })
            .join(" ")
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, scene: &Scene, config: &VisConfig) -> anyhow::Result<String> {
        let [w, h] = config.figure_size;
        let (width, height) = (w as f64, h as f64);
        let projection = Projection::from(config.view);
        let light = projection.toward_viewer();
        let viewport = Viewport::fit(projection, &scene.points(), width, height);
        let lw = config.line_width;

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        if config.axes {
            write_axes(&mut svg, scene, &viewport, lw)?;
        }

        // surfaces first, back to front across every item
        let mut triangles = vec![];
        for (i, item) in scene.items().iter().enumerate() {
            if let Some(SceneGeometry::Mesh(tess)) = &item.geometry {
                let base = Rgb::parse(config.shape_color(i))?;
                for face in tess.faces() {
                    let [a, b, c] = face.map(|k| tess.points()[k]);
                    let depth = (viewport.projection.depth(&a)
                        + viewport.projection.depth(&b)
                        + viewport.projection.depth(&c))
                        / 3.;
                    let normal: Vector3<f64> = tess.face_normal(face);
                    let color = base.shade(0.35 + 0.65 * normal.dot(&light).abs());
                    triangles.push((depth, [a, b, c], color));
                }
            }
        }
        triangles.sort_by(|x, y| x.0.total_cmp(&y.0));
        if !triangles.is_empty() {
            writeln!(svg, r#"<g id="surfaces" stroke-width="0.5">"#)?;
            for (_, tri, color) in triangles.iter() {
                let hex = color.to_hex();
                writeln!(
                    svg,
                    r#"<polygon points="{}" fill="{hex}" stroke="{hex}"/>"#,
                    viewport.path(tri)
                )?;
            }
            writeln!(svg, "</g>")?;
        }

        for (i, item) in scene.items().iter().enumerate() {
            if let Some(SceneGeometry::Polyline(pts)) = &item.geometry {
                writeln!(
                    svg,
                    r#"<polyline id="{}" points="{}" fill="none" stroke="{}" stroke-width="{lw}"/>"#,
                    escape(&item.name),
                    viewport.path(pts),
                    config.shape_color(i)
                )?;
            }
        }

        let ctrl_items = scene
            .items()
            .iter()
            .filter_map(|item| item.control_net.as_ref().map(|net| (item, net)))
            .collect_vec();
        for (item, net) in ctrl_items.iter() {
            writeln!(
                svg,
                r#"<g id="{}_ctrlpts" stroke="{}" fill="{}">"#,
                escape(&item.name),
                config.ctrlpts_color,
                config.ctrlpts_color
            )?;
            for line in net.polylines() {
                writeln!(
                    svg,
                    r#"<polyline points="{}" fill="none" stroke-width="{}" stroke-dasharray="4 3"/>"#,
                    viewport.path(&line),
                    lw * 0.6
                )?;
            }
            for p in net.points() {
                let s = viewport.to_screen(&p);
                writeln!(svg, r#"<circle cx="{:.3}" cy="{:.3}" r="{:.1}"/>"#, s.x, s.y, lw + 1.5)?;
            }
            writeln!(svg, "</g>")?;
        }

        if let Some(bbox) = scene.bbox() {
            let corners = bbox.corners();
            writeln!(
                svg,
                r##"<g id="bbox" stroke="#999999" stroke-width="{}" stroke-dasharray="2 2">"##,
                lw * 0.5
            )?;
            // corners are indexed by bit mask, an edge flips exactly one bit
            for i in 0..corners.len() {
                for bit in 0..3 {
                    let j = i | (1 << bit);
                    if j != i {
                        let (a, b) = (viewport.to_screen(&corners[i]), viewport.to_screen(&corners[j]));
                        writeln!(
                            svg,
                            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#,
                            a.x, a.y, b.x, b.y
                        )?;
                    }
                }
            }
            writeln!(svg, "</g>")?;
        }

        if config.legend {
            write_legend(&mut svg, scene, config)?;
        }

        writeln!(svg, "</svg>")?;
        Ok(svg)
    }
}

/// Axes from the origin, scaled to a quarter of the scene extent
fn write_axes(svg: &mut String, scene: &Scene, viewport: &Viewport, lw: f64) -> anyhow::Result<()> {
    let points = scene.points();
    let extent = points
        .iter()
        .map(|p| p.coords.amax())
        .fold(0., f64::max)
        .max(1e-9);
    let length = extent * 0.25;
    let origin = Point3::origin();
    let o = viewport.to_screen(&origin);

    writeln!(svg, r#"<g id="axes" stroke-width="{}">"#, lw * 0.5)?;
    for (axis, (label, color)) in ["x", "y", "z"].iter().zip(AXIS_COLORS.iter()).enumerate() {
        let mut tip = origin;
        tip[axis] = length;
        let t = viewport.to_screen(&tip);
        writeln!(
            svg,
            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{color}"/>"#,
            o.x, o.y, t.x, t.y
        )?;
        writeln!(
            svg,
            r#"<text x="{:.3}" y="{:.3}" font-size="11" fill="{color}">{label}</text>"#,
            t.x + 3.,
            t.y - 3.
        )?;
    }
    writeln!(svg, "</g>")?;
    Ok(())
}

fn write_legend(svg: &mut String, scene: &Scene, config: &VisConfig) -> anyhow::Result<()> {
    let mut entries = scene
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.geometry.is_some())
        .map(|(i, item)| (item.name.clone(), config.shape_color(i).to_string()))
        .collect_vec();
    if scene.items().iter().any(|item| item.control_net.is_some()) {
        entries.push(("control points".to_string(), config.ctrlpts_color.clone()));
    }
    if entries.is_empty() {
        return Ok(());
    }

    writeln!(svg, r#"<g id="legend" font-size="12" font-family="sans-serif">"#)?;
    for (row, (name, color)) in entries.iter().enumerate() {
        let y = MARGIN / 2. + row as f64 * LEGEND_ROW;
        writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="12" height="12" fill="{color}"/>"#,
            MARGIN / 2.,
            y
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" fill="black">{}</text>"#,
            MARGIN / 2. + 18.,
            y + 10.,
            escape(name)
        )?;
    }
    writeln!(svg, "</g>")?;
    Ok(())
}

/// Escape text for use inside SVG attributes and elements
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
