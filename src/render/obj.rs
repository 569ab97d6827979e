use std::fmt::Write;

use itertools::Itertools;
use nalgebra::Point3;

use super::{Renderer, Scene, SceneGeometry, VisConfig};

/// Renders a scene as a Wavefront OBJ file
/// surfaces become triangle meshes with normals, curves and control nets become line elements
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjRenderer;

impl Renderer for ObjRenderer {
    fn render(&self, scene: &Scene, _config: &VisConfig) -> anyhow::Result<String> {
        let mut obj = String::new();
        writeln!(obj, "# geomdl-cli {}", env!("CARGO_PKG_VERSION"))?;

        // OBJ indices are 1-based and global to the file
        let mut vertex_base = 0usize;
        let mut normal_base = 0usize;

        for item in scene.items() {
            match &item.geometry {
                Some(SceneGeometry::Mesh(tess)) => {
                    writeln!(obj, "o {}", object_name(&item.name))?;
                    write_vertices(&mut obj, tess.points())?;
                    for n in tess.normals() {
                        writeln!(obj, "vn {} {} {}", n.x, n.y, n.z)?;
                    }
                    for face in tess.faces() {
                        let [a, b, c] = face.map(|i| i + 1);
                        let (va, vb, vc) = (a + vertex_base, b + vertex_base, c + vertex_base);
                        let (na, nb, nc) = (a + normal_base, b + normal_base, c + normal_base);
                        writeln!(obj, "f {va}//{na} {vb}//{nb} {vc}//{nc}")?;
                    }
                    vertex_base += tess.points().len();
                    normal_base += tess.normals().len();
                }
                Some(SceneGeometry::Polyline(pts)) => {
                    writeln!(obj, "o {}", object_name(&item.name))?;
                    write_vertices(&mut obj, pts)?;
                    write_line(&mut obj, vertex_base, pts.len())?;
                    vertex_base += pts.len();
                }
                None => {}
            }

            if let Some(net) = &item.control_net {
                writeln!(obj, "o {}_ctrlpts", object_name(&item.name))?;
                let points = net.points();
                write_vertices(&mut obj, &points)?;
                // polylines index into the flattened point list in the same order
                let mut offset = vertex_base;
                match net {
                    super::ControlNet::Polygon(pts) => write_line(&mut obj, offset, pts.len())?,
                    super::ControlNet::Grid(rows) => {
                        let width = rows.first().map(|r| r.len()).unwrap_or(0);
                        for _ in rows.iter() {
                            write_line(&mut obj, offset, width)?;
                            offset += width;
                        }
                        for j in 0..width {
                            let column = (0..rows.len())
                                .map(|i| vertex_base + i * width + j + 1)
                                .join(" ");
                            writeln!(obj, "l {column}")?;
                        }
                    }
                }
                vertex_base += points.len();
            }
        }

        Ok(obj)
    }
}

fn write_vertices(obj: &mut String, points: &[Point3<f64>]) -> std::fmt::Result {
    for p in points {
        writeln!(obj, "v {} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
}

/// Line element through `count` consecutive vertices after `base`
fn write_line(obj: &mut String, base: usize, count: usize) -> std::fmt::Result {
    if count < 2 {
        return Ok(());
    }
    let indices = (1..=count).map(|i| base + i).join(" ");
    writeln!(obj, "l {indices}")
}

/// OBJ names cannot contain whitespace
fn object_name(name: &str) -> String {
    name.split_whitespace().join("_")
}
