#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Write `contents` to `name` inside `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Run the dispatcher and capture its exit code and output
pub fn run(args: &[&str]) -> (i32, String) {
    let args = args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
    let mut out = vec![];
    let code = geomdl_cli::run(&args, &mut out);
    (code, String::from_utf8(out).unwrap())
}

pub const SINGLE_CURVE: &str = r#"
shape:
  type: curve
  data:
    name: spline
    degree: 3
    control_points:
      points:
        - [5.0, 5.0]
        - [10.0, 10.0]
        - [20.0, 15.0]
        - [35.0, 15.0]
        - [45.0, 10.0]
        - [50.0, 5.0]
    knotvector: [0.0, 0.0, 0.0, 0.0, 0.33, 0.66, 1.0, 1.0, 1.0, 1.0]
    delta: 0.1
"#;

pub const MULTI_CURVE: &str = r#"
shape:
  type: curve
  count: 3
  data:
    - name: first
      degree: 1
      control_points:
        points: [[0, 0], [1, 0]]
    - name: second
      degree: 2
      control_points:
        points: [[0, 1], [1, 2], [2, 1]]
    - name: third
      degree: 1
      control_points:
        points: [[0, 2], [1, 3]]
visualization:
  axes: false
"#;

pub const BILINEAR_SURFACE: &str = r#"
shape:
  type: surface
  data:
    name: patch
    degree_u: 1
    degree_v: 1
    size_u: 2
    size_v: 2
    control_points:
      points: [[0, 0, 0], [0, 1, 0], [1, 0, 0], [1, 1, 1]]
    delta: 0.25
visualization:
  backend: obj
"#;
