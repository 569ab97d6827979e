mod common;

use common::{run, write_fixture, BILINEAR_SURFACE, MULTI_CURVE, SINGLE_CURVE};

/// Points of the first `<polyline>` with the given id
fn polyline_points(svg: &str, id: &str) -> Option<usize> {
    let start = svg.find(&format!(r#"<polyline id="{id}" points=""#))?;
    let rest = &svg[start..];
    let points = rest.split("points=\"").nth(1)?.split('"').next()?;
    Some(points.split_whitespace().count())
}

#[test]
fn single_curve_renders_svg_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "spline.yaml", SINGLE_CURVE);

    let (code, text) = run(&["plot", path.to_str().unwrap()]);
    assert_eq!(code, 0, "{text}");
    let output = dir.path().join("spline.svg");
    assert_eq!(
        text.trim_end(),
        format!("Rendered curve to {}", output.display())
    );

    let svg = std::fs::read_to_string(output).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(polyline_points(&svg, "spline"), Some(10));
    assert!(svg.contains(r#"id="spline_ctrlpts""#));
    assert_eq!(svg.matches("<circle").count(), 6);
}

#[test]
fn delta_override_changes_sampling() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "spline.yaml", SINGLE_CURVE);

    let (code, _) = run(&["plot", path.to_str().unwrap(), "--delta=0.05"]);
    assert_eq!(code, 0);
    let svg = std::fs::read_to_string(dir.path().join("spline.svg")).unwrap();
    assert_eq!(polyline_points(&svg, "spline"), Some(20));
}

#[test]
fn delta_out_of_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "spline.yaml", SINGLE_CURVE);

    for delta in ["--delta=0", "--delta=1.5", "--delta=-0.1"] {
        let (code, text) = run(&["plot", path.to_str().unwrap(), delta]);
        assert_eq!(code, 1, "{delta}");
        assert!(text.starts_with("An error occurred: "), "{text}");
        assert!(text.contains("Evaluation delta"), "{text}");
    }
    assert!(!dir.path().join("spline.svg").exists());
}

#[test]
fn index_selects_nth_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "curves.yaml", MULTI_CURVE);

    let (code, text) = run(&["plot", path.to_str().unwrap(), "--index=2"]);
    assert_eq!(code, 0, "{text}");
    assert!(text.starts_with("Rendered curve to "));

    let svg = std::fs::read_to_string(dir.path().join("curves.svg")).unwrap();
    assert!(svg.contains(r#"<polyline id="second""#));
    assert!(!svg.contains(r#"<polyline id="first""#));
    assert!(!svg.contains(r#"id="axes""#));
}

#[test]
fn multi_shape_without_index_renders_container() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "curves.yaml", MULTI_CURVE);

    let (code, text) = run(&["plot", path.to_str().unwrap()]);
    assert_eq!(code, 0, "{text}");
    assert!(text.starts_with("Rendered curve container to "));

    let svg = std::fs::read_to_string(dir.path().join("curves.svg")).unwrap();
    for name in ["first", "second", "third"] {
        assert!(svg.contains(&format!(r#"<polyline id="{name}""#)));
    }
}

#[test]
fn index_out_of_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "curves.yaml", MULTI_CURVE);

    let (code, text) = run(&["plot", path.to_str().unwrap(), "--index=4"]);
    assert_eq!(code, 1);
    assert!(text.contains("out of range"), "{text}");
}

#[test]
fn surface_renders_obj_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "patch.yaml", BILINEAR_SURFACE);

    let (code, text) = run(&["plot", path.to_str().unwrap()]);
    assert_eq!(code, 0, "{text}");
    let output = dir.path().join("patch.obj");
    assert_eq!(
        text.trim_end(),
        format!("Rendered surface to {}", output.display())
    );

    let obj = std::fs::read_to_string(output).unwrap();
    let count = |prefix: &str| obj.lines().filter(|l| l.starts_with(prefix)).count();
    // 4x4 evaluated grid plus 2x2 control points
    assert_eq!(count("v "), 16 + 4);
    assert_eq!(count("vn "), 16);
    assert_eq!(count("f "), 2 * 3 * 3);
    // control grid rows and columns
    assert_eq!(count("l "), 2 + 2);
    assert!(obj.contains("o patch\n"));
    assert!(obj.contains("o patch_ctrlpts\n"));

    // every face index refers to an evaluated vertex
    for line in obj.lines().filter(|l| l.starts_with("f ")) {
        for vertex in line.split_whitespace().skip(1) {
            let index: usize = vertex.split("//").next().unwrap().parse().unwrap();
            assert!((1..=16).contains(&index));
        }
    }
}

#[test]
fn explicit_output_path_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("plot.svg");
    let yaml = format!(
        "{}visualization:\n  output: {}\n  bbox: true\n",
        SINGLE_CURVE,
        output.display()
    );
    let path = write_fixture(dir.path(), "spline.yaml", &yaml);

    let (code, text) = run(&["plot", path.to_str().unwrap()]);
    assert_eq!(code, 0, "{text}");
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"id="bbox""#));
}

#[test]
fn unknown_visualization_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!("{}visualization:\n  colour: red\n", SINGLE_CURVE);
    let path = write_fixture(dir.path(), "spline.yaml", &yaml);

    let (code, text) = run(&["plot", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(text.starts_with("An error occurred: Invalid value for `visualization`"), "{text}");
}

#[test]
fn tiny_delta_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "spline.yaml", SINGLE_CURVE);

    let (code, text) = run(&["plot", path.to_str().unwrap(), "--delta=1e-12"]);
    assert_eq!(code, 1);
    assert!(
        text.starts_with("An error occurred: Evaluation delta is too small"),
        "{text}"
    );

    let surface = write_fixture(dir.path(), "patch.yaml", BILINEAR_SURFACE);
    let (code, text) = run(&["plot", surface.to_str().unwrap(), "--delta=0.0001"]);
    assert_eq!(code, 1);
    assert!(text.contains("Evaluation delta is too small"), "{text}");
}

#[test]
fn oversized_surface_dimensions_fail_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    for (name, size_u, size_v) in [
        ("overflow.yaml", "4294967296", "4294967296"),
        ("huge.yaml", "100000000000", "2"),
    ] {
        let yaml = BILINEAR_SURFACE
            .replace("size_u: 2", &format!("size_u: {size_u}"))
            .replace("size_v: 2", &format!("size_v: {size_v}"));
        let path = write_fixture(dir.path(), name, &yaml);
        let (code, text) = run(&["plot", path.to_str().unwrap()]);
        assert_eq!(code, 1, "{name}");
        assert!(
            text.starts_with("An error occurred: Invalid value for `size_u`"),
            "{text}"
        );
    }
}

#[test]
fn index_on_single_shape_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "spline.yaml", SINGLE_CURVE);

    let (code, text) = run(&["plot", path.to_str().unwrap(), "--index=2"]);
    assert_eq!(code, 0, "{text}");
    assert!(text.starts_with("Rendered curve to "));
    let svg = std::fs::read_to_string(dir.path().join("spline.svg")).unwrap();
    assert_eq!(polyline_points(&svg, "spline"), Some(10));
}

#[test]
fn count_above_one_on_single_shape_fails() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = SINGLE_CURVE.replace("  type: curve\n", "  type: curve\n  count: 2\n");
    let path = write_fixture(dir.path(), "spline.yaml", &yaml);

    let (code, text) = run(&["plot", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(
        text.starts_with("An error occurred: Invalid value for `count`"),
        "{text}"
    );
}

#[test]
fn input_file_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "spline.svg", SINGLE_CURVE);

    let (code, text) = run(&["plot", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(text.contains("would overwrite the input file"), "{text}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SINGLE_CURVE);
}
