use std::path::PathBuf;

use serde::Deserialize;

/// Output format of a rendered shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// projected 2D drawing
    #[default]
    Svg,
    /// Wavefront mesh / polyline file
    Obj,
}

impl Backend {
    /// File extension of the backend output
    pub fn extension(&self) -> &'static str {
        match self {
            Backend::Svg => "svg",
            Backend::Obj => "obj",
        }
    }
}

/// Direction the shape is viewed from in 2D backends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Iso,
    Xy,
    Xz,
    Yz,
}

/// Visualization options read from the `visualization` mapping of a shape file
/// every key is optional
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisConfig {
    pub backend: Backend,
    /// output file, defaults to the input file with the backend extension
    pub output: Option<PathBuf>,
    /// draw the control polygon / grid
    pub ctrlpts: bool,
    /// draw the evaluated curve or surface
    pub evalpts: bool,
    /// draw the bounding box of the control points
    pub bbox: bool,
    pub legend: bool,
    pub axes: bool,
    /// width and height of the figure in pixels
    pub figure_size: [u32; 2],
    pub view: View,
    pub line_width: f64,
    pub ctrlpts_color: String,
    /// colors of the evaluated shapes, cycled when there are more shapes than colors
    pub evalpts_color: Vec<String>,
}

/// Default shape colors
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            output: None,
            ctrlpts: true,
            evalpts: true,
            bbox: false,
            legend: true,
            axes: true,
            figure_size: [800, 600],
            view: View::default(),
            line_width: 1.5,
            ctrlpts_color: "#555555".to_string(),
            evalpts_color: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl VisConfig {
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_ctrlpts(mut self, ctrlpts: bool) -> Self {
        self.ctrlpts = ctrlpts;
        self
    }

    pub fn with_evalpts(mut self, evalpts: bool) -> Self {
        self.evalpts = evalpts;
        self
    }

    pub fn with_bbox(mut self, bbox: bool) -> Self {
        self.bbox = bbox;
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Check the values that serde cannot
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.figure_size.iter().all(|s| *s > 0),
            "Figure size must be positive, got {}x{}",
            self.figure_size[0],
            self.figure_size[1]
        );
        anyhow::ensure!(
            self.line_width > 0.,
            "Line width must be positive, got {}",
            self.line_width
        );
        anyhow::ensure!(
            !self.evalpts_color.is_empty(),
            "At least one evaluated shape color is required"
        );
        Rgb::parse(&self.ctrlpts_color)?;
        for color in self.evalpts_color.iter() {
            Rgb::parse(color)?;
        }
        Ok(())
    }

    /// Color of the `index`-th shape
    pub fn shape_color(&self, index: usize) -> &str {
        &self.evalpts_color[index % self.evalpts_color.len()]
    }
}

/// 8-bit RGB color parsed from `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn parse(hex: &str) -> anyhow::Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| anyhow::anyhow!("Invalid color {:?}, expected #rrggbb", hex))?;
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| anyhow::anyhow!("Invalid color {:?}, expected #rrggbb", hex))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Scale the color towards black, `factor` in [0, 1]
    pub fn shade(&self, factor: f64) -> Self {
        let f = factor.clamp(0., 1.);
        let scale = |c: u8| (c as f64 * f).round() as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
