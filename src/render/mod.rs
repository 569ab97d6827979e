pub mod obj;
pub mod projection;
pub mod scene;
pub mod svg;
pub mod vis_config;

pub use obj::*;
pub use projection::*;
pub use scene::*;
pub use svg::*;
pub use vis_config::*;

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::shape::Shape;

/// A trait for turning a scene into a document of some output format
pub trait Renderer {
    fn render(&self, scene: &Scene, config: &VisConfig) -> anyhow::Result<String>;
}

impl Backend {
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            Backend::Svg => Box::new(SvgRenderer),
            Backend::Obj => Box::new(ObjRenderer),
        }
    }
}

/// Visualization settings bound to an output file
#[derive(Clone, Debug)]
pub struct Visualization {
    config: VisConfig,
    output: PathBuf,
}

impl Visualization {
    /// Bind the configuration to its output file
    /// `input` is the shape file, used to derive the output name when the configuration has none
    /// # Failures
    /// - if the configuration is invalid
    /// - if the output file is the input file
    pub fn try_new(config: VisConfig, input: &Path) -> anyhow::Result<Self> {
        config.validate()?;
        let output = config
            .output
            .clone()
            .unwrap_or_else(|| input.with_extension(config.backend.extension()));
        let same_file = output == input
            || matches!(
                (output.canonicalize(), input.canonicalize()),
                (Ok(a), Ok(b)) if a == b
            );
        anyhow::ensure!(
            !same_file,
            "Output file {} would overwrite the input file",
            output.display()
        );
        Ok(Self { config, output })
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Render the shape and write it to the output file
    pub fn render(&self, shape: &Shape) -> anyhow::Result<PathBuf> {
        let scene = Scene::try_new(shape, &self.config)?;
        let document = self.config.backend.renderer().render(&scene, &self.config)?;

        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory {}", parent.display()))?;
        }
        std::fs::write(&self.output, document)
            .with_context(|| format!("Cannot write {}", self.output.display()))?;

        log::info!(
            "rendered {} ({} item(s)) to {}",
            shape.kind(),
            scene.items().len(),
            self.output.display()
        );
        Ok(self.output.clone())
    }
}
