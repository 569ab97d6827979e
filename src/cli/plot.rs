use std::{io::Write, path::PathBuf};

use clap::Parser;

use crate::{
    exchange::{build_nurbs_shape, read_yaml_file, select_build_function, BuildOptions, ShapeDescriptor},
    render::Visualization,
};

use super::CommandError;

pub(crate) const PLOT_USAGE: &str = "\
PLOT: Plots single or multi NURBS curves or surfaces

\"geomdl plot\" takes a YAML file as the input. The file can contain a single shape or a list of shapes
under `shape.data`, and an optional `visualization` mapping controlling the output.

Usage:

    geomdl plot {yaml file}                             plots the shape defined in the YAML file
    geomdl plot {yaml file} --delta=0.1                 plots the shape using the evaluation delta of 0.1
    geomdl plot {yaml file} --index=2                   plots the 2nd shape defined in the YAML file
    geomdl plot {yaml file} --index=1 --delta=0.025     plots the 1st shape using the evaluation delta of 0.025

Available parameters:
    --help      displays this message
    --index=n   plots n-th curve or surface in the YAML file (works only for multi shapes)
    --delta=d   overrides the evaluation delta defined in the YAML file, 0.0 < d < 1.0
";

/// Arguments following `geomdl plot`
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct PlotArgs {
    /// shape file
    yaml_file: PathBuf,
    /// 1-based index of the shape to plot
    #[arg(long)]
    index: Option<usize>,
    /// evaluation delta override
    #[arg(long, allow_negative_numbers = true)]
    delta: Option<f64>,
}

impl PlotArgs {
    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            delta: self.delta,
            index: self.index,
        }
    }
}

/// `geomdl plot <yaml_file> [--index=n] [--delta=d]`
pub(crate) fn command_plot(args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
    if args.iter().any(|a| a == "--help") {
        write!(out, "{PLOT_USAGE}")?;
        return Ok(());
    }

    let options = PlotArgs::try_parse_from(args).map_err(argument_error)?;
    log::debug!("plot options: {options:?}");

    let document = read_yaml_file(&options.yaml_file)?;
    let descriptor = ShapeDescriptor::from_document(&document)?;
    let builder = select_build_function(&descriptor)?;
    let shape = build_nurbs_shape(&descriptor, builder, &options.build_options())?;

    let vis = Visualization::try_new(descriptor.visualization().clone(), &options.yaml_file)?;
    let path = shape.render(&vis)?;
    writeln!(out, "Rendered {} to {}", shape.kind(), path.display())?;
    Ok(())
}

/// First line of a clap error without its `error: ` prefix
fn argument_error(e: clap::Error) -> CommandError {
    let text = e.to_string();
    let line = text.lines().next().unwrap_or_default();
    CommandError::Failed(line.trim_start_matches("error: ").to_string())
}
