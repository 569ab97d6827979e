#![allow(clippy::needless_range_loop)]

mod bounding_box;
pub mod cli;
mod curve;
pub mod exchange;
mod knot;
mod misc;
pub mod render;
mod shape;
mod surface;
mod tessellation;

pub use cli::run;

pub mod prelude {
    pub use crate::bounding_box::*;
    pub use crate::curve::*;
    pub use crate::knot::*;
    pub use crate::misc::*;
    pub use crate::render::{Backend, View, VisConfig, Visualization};
    pub use crate::shape::*;
    pub use crate::surface::*;
    pub use crate::tessellation::*;
}
