pub mod regular_tessellation_option;
pub mod surface_tessellation;

pub use regular_tessellation_option::*;
pub use surface_tessellation::*;

/// A trait for tessellating a shape
pub trait Tessellation<Opt> {
    type Output;
    fn tessellate(&self, options: Opt) -> Self::Output;
}
