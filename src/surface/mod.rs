pub mod nurbs_surface;
pub use nurbs_surface::*;

#[cfg(test)]
mod tests;
