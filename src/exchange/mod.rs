pub mod error;
pub mod yaml;

pub use error::*;
pub use yaml::*;
