pub mod binomial;
pub mod evaluation_delta;
pub mod floating_point;
pub mod homogeneous;

pub use binomial::*;
pub use evaluation_delta::*;
pub use floating_point::*;
pub use homogeneous::*;
