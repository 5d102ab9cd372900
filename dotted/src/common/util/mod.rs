mod number;
mod stats;

pub use number::*;
pub use stats::*;
