//! Value objects.

mod role;
mod trend;

pub use role::*;
pub use trend::*;
