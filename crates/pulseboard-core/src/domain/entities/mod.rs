//! Domain entities.

mod metric;
mod user;

pub use metric::*;
pub use user::*;
