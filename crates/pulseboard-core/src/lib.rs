//! # Pulseboard Core
//!
//! Core types, domain entities, and error definitions for Pulseboard.
//! Every other crate in the workspace builds on the abstractions here:
//! the typed identifiers, the `User`/`Metric` entities, the result
//! envelope exchanged with data clients, and the unified error type.

pub mod domain;
pub mod envelope;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use envelope::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
