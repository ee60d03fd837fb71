//! # Pulseboard Store
//!
//! The dashboard state container. State only changes through [`reduce`],
//! a pure function over [`Action`]s; [`DashboardStore`] runs the async
//! intents against a [`DataClient`](pulseboard_client::DataClient) and
//! publishes every new [`DashboardState`] snapshot to its observers.

mod action;
mod locks;
mod reducer;
mod state;
mod store;

pub use action::*;
pub use locks::*;
pub use reducer::*;
pub use state::*;
pub use store::*;
