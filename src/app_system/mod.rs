//! System startup, surfaces handed to screens, and shutdown.

pub mod admin_system;
pub mod error;
pub mod telemetry;

pub use admin_system::*;
pub use error::*;
pub use telemetry::*;
