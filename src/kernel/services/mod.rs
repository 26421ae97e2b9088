//! Services layer (ports + adapters).
//!
//! - `ports`: contracts the surface and target depend on.
//! - `adapters`: headless implementations and config file IO.

pub mod adapters;
pub mod ports;
