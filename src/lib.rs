//! rte-surface - headless rich-text editing surface core
//!
//! Module layout:
//! - core: primitives (events, bus, triggers, commands, geometry, instances)
//! - models: document, selection, history, surface model
//! - views: surface view and context menu
//! - kernel: surface controller, actions, progress, host services
//! - app: targets that embed surfaces

pub mod app;
pub mod core;
pub mod kernel;
pub mod models;
pub mod views;
