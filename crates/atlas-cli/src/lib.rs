//! Interaction shell and rendering for the country registry.

pub mod logging;
pub mod render;
pub mod settings;
pub mod shell;
