//! Library components for gridctl.

pub mod logging;
pub mod render;
pub mod report;
