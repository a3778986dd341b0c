//! Service layer for orchestration
//!
//! This module contains the service layer that drives descriptor
//! generation and rendering, separating concerns from the CLI layer in
//! main.rs.

pub mod render;

pub use render::{RenderConfig, RenderResult, RenderService};
