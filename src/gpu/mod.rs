//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, shared pipeline
//! boilerplate, and the gradient-map textures used for toon shading.

/// Shared wgpu boilerplate helpers for the scene pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Gradient map textures and their background loader.
pub mod texture;
