//! Shared utilities for the scene engine.

/// Smoothed FPS tracking for periodic debug logs.
pub mod frame_timing;
