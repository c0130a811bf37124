// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
#![allow(clippy::cargo_common_metadata)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven, toon-shaded 3D scene built on wgpu.
//!
//! Three meshes (torus, cone, torus knot) are stacked vertically, one per
//! page section, above a field of particles. Scrolling moves the camera
//! down the stack and spins the mesh of each newly reached section; the
//! cursor drives a smoothed parallax offset of the camera group.
//!
//! # Key entry points
//!
//! - [`state::SceneState`] - the shared context every input handler and
//!   the frame update operate on
//! - [`engine::RunLoop`] - the per-frame driver with an explicit stop
//!   signal
//! - [`engine::SceneEngine`] - GPU-backed engine (surface, renderer, state)
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Input events ([`input::InputEvent`]) are applied to the
//! [`state::SceneState`] by the [`input::InputProcessor`] as they arrive.
//! Every display refresh the [`engine::RunLoop`] samples the clock, steps
//! in-flight section tweens, runs the [`engine::FrameUpdater`] and hands
//! the state to the renderer. Everything happens on one thread; each
//! callback runs to completion before the next.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod gui;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{RunLoop, SceneEngine};
pub use error::SceneError;
pub use input::{InputEvent, InputProcessor};
pub use options::Options;
pub use state::SceneState;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
