//! Seeded generative line drawing on a lattice.
//!
//! A drawing starts with a diagonal trunk from the origin, followed by a fan
//! of secondary lines that wander, take orthogonal detours, and occasionally
//! spawn a branch. Every line claims lattice points in a shared occupancy
//! grid, so no two lines ever cross.
//!
//! - **[`core`]**: Pure, deterministic growth logic (movement, line state
//!   machine, invariant checks). No I/O; randomness enters through a trait.
//! - **[`io`]**: Config files, SVG output, and session manifests.
//!
//! [`session`] drives the core step by step and is what the CLI calls.

pub mod core;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
