//! Deterministic, pure logic for growing lines on the lattice.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests; the
//! only source of randomness is the [`draws::DrawSource`] handed in by the
//! caller.

pub mod draws;
pub mod grid;
pub mod invariants;
pub mod line;
pub mod movement;
pub mod scheduler;
pub mod types;
