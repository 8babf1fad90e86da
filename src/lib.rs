//! Core state and update logic for the volcano-dash arcade game.
//!
//! Everything here is pure and synchronous: the binary owns the frame loop,
//! the terminal, and the RNG, and drives these modules once per frame and
//! once per key press.

pub mod compute;
pub mod entities;
