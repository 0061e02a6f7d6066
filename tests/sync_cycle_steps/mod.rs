//! Step definitions for sync cycle BDD scenarios.

pub mod given;
pub mod then;
pub mod world;
