//! SII decode front end: wires the core state machine to the engine.
pub mod platform;
