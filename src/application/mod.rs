//! Application layer: the runtime collaborator the pools assume.
//!
//! This module defines the `PoolFactory`, which deploys pools and keeps the
//! registry, and the `PoolEngine`, which applies commands one at a time and
//! executes the transfer instructions the pools emit.

pub mod engine;
pub mod factory;
