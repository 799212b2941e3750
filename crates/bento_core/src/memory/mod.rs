//! # Memory Management
//!
//! Fixed-capacity storage for short-lived objects such as live particles.

pub mod pool;

pub use pool::{PoolHandle, SlotPool};
