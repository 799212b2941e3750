//! # Bento Core
//!
//! Primitives shared by every effect unit:
//! - [`geometry`]: points and rectangles in host coordinates
//! - [`memory`]: fixed-capacity pools with generation-checked handles
//! - [`clock`]: the virtual clock that owns every delayed and repeating action
//!
//! ## Time Model
//!
//! ```text
//! host frame ──advance(dt)──> Scheduler ──due firings──> effect units
//!                                 ▲                          │
//!                                 └──schedule / cancel───────┘
//! ```
//!
//! Nothing in this crate reads the wall clock. The host decides how fast time
//! moves, which keeps every effect deterministic under test.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::perf)]

pub mod clock;
pub mod geometry;
pub mod memory;

pub use clock::{Firing, Scheduler, TimerId};
pub use geometry::{Point, Rect};
pub use memory::{PoolHandle, SlotPool};
