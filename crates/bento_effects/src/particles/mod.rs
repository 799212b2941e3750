//! # Hover Particles
//!
//! Per-card particle lifecycle on the virtual clock.
//!
//! ## Lifecycle
//!
//! ```text
//! hover-enter ──stagger i×100ms──> Scheduled ──spawn──> Spawning ──10ms──> Active
//!                                      │                   │                 │
//!                                      └──hover-exit: cancelled   fade ──────┴──> Fading ──300ms──> Removed
//! ```
//!
//! Templates are generated once per card, on the first hover, and cloned on
//! every spawn. Live clones sit in a fixed-capacity pool sized to the
//! template count, so the live cap holds by construction.

pub mod emitter;
pub mod template;

pub use emitter::{EmitterTimer, Particle, ParticleEmitter, ParticleStage};
pub use template::{ParticleTemplate, TemplatePool};
