//! # Bento Effects
//!
//! Proximity-reactive hover effects for a grid of content cards.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         BENTO GRID                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ResponsiveGate ── one boolean gates everything below        │
//! │                                                              │
//! │  SpotlightTracker ── ambient glow + per-card glow fields     │
//! │  ParticleEmitter  ── per card, timers on the virtual clock   │
//! │  TiltMagnetism    ── per card, single transform slot         │
//! └──────────────────────────────────────────────────────────────┘
//!            │ VisualCommand (numbers only)
//!            ▼
//!        VisualSink (host)
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use bento_effects::{BentoGrid, CardContent, EffectsConfig};
//! use bento_ui::{CommandBuffer, PointerEvent};
//!
//! let mut sink = CommandBuffer::new();
//! let items = vec![CardContent::new("bolt", "01", "Fast", "Sub-millisecond hover feedback")];
//! let config = EffectsConfig::default().with_stars(true);
//! let mut grid = BentoGrid::mount(items, config, 1280.0, &mut sink);
//!
//! grid.handle_pointer(PointerEvent::Enter(0), &mut sink);
//! grid.advance(Duration::from_millis(500), &mut sink);
//! assert!(grid.live_particles(0) > 0);
//!
//! grid.handle_pointer(PointerEvent::Leave(0), &mut sink);
//! grid.advance(Duration::from_millis(300), &mut sink);
//! assert_eq!(grid.live_particles(0), 0);
//! assert_eq!(grid.pending_timers(0), 0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::perf)]

pub mod config;
pub mod content;
pub mod error;
pub mod gate;
pub mod glow;
pub mod grid;
pub mod particles;
pub mod spotlight;
pub mod transform;

pub use config::{EffectsConfig, ParticleTimings};
pub use content::{catalog_from_toml, CardContent, GridContent, PLACEHOLDER_MESSAGE};
pub use error::{ConfigError, ConfigResult};
pub use gate::ResponsiveGate;
pub use glow::{edge_distance, glow_field, GlowField, GlowSample, SpotlightRange};
pub use grid::{BentoGrid, Card, CardFlags};
pub use particles::{EmitterTimer, Particle, ParticleEmitter, ParticleStage, ParticleTemplate, TemplatePool};
pub use spotlight::{SpotlightState, SpotlightTracker, ENGAGED_OPACITY};
pub use transform::TiltMagnetism;
