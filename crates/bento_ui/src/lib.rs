//! # Bento UI
//!
//! Everything the effect engine says to, and hears from, the host page.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      VISUAL CHANNEL                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  PointerEvent / Resize → Effects Engine → VisualCommand      │
//! │          ↓                     ↓                ↓            │
//! │     host listeners      numbers only      VisualSink impl    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine computes opacity, position, rotation, translation, anchor
//! percentages, intensity and radius. How those become pixels is the host's
//! business.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::perf)]

pub mod animation;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;

pub use animation::{Easing, Transition};
pub use input::{PointerEvent, ViewportEvent};
pub use layout::BentoLayout;
pub use render::{AmbientStyle, CardTransform, CommandBuffer, GlowField, GlowUniform, ParticleId, VisualCommand, VisualSink};
pub use style::{Color, GlowColor, ParseColorError};
