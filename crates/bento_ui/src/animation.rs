//! Easing curves and transitions attached to visual commands.
//!
//! The engine decides *what* a value should become; the transition tells the
//! host *how* to get there.

use std::time::Duration;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Exponential ease-out (sharp snap to target).
    ExponentialOut,
    /// Standard ease curve, `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    #[default]
    Ease,
    /// Ease-out, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// Arbitrary cubic bezier with control points (x1, y1) and (x2, y2).
    CubicBezier(f32, f32, f32, f32),
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Overshooting pop used when particles appear and vanish.
    pub const BACK_OUT: Self = Self::CubicBezier(0.34, 1.56, 0.64, 1.0);
}

/// How the host should move a value to its new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Transition length.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl Transition {
    /// Particle appear/fade: 300ms overshooting pop.
    pub const PARTICLE: Self = Self::new(Duration::from_millis(300), Easing::BACK_OUT);
    /// Card tilt/magnetism: 300ms ease-out.
    pub const CARD_TRANSFORM: Self = Self::new(Duration::from_millis(300), Easing::EaseOut);
    /// Ambient spotlight opacity: 300ms ease.
    pub const AMBIENT_OPACITY: Self = Self::new(Duration::from_millis(300), Easing::Ease);
    /// Ambient spotlight position: 100ms ease.
    pub const AMBIENT_POSITION: Self = Self::new(Duration::from_millis(100), Easing::Ease);
    /// Jump straight to the target.
    pub const NONE: Self = Self::new(Duration::ZERO, Easing::Instant);

    /// Creates a transition.
    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}
