//! Tilt and magnetism.
//!
//! Both write the card's single transform slot. When both are enabled the
//! magnetism translation is computed last and overwrites the tilt rotation.

use bento_core::{Point, Rect};
use bento_ui::CardTransform;

/// Maximum tilt in degrees at the card edge.
pub const TILT_DEGREES: f32 = 5.0;
/// Rotation applied on hover-enter, in degrees per axis.
pub const LIFT_DEGREES: f32 = 2.0;
/// Fraction of the pointer offset the card follows.
pub const MAGNET_STRENGTH: f32 = 0.05;

/// Per-card pointer-following transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TiltMagnetism {
    /// Perspective rotation toward the pointer.
    pub tilt: bool,
    /// Translation toward the pointer.
    pub magnetism: bool,
}

impl TiltMagnetism {
    /// Creates a transformer.
    #[must_use]
    pub const fn new(tilt: bool, magnetism: bool) -> Self {
        Self { tilt, magnetism }
    }

    /// True when either behaviour is on.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.tilt || self.magnetism
    }

    /// Transform on hover-enter: a small lift when tilting.
    #[must_use]
    pub fn on_enter(&self) -> Option<CardTransform> {
        self.tilt.then(|| CardTransform::rotation(LIFT_DEGREES, LIFT_DEGREES))
    }

    /// Transform for a pointer at page position `pointer` over `card`.
    ///
    /// The offset is clamped to the card, so a sample outside it leans no
    /// further than the nearest edge.
    #[must_use]
    pub fn on_move(&self, card: &Rect, pointer: Point) -> Option<CardTransform> {
        if !self.is_active() {
            return None;
        }

        let local = card.local(pointer);
        let center_x = card.width * 0.5;
        let center_y = card.height * 0.5;
        let offset_x = (local.x - center_x).clamp(-center_x, center_x);
        let offset_y = (local.y - center_y).clamp(-center_y, center_y);

        let mut transform = None;
        if self.tilt {
            let norm_x = if center_x > 0.0 { (offset_x / center_x).clamp(-1.0, 1.0) } else { 0.0 };
            let norm_y = if center_y > 0.0 { (offset_y / center_y).clamp(-1.0, 1.0) } else { 0.0 };
            transform = Some(CardTransform::rotation(-TILT_DEGREES * norm_y, TILT_DEGREES * norm_x));
        }
        if self.magnetism {
            transform = Some(CardTransform::translation(
                offset_x * MAGNET_STRENGTH,
                offset_y * MAGNET_STRENGTH,
            ));
        }
        transform
    }

    /// Transform on hover-exit: back to rest.
    #[must_use]
    pub fn on_leave(&self) -> Option<CardTransform> {
        self.is_active().then(CardTransform::default)
    }
}
