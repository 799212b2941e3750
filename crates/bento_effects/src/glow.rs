//! Glow field math.
//!
//! Intensity is a pure function of pointer, card rectangle and radius:
//! full inside the proximity threshold, a linear ramp down to the fade
//! distance, zero beyond. Distance is measured from the card's bounding
//! circle (center distance minus half the larger side), floored at zero.

use bento_core::{Point, Rect};

pub use bento_ui::GlowField;

/// Thresholds derived from a spotlight radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightRange {
    /// Spotlight radius.
    pub radius: f32,
    /// Distance within which intensity is 1.
    pub proximity: f32,
    /// Distance beyond which intensity is 0.
    pub fade_distance: f32,
}

impl SpotlightRange {
    /// Derives thresholds: proximity at half the radius, fade at three quarters.
    #[must_use]
    pub fn from_radius(radius: f32) -> Self {
        Self {
            radius,
            proximity: radius * 0.5,
            fade_distance: radius * 0.75,
        }
    }

    /// Intensity at a given clamped distance.
    #[must_use]
    pub fn intensity(&self, distance: f32) -> f32 {
        if distance <= self.proximity {
            1.0
        } else if distance <= self.fade_distance && self.fade_distance > self.proximity {
            (self.fade_distance - distance) / (self.fade_distance - self.proximity)
        } else {
            0.0
        }
    }
}

/// Distance from the pointer to the card's bounding circle, floored at 0.
#[must_use]
pub fn edge_distance(card: &Rect, pointer: Point) -> f32 {
    (pointer.distance(card.center()) - card.max_extent() * 0.5).max(0.0)
}

/// One card's glow for one pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowSample {
    /// Clamped distance used for the intensity.
    pub distance: f32,
    /// Resulting glow parameters.
    pub field: GlowField,
}

/// Computes a card's glow field.
#[must_use]
pub fn glow_field(card: &Rect, pointer: Point, range: &SpotlightRange) -> GlowSample {
    let distance = edge_distance(card, pointer);
    GlowSample {
        distance,
        field: GlowField {
            intensity: range.intensity(distance),
            anchor: card.relative_percent(pointer),
            radius: range.radius,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_table() {
        let range = SpotlightRange::from_radius(400.0);
        assert_eq!(range.proximity, 200.0);
        assert_eq!(range.fade_distance, 300.0);

        assert_eq!(range.intensity(0.0), 1.0);
        assert_eq!(range.intensity(200.0), 1.0);
        assert!((range.intensity(250.0) - 0.5).abs() < 1e-6);
        assert_eq!(range.intensity(300.0), 0.0);
        assert_eq!(range.intensity(500.0), 0.0);
    }

    #[test]
    fn test_intensity_non_increasing() {
        let range = SpotlightRange::from_radius(400.0);
        let mut previous = f32::INFINITY;
        for step in 0..100 {
            let value = range.intensity(step as f32 * 5.0);
            assert!(value <= previous);
            previous = value;
        }
    }

    #[test]
    fn test_edge_distance_clamped_inside_card() {
        let card = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(edge_distance(&card, Point::new(100.0, 50.0)), 0.0);
        // 400 from center, minus half of 200
        assert!((edge_distance(&card, Point::new(500.0, 50.0)) - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_glow_field_anchor_and_radius() {
        let card = Rect::new(100.0, 100.0, 200.0, 200.0);
        let sample = glow_field(&card, Point::new(150.0, 250.0), &SpotlightRange::from_radius(400.0));

        assert_eq!(sample.distance, 0.0);
        assert_eq!(sample.field.intensity, 1.0);
        assert!((sample.field.anchor.x - 25.0).abs() < 1e-4);
        assert!((sample.field.anchor.y - 75.0).abs() < 1e-4);
        assert_eq!(sample.field.radius, 400.0);
    }
}
