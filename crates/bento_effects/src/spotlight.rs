//! # Spotlight Tracker
//!
//! One tracker per grid. It owns the ambient spotlight element and a
//! registry of cards, and turns each pointer sample into an ambient move
//! plus one glow update per border-glow card.
//!
//! ```text
//! pointer ──outside section──> ambient opacity 0 (nothing else)
//!    │
//!    └──inside──> glow_field(card) for every card ──min distance──> ambient
//!                         │
//!                         └──> CardGlow for border-glow cards
//! ```

use bento_core::{Point, Rect};
use bento_ui::{AmbientStyle, GlowColor, GlowUniform, VisualCommand, VisualSink};

use crate::glow::{glow_field, GlowField, SpotlightRange};

/// Ambient opacity while the pointer is near a card.
pub const ENGAGED_OPACITY: f32 = 0.6;

/// Ambient element state, alive between mount and unmount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightState {
    /// Last ambient center.
    pub position: Point,
    /// Last ambient opacity.
    pub opacity: f32,
    /// Region the spotlight is active in.
    pub section: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackedCard {
    card: usize,
    rect: Rect,
    border_glow: bool,
    glow: Option<GlowField>,
}

/// Grid-wide pointer listener driving the ambient spotlight and border glows.
#[derive(Debug, Clone)]
pub struct SpotlightTracker {
    range: SpotlightRange,
    color: GlowColor,
    registry: Vec<TrackedCard>,
    state: Option<SpotlightState>,
}

impl SpotlightTracker {
    /// Creates an unmounted tracker.
    #[must_use]
    pub fn new(radius: f32, color: GlowColor) -> Self {
        Self {
            range: SpotlightRange::from_radius(radius),
            color,
            registry: Vec::new(),
            state: None,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn range(&self) -> &SpotlightRange {
        &self.range
    }

    /// Ambient state, `None` while unmounted.
    #[must_use]
    pub const fn state(&self) -> Option<&SpotlightState> {
        self.state.as_ref()
    }

    /// True between mount and unmount.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.state.is_some()
    }

    /// Number of registered cards.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.registry.len()
    }

    /// Creates the ambient element, hidden, bounded to `section`.
    ///
    /// Mounting twice only updates the section.
    pub fn mount<S: VisualSink + ?Sized>(&mut self, section: Rect, sink: &mut S) {
        if let Some(state) = &mut self.state {
            state.section = section;
            return;
        }

        self.state = Some(SpotlightState {
            position: section.center(),
            opacity: 0.0,
            section,
        });
        sink.submit(VisualCommand::MountAmbient {
            style: AmbientStyle::for_color(self.color),
        });
        tracing::info!(cards = self.registry.len(), radius = self.range.radius, "spotlight mounted");
    }

    /// Removes the ambient element. Registered cards are kept.
    pub fn unmount<S: VisualSink + ?Sized>(&mut self, sink: &mut S) {
        if self.state.take().is_some() {
            sink.submit(VisualCommand::UnmountAmbient);
            tracing::info!("spotlight unmounted");
        }
    }

    /// Moves the bounded region.
    pub fn set_section(&mut self, section: Rect) {
        if let Some(state) = &mut self.state {
            state.section = section;
        }
    }

    /// Adds a card, or refreshes it if already registered.
    pub fn register(&mut self, card: usize, rect: Rect, border_glow: bool) {
        match self.registry.iter_mut().find(|tracked| tracked.card == card) {
            Some(tracked) => {
                tracked.rect = rect;
                tracked.border_glow = border_glow;
            }
            None => self.registry.push(TrackedCard {
                card,
                rect,
                border_glow,
                glow: None,
            }),
        }
    }

    /// Updates a registered card's rectangle.
    pub fn update_rect(&mut self, card: usize, rect: Rect) -> bool {
        match self.registry.iter_mut().find(|tracked| tracked.card == card) {
            Some(tracked) => {
                tracked.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Drops a card from the registry.
    pub fn unregister(&mut self, card: usize) -> bool {
        let before = self.registry.len();
        self.registry.retain(|tracked| tracked.card != card);
        self.registry.len() != before
    }

    /// Last glow pushed to a card.
    #[must_use]
    pub fn glow(&self, card: usize) -> Option<GlowField> {
        self.registry
            .iter()
            .find(|tracked| tracked.card == card)
            .and_then(|tracked| tracked.glow)
    }

    /// Packed glows of every border-glow card that has one, for GPU upload.
    #[must_use]
    pub fn glow_uniforms(&self) -> Vec<(usize, GlowUniform)> {
        self.registry
            .iter()
            .filter(|tracked| tracked.border_glow)
            .filter_map(|tracked| tracked.glow.map(|glow| (tracked.card, glow.uniform(self.color))))
            .collect()
    }

    /// Handles one pointer sample.
    ///
    /// Returns true if the pointer was inside the section and glows were
    /// updated. While unmounted this does nothing.
    pub fn on_pointer_move<S: VisualSink + ?Sized>(&mut self, pointer: Point, sink: &mut S) -> bool {
        let Some(state) = &mut self.state else {
            return false;
        };

        if !state.section.contains_inclusive(pointer) {
            state.opacity = 0.0;
            sink.submit(VisualCommand::AmbientOpacity { opacity: 0.0 });
            return false;
        }

        let mut min_distance = f32::INFINITY;
        for tracked in &mut self.registry {
            let sample = glow_field(&tracked.rect, pointer, &self.range);
            min_distance = min_distance.min(sample.distance);
            tracked.glow = Some(sample.field);
        }

        let opacity = if min_distance <= self.range.proximity {
            ENGAGED_OPACITY
        } else {
            0.0
        };
        state.position = pointer;
        state.opacity = opacity;
        sink.submit(VisualCommand::MoveAmbient {
            position: pointer,
            opacity,
        });

        for tracked in self.registry.iter().filter(|tracked| tracked.border_glow) {
            if let Some(glow) = tracked.glow {
                sink.submit(VisualCommand::CardGlow {
                    card: tracked.card,
                    glow,
                });
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_ui::CommandBuffer;

    fn tracker() -> (SpotlightTracker, CommandBuffer) {
        let mut sink = CommandBuffer::new();
        let mut tracker = SpotlightTracker::new(400.0, GlowColor::DEFAULT);
        tracker.register(0, Rect::new(0.0, 0.0, 200.0, 200.0), true);
        tracker.register(1, Rect::new(1000.0, 0.0, 200.0, 200.0), true);
        tracker.mount(Rect::new(0.0, 0.0, 1400.0, 800.0), &mut sink);
        sink.clear();
        (tracker, sink)
    }

    #[test]
    fn test_mount_emits_ambient_once() {
        let mut sink = CommandBuffer::new();
        let mut tracker = SpotlightTracker::new(400.0, GlowColor::DEFAULT);

        tracker.mount(Rect::new(0.0, 0.0, 100.0, 100.0), &mut sink);
        tracker.mount(Rect::new(0.0, 0.0, 200.0, 100.0), &mut sink);

        assert_eq!(sink.count(|c| matches!(c, VisualCommand::MountAmbient { .. })), 1);
        assert_eq!(tracker.state().map(|s| s.section.width), Some(200.0));
        assert_eq!(tracker.state().map(|s| s.opacity), Some(0.0));
    }

    #[test]
    fn test_outside_section_only_hides() {
        let (mut tracker, mut sink) = tracker();
        tracker.on_pointer_move(Point::new(100.0, 100.0), &mut sink);
        let before = tracker.glow(0);
        sink.clear();

        assert!(!tracker.on_pointer_move(Point::new(2000.0, 100.0), &mut sink));

        assert_eq!(sink.commands(), &[VisualCommand::AmbientOpacity { opacity: 0.0 }]);
        assert_eq!(tracker.glow(0), before);
        assert_eq!(tracker.state().map(|s| s.opacity), Some(0.0));
    }

    #[test]
    fn test_inside_near_card_engages() {
        let (mut tracker, mut sink) = tracker();

        assert!(tracker.on_pointer_move(Point::new(100.0, 100.0), &mut sink));

        let state = tracker.state().unwrap();
        assert_eq!(state.opacity, ENGAGED_OPACITY);
        assert_eq!(state.position, Point::new(100.0, 100.0));
        assert_eq!(sink.count(|c| matches!(c, VisualCommand::CardGlow { .. })), 2);

        let near = tracker.glow(0).unwrap();
        assert_eq!(near.intensity, 1.0);
        assert_eq!(near.anchor, Point::new(50.0, 50.0));
        assert_eq!(near.radius, 400.0);
        assert_eq!(tracker.glow(1).unwrap().intensity, 0.0);
    }

    #[test]
    fn test_inside_far_from_cards_stays_dark() {
        let (mut tracker, mut sink) = tracker();

        // Center distance to card 0 is 500, minus 100: edge distance 400.
        assert!(tracker.on_pointer_move(Point::new(100.0, 600.0), &mut sink));
        assert_eq!(tracker.state().unwrap().opacity, 0.0);
        assert!(sink
            .commands()
            .contains(&VisualCommand::MoveAmbient { position: Point::new(100.0, 600.0), opacity: 0.0 }));
    }

    #[test]
    fn test_section_edge_is_inside() {
        let (mut tracker, mut sink) = tracker();
        assert!(tracker.on_pointer_move(Point::new(1400.0, 800.0), &mut sink));
    }

    #[test]
    fn test_glow_only_for_border_glow_cards() {
        let (mut tracker, mut sink) = tracker();
        tracker.register(1, Rect::new(1000.0, 0.0, 200.0, 200.0), false);

        tracker.on_pointer_move(Point::new(1100.0, 100.0), &mut sink);

        assert_eq!(sink.count(|c| matches!(c, VisualCommand::CardGlow { card: 1, .. })), 0);
        assert_eq!(sink.count(|c| matches!(c, VisualCommand::CardGlow { card: 0, .. })), 1);
        // The non-glowing card still counts toward the minimum distance.
        assert_eq!(tracker.state().unwrap().opacity, ENGAGED_OPACITY);
        assert_eq!(tracker.glow_uniforms().len(), 1);
    }

    #[test]
    fn test_unmounted_tracker_ignores_pointer() {
        let (mut tracker, mut sink) = tracker();
        tracker.unmount(&mut sink);
        tracker.unmount(&mut sink);
        assert_eq!(sink.commands(), &[VisualCommand::UnmountAmbient]);

        sink.clear();
        assert!(!tracker.on_pointer_move(Point::new(100.0, 100.0), &mut sink));
        assert!(sink.is_empty());
        assert_eq!(tracker.tracked(), 2);
    }

    #[test]
    fn test_registry_updates() {
        let (mut tracker, _) = tracker();
        assert!(tracker.update_rect(1, Rect::new(0.0, 300.0, 10.0, 10.0)));
        assert!(!tracker.update_rect(7, Rect::ZERO));
        assert!(tracker.unregister(1));
        assert!(!tracker.unregister(1));
        assert_eq!(tracker.tracked(), 1);
    }
}
