//! # Bento Grid
//!
//! Composition root. Owns the cards, the spotlight tracker and the virtual
//! clock every particle timer lives on, and routes host events to them.
//!
//! ```text
//! PointerEvent ──> BentoGrid ──Move──> SpotlightTracker ──> ambient + glows
//!                     │    └──Move──> hovered card TiltMagnetism
//!                     ├──Enter/Leave──> ParticleEmitter + TiltMagnetism
//! resize ──> ResponsiveGate ──flip──> tear down / re-mount
//! advance(dt) ──> Scheduler ──firing.owner──> cards[owner].emitter
//! ```
//!
//! Every operation degrades to a no-op when its target is missing: unknown
//! card index, unmounted card, grid torn down, animations disabled.

use std::time::Duration;

use bento_core::{Rect, Scheduler};
use bento_ui::{
    BentoLayout, CardTransform, GlowUniform, PointerEvent, Transition, ViewportEvent, VisualCommand, VisualSink,
};

use crate::config::EffectsConfig;
use crate::content::{CardContent, GridContent};
use crate::gate::ResponsiveGate;
use crate::particles::{EmitterTimer, ParticleEmitter};
use crate::spotlight::{SpotlightState, SpotlightTracker};
use crate::transform::TiltMagnetism;

/// Capability flags of one card, fixed at mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardFlags {
    /// Hover particles.
    pub particles: bool,
    /// Tracked by the spotlight.
    pub spotlight: bool,
    /// Receives border-glow updates.
    pub border_glow: bool,
    /// Pointer-following tilt.
    pub tilt: bool,
    /// Pointer-following magnetism.
    pub magnetism: bool,
}

impl CardFlags {
    /// Flags every card gets under `config`.
    ///
    /// Tilt and magnetism ride on the particle wrapper, so both need stars.
    #[must_use]
    pub const fn from_config(config: &EffectsConfig) -> Self {
        Self {
            particles: config.stars_enabled,
            spotlight: config.spotlight_enabled,
            border_glow: config.border_glow_enabled,
            tilt: config.stars_enabled && config.tilt_enabled,
            magnetism: config.stars_enabled && config.magnetism_enabled,
        }
    }
}

/// One card of the grid.
#[derive(Debug, Clone)]
pub struct Card {
    index: usize,
    content: CardContent,
    flags: CardFlags,
    rect: Rect,
    emitter: Option<ParticleEmitter>,
    transformer: TiltMagnetism,
    hovered: bool,
    mounted: bool,
}

impl Card {
    fn new(index: usize, content: CardContent, flags: CardFlags, rect: Rect, config: &EffectsConfig) -> Self {
        let emitter = flags.particles.then(|| {
            ParticleEmitter::new(
                index,
                config.particle_count,
                config.glow_color,
                config.timings,
                config.seed,
            )
        });
        Self {
            index,
            content,
            flags,
            rect,
            emitter,
            transformer: TiltMagnetism::new(flags.tilt, flags.magnetism),
            hovered: false,
            mounted: true,
        }
    }

    /// Position in the grid.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// What the card shows.
    #[must_use]
    pub const fn content(&self) -> &CardContent {
        &self.content
    }

    /// Capability flags.
    #[must_use]
    pub const fn flags(&self) -> CardFlags {
        self.flags
    }

    /// Current rectangle in page coordinates.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// The particle emitter, if particles are enabled.
    #[must_use]
    pub const fn emitter(&self) -> Option<&ParticleEmitter> {
        self.emitter.as_ref()
    }

    /// True while the pointer is over the card.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// False once the card has been torn down.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn reset_transform<S: VisualSink + ?Sized>(&self, sink: &mut S) {
        if let Some(transform) = self.transformer.on_leave() {
            sink.submit(card_transform(self.index, transform));
        }
    }
}

fn card_transform(card: usize, transform: CardTransform) -> VisualCommand {
    VisualCommand::CardTransform {
        card,
        transform,
        transition: Transition::CARD_TRANSFORM,
    }
}

/// A mounted card grid with its effects.
#[derive(Debug)]
pub struct BentoGrid {
    config: EffectsConfig,
    layout: BentoLayout,
    gate: ResponsiveGate,
    tracker: Option<SpotlightTracker>,
    clock: Scheduler<EmitterTimer>,
    section: Rect,
    auto_layout: bool,
    placeholder: Option<&'static str>,
    cards: Vec<Card>,
    mounted: bool,
}

impl BentoGrid {
    /// Mounts a grid of `items` on a viewport `viewport_width` wide.
    ///
    /// An empty item list mounts a placeholder with no cards, no tracker
    /// and no timers.
    pub fn mount<S: VisualSink + ?Sized>(
        items: Vec<CardContent>,
        config: EffectsConfig,
        viewport_width: f32,
        sink: &mut S,
    ) -> Self {
        let layout = BentoLayout::default();
        let gate = ResponsiveGate::new(config.breakpoint, config.disable_animations, viewport_width);
        let mut grid = Self {
            layout,
            gate,
            tracker: None,
            clock: Scheduler::new(),
            section: Rect::new(0.0, 0.0, viewport_width.max(0.0), 0.0),
            auto_layout: true,
            placeholder: None,
            cards: Vec::new(),
            mounted: true,
            config,
        };

        let items = match GridContent::from_items(items) {
            GridContent::Placeholder(message) => {
                grid.placeholder = Some(message);
                sink.submit(VisualCommand::Placeholder {
                    message: message.to_owned(),
                });
                tracing::info!("grid mounted without items, showing placeholder");
                return grid;
            }
            GridContent::Cards(items) => items,
        };

        let rects = grid.layout.arrange((0.0, 0.0), viewport_width, items.len());
        if let Some(bounds) = BentoLayout::bounds(&rects) {
            grid.section = bounds;
        }

        let flags = CardFlags::from_config(&grid.config);
        grid.cards = items
            .into_iter()
            .zip(rects)
            .enumerate()
            .map(|(index, (content, rect))| Card::new(index, content, flags, rect, &grid.config))
            .collect();

        if grid.config.spotlight_enabled {
            let mut tracker = SpotlightTracker::new(grid.config.spotlight_radius, grid.config.glow_color);
            for card in grid.cards.iter().filter(|card| card.flags.spotlight) {
                tracker.register(card.index, card.rect, card.flags.border_glow);
            }
            if !grid.gate.animations_disabled() {
                tracker.mount(grid.section, sink);
            }
            grid.tracker = Some(tracker);
        }

        tracing::info!(
            cards = grid.cards.len(),
            disabled = grid.gate.animations_disabled(),
            "grid mounted"
        );
        grid
    }

    /// Routes one pointer event.
    pub fn handle_pointer<S: VisualSink + ?Sized>(&mut self, event: PointerEvent, sink: &mut S) {
        if !self.mounted {
            tracing::trace!(?event, "pointer event after unmount ignored");
            return;
        }

        match event {
            PointerEvent::Move(pointer) => {
                if self.gate.animations_disabled() {
                    return;
                }
                if let Some(tracker) = &mut self.tracker {
                    tracker.on_pointer_move(pointer, sink);
                }
                let over = |card: &&Card| card.hovered && card.rect.contains_inclusive(pointer);
                for card in self.cards.iter().filter(over) {
                    if let Some(transform) = card.transformer.on_move(&card.rect, pointer) {
                        sink.submit(card_transform(card.index, transform));
                    }
                }
            }
            PointerEvent::Enter(index) => self.hover_enter(index, sink),
            PointerEvent::Leave(index) => self.hover_exit(index, sink),
        }
    }

    fn hover_enter<S: VisualSink + ?Sized>(&mut self, index: usize, sink: &mut S) {
        if self.gate.animations_disabled() {
            return;
        }
        let Some(card) = self.cards.get_mut(index).filter(|card| card.mounted) else {
            tracing::trace!(card = index, "enter for unknown card ignored");
            return;
        };
        if card.hovered {
            return;
        }

        card.hovered = true;
        if let Some(emitter) = &mut card.emitter {
            emitter.hover_enter((card.rect.width, card.rect.height), &mut self.clock);
        }
        if let Some(transform) = card.transformer.on_enter() {
            sink.submit(card_transform(index, transform));
        }
    }

    fn hover_exit<S: VisualSink + ?Sized>(&mut self, index: usize, sink: &mut S) {
        let Some(card) = self.cards.get_mut(index).filter(|card| card.hovered) else {
            tracing::trace!(card = index, "leave without enter ignored");
            return;
        };

        card.hovered = false;
        if let Some(emitter) = &mut card.emitter {
            emitter.hover_exit(&mut self.clock, sink);
        }
        card.reset_transform(sink);
    }

    /// Routes one viewport event.
    pub fn handle_viewport<S: VisualSink + ?Sized>(&mut self, event: ViewportEvent, sink: &mut S) {
        match event {
            ViewportEvent::Resize(width) => self.resize(width, sink),
        }
    }

    /// Records a new viewport width, relayouts, and applies a gate flip.
    pub fn resize<S: VisualSink + ?Sized>(&mut self, viewport_width: f32, sink: &mut S) {
        if !self.mounted {
            return;
        }

        let flip = self.gate.observe_width(viewport_width);
        if self.auto_layout {
            self.relayout(viewport_width);
        }
        if let Some(disabled) = flip {
            self.apply_gate(disabled, sink);
        }
    }

    /// Sets the explicit opt-out at runtime.
    pub fn set_animations_disabled<S: VisualSink + ?Sized>(&mut self, disabled: bool, sink: &mut S) {
        if !self.mounted {
            return;
        }
        if let Some(disabled) = self.gate.set_explicit_disable(disabled) {
            self.apply_gate(disabled, sink);
        }
    }

    fn relayout(&mut self, viewport_width: f32) {
        let rects = self.layout.arrange((0.0, 0.0), viewport_width, self.cards.len());
        if let Some(bounds) = BentoLayout::bounds(&rects) {
            self.section = bounds;
        }
        for (card, rect) in self.cards.iter_mut().zip(rects) {
            card.rect = rect;
        }

        if let Some(tracker) = &mut self.tracker {
            tracker.set_section(self.section);
            for card in &self.cards {
                tracker.update_rect(card.index, card.rect);
            }
        }
    }

    fn apply_gate<S: VisualSink + ?Sized>(&mut self, disabled: bool, sink: &mut S) {
        tracing::info!(disabled, width = self.gate.width(), "animation gate flipped");

        if disabled {
            for card in self.cards.iter_mut().filter(|card| card.hovered) {
                card.hovered = false;
                if let Some(emitter) = &mut card.emitter {
                    emitter.hover_exit(&mut self.clock, sink);
                }
                card.reset_transform(sink);
            }
            if let Some(tracker) = &mut self.tracker {
                tracker.unmount(sink);
            }
        } else if let Some(tracker) = &mut self.tracker {
            tracker.mount(self.section, sink);
        }
    }

    /// Advances the virtual clock, dispatching every due particle timer.
    pub fn advance<S: VisualSink + ?Sized>(&mut self, dt: Duration, sink: &mut S) {
        let cards = &mut self.cards;
        self.clock.advance(dt, |clock, firing| {
            match cards.get_mut(firing.owner).and_then(|card| card.emitter.as_mut()) {
                Some(emitter) => emitter.fire(firing.payload, clock, sink),
                None => {
                    tracing::trace!(owner = firing.owner, "timer for a card without emitter dropped");
                }
            }
        });
    }

    /// Tears one card down immediately: particles detached, timers cancelled.
    pub fn unmount_card<S: VisualSink + ?Sized>(&mut self, index: usize, sink: &mut S) {
        let Some(card) = self.cards.get_mut(index).filter(|card| card.mounted) else {
            return;
        };

        if let Some(emitter) = &mut card.emitter {
            emitter.teardown(&mut self.clock, sink);
        }
        if card.hovered {
            card.hovered = false;
            card.reset_transform(sink);
        }
        card.mounted = false;

        let stray = self.clock.cancel_owned(index);
        if stray > 0 {
            tracing::warn!(card = index, stray, "cancelled timers left behind by teardown");
        }
        if let Some(tracker) = &mut self.tracker {
            tracker.unregister(index);
        }
        tracing::debug!(card = index, "card unmounted");
    }

    /// Tears the whole grid down. Afterwards no timer is pending and every
    /// event is ignored.
    pub fn unmount<S: VisualSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.mounted {
            return;
        }

        for index in 0..self.cards.len() {
            self.unmount_card(index, sink);
        }
        if let Some(tracker) = &mut self.tracker {
            tracker.unmount(sink);
        }
        self.clock.clear();
        self.mounted = false;
        tracing::info!("grid unmounted");
    }

    /// Overrides a card's rectangle with a host measurement.
    ///
    /// Disables automatic relayout on resize.
    pub fn set_card_rect(&mut self, index: usize, rect: Rect) {
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        card.rect = rect;
        self.auto_layout = false;
        if let Some(tracker) = &mut self.tracker {
            tracker.update_rect(index, rect);
        }
    }

    /// Overrides the spotlight section with a host measurement.
    ///
    /// Disables automatic relayout on resize.
    pub fn set_section_rect(&mut self, rect: Rect) {
        self.section = rect;
        self.auto_layout = false;
        if let Some(tracker) = &mut self.tracker {
            tracker.set_section(rect);
        }
    }

    /// Attached particles of a card, fading ones included.
    #[must_use]
    pub fn live_particles(&self, index: usize) -> usize {
        self.cards
            .get(index)
            .and_then(Card::emitter)
            .map_or(0, ParticleEmitter::live_count)
    }

    /// Pending timers owned by a card.
    #[must_use]
    pub fn pending_timers(&self, index: usize) -> usize {
        self.clock.pending_for(index)
    }

    /// Pending timers across the grid.
    #[must_use]
    pub fn total_pending_timers(&self) -> usize {
        self.clock.pending()
    }

    /// Ambient spotlight state, `None` while the spotlight is not mounted.
    #[must_use]
    pub fn ambient(&self) -> Option<&SpotlightState> {
        self.tracker.as_ref().and_then(SpotlightTracker::state)
    }

    /// The spotlight tracker, if the spotlight is enabled.
    #[must_use]
    pub const fn tracker(&self) -> Option<&SpotlightTracker> {
        self.tracker.as_ref()
    }

    /// Packed border glows for GPU upload.
    #[must_use]
    pub fn glow_uniforms(&self) -> Vec<(usize, GlowUniform)> {
        self.tracker
            .as_ref()
            .map(SpotlightTracker::glow_uniforms)
            .unwrap_or_default()
    }

    /// Current gate output.
    #[must_use]
    pub fn animations_disabled(&self) -> bool {
        self.gate.animations_disabled()
    }

    /// Card at `index`.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// All cards, in grid order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Spotlight section.
    #[must_use]
    pub const fn section(&self) -> Rect {
        self.section
    }

    /// Placeholder message when mounted without items.
    #[must_use]
    pub const fn placeholder(&self) -> Option<&'static str> {
        self.placeholder
    }

    /// Options the grid was mounted with.
    #[must_use]
    pub const fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Virtual clock time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// False after [`BentoGrid::unmount`].
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_core::Point;
    use bento_ui::CommandBuffer;

    fn items(count: usize) -> Vec<CardContent> {
        (0..count)
            .map(|i| CardContent::new("✦", format!("{:02}", i + 1), format!("Card {i}"), "description"))
            .collect()
    }

    #[test]
    fn test_flags_follow_stars() {
        let config = EffectsConfig::default().with_tilt(true);
        let flags = CardFlags::from_config(&config);
        assert!(!flags.particles && !flags.tilt && !flags.magnetism);
        assert!(flags.spotlight && flags.border_glow);

        let flags = CardFlags::from_config(&config.with_stars(true));
        assert!(flags.particles && flags.tilt && flags.magnetism);
    }

    #[test]
    fn test_empty_items_mount_placeholder() {
        let mut sink = CommandBuffer::new();
        let grid = BentoGrid::mount(Vec::new(), EffectsConfig::default(), 1200.0, &mut sink);

        assert_eq!(grid.placeholder(), Some(crate::content::PLACEHOLDER_MESSAGE));
        assert!(grid.cards().is_empty());
        assert!(grid.ambient().is_none());
        assert_eq!(
            sink.commands(),
            &[VisualCommand::Placeholder {
                message: crate::content::PLACEHOLDER_MESSAGE.to_owned()
            }]
        );
    }

    #[test]
    fn test_mount_lays_out_and_mounts_spotlight() {
        let mut sink = CommandBuffer::new();
        let grid = BentoGrid::mount(items(6), EffectsConfig::default(), 1200.0, &mut sink);

        assert_eq!(grid.cards().len(), 6);
        assert!(grid.ambient().is_some());
        assert_eq!(grid.tracker().map(SpotlightTracker::tracked), Some(6));
        assert_eq!(sink.count(|c| matches!(c, VisualCommand::MountAmbient { .. })), 1);
        assert!(grid.cards().iter().all(|card| grid.section().contains_inclusive(card.rect().center())));
    }

    #[test]
    fn test_mount_below_breakpoint_stays_dark() {
        let mut sink = CommandBuffer::new();
        let mut grid = BentoGrid::mount(items(3), EffectsConfig::default().with_stars(true), 800.0, &mut sink);

        assert!(grid.animations_disabled());
        assert!(grid.ambient().is_none());

        grid.handle_pointer(PointerEvent::Enter(0), &mut sink);
        assert_eq!(grid.total_pending_timers(), 0);
    }

    #[test]
    fn test_hovered_card_follows_pointer() {
        let mut sink = CommandBuffer::new();
        let config = EffectsConfig::default().with_stars(true).with_magnetism(true);
        let mut grid = BentoGrid::mount(items(3), config, 1200.0, &mut sink);
        let rect = grid.card(0).unwrap().rect();

        grid.handle_pointer(PointerEvent::Enter(0), &mut sink);
        sink.clear();
        grid.handle_pointer(PointerEvent::Move(Point::new(rect.right(), rect.bottom())), &mut sink);

        let expected = CardTransform::translation(rect.width * 0.5 * 0.05, rect.height * 0.5 * 0.05);
        assert!(sink.commands().contains(&card_transform(0, expected)));
    }

    #[test]
    fn test_events_for_unknown_cards_are_ignored() {
        let mut sink = CommandBuffer::new();
        let mut grid = BentoGrid::mount(items(2), EffectsConfig::default().with_stars(true), 1200.0, &mut sink);
        sink.clear();

        grid.handle_pointer(PointerEvent::Enter(9), &mut sink);
        grid.handle_pointer(PointerEvent::Leave(9), &mut sink);
        grid.handle_pointer(PointerEvent::Leave(0), &mut sink);
        grid.unmount_card(9, &mut sink);

        assert!(sink.is_empty());
        assert_eq!(grid.total_pending_timers(), 0);
    }

    #[test]
    fn test_host_rects_override_layout() {
        let mut sink = CommandBuffer::new();
        let mut grid = BentoGrid::mount(items(2), EffectsConfig::default(), 1200.0, &mut sink);
        let measured = Rect::new(10.0, 10.0, 50.0, 50.0);

        grid.set_card_rect(1, measured);
        grid.set_section_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        grid.handle_viewport(ViewportEvent::Resize(1300.0), &mut sink);

        assert_eq!(grid.card(1).map(Card::rect), Some(measured));
        assert_eq!(grid.section().width, 100.0);
    }
}
