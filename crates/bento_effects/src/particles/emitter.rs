//! Per-card particle emitter.
//!
//! Cancellation is two-layered. Hover-exit clears every tracked timer
//! handle, and every handler re-checks the hover flag before touching a
//! particle, so a firing that slipped past cancellation is a no-op.

use std::f32::consts::PI;
use std::time::Duration;

use bento_core::{Point, PoolHandle, Scheduler, SlotPool, TimerId};
use bento_ui::{GlowColor, ParticleId, Transition, VisualCommand, VisualSink};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ParticleTimings;
use crate::particles::template::{TemplatePool, PARTICLE_DIAMETER};

/// Progress added per float sample.
const PROGRESS_STEP: f32 = 0.01;
/// Maximum float amplitude per axis, either direction.
const MAX_AMPLITUDE: f32 = 50.0;
/// Opacity the float oscillates around (and by).
const FLOAT_OPACITY: f32 = 0.3;
/// Shadow alpha relative to the fill.
const SHADOW_ALPHA: f32 = 0.7;

/// Timer payloads owned by an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterTimer {
    /// Spawn a clone of the template at this index.
    Spawn(usize),
    /// Play the appear transition of a freshly attached particle.
    Enter(PoolHandle),
    /// Take one float sample.
    Float(PoolHandle),
    /// Detach a faded particle.
    Remove(PoolHandle),
}

/// Where a particle is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleStage {
    /// Spawn timer pending; nothing attached yet.
    Scheduled,
    /// Attached, invisible, waiting for the appear transition.
    Spawning,
    /// Visible and floating.
    Active,
    /// Fading out, waiting for detachment.
    Fading,
    /// Detached. Never observed on a live particle.
    Removed,
}

/// A live particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    template: usize,
    origin: Point,
    amplitude: Point,
    progress: f32,
    stage: ParticleStage,
    spawned_at: Duration,
    enter_timer: Option<TimerId>,
    float_timer: Option<TimerId>,
    removal_timer: Option<TimerId>,
}

impl Particle {
    /// Template this particle was cloned from.
    #[must_use]
    pub const fn template(&self) -> usize {
        self.template
    }

    /// Current lifecycle stage.
    #[must_use]
    pub const fn stage(&self) -> ParticleStage {
        self.stage
    }

    /// Float progress (0 at spawn, +0.01 per sample).
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Float amplitude per axis.
    #[must_use]
    pub const fn amplitude(&self) -> Point {
        self.amplitude
    }

    /// Position at the current progress.
    #[must_use]
    pub fn position(&self) -> Point {
        let offset = (self.progress * PI * 2.0).sin() * 0.5 + 0.5;
        Point::new(
            self.origin.x + self.amplitude.x * offset,
            self.origin.y + self.amplitude.y * offset,
        )
    }

    /// Opacity at the current progress, oscillating over 0.0..=0.6.
    #[must_use]
    pub fn float_opacity(&self) -> f32 {
        FLOAT_OPACITY + (self.progress * PI * 4.0).sin() * FLOAT_OPACITY
    }

    fn timers(&self) -> impl Iterator<Item = TimerId> {
        [self.enter_timer, self.float_timer, self.removal_timer]
            .into_iter()
            .flatten()
    }
}

/// Particle lifecycle manager for one card.
///
/// State machine: Idle → Hovering → Idle. Every timer it schedules is
/// tagged with its card index and remembered so it can be cancelled.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    card: usize,
    count: usize,
    color: GlowColor,
    timings: ParticleTimings,
    hovering: bool,
    templates: TemplatePool,
    rng: ChaCha8Rng,
    live: SlotPool<Particle>,
    spawn_timers: Vec<(usize, TimerId)>,
}

impl ParticleEmitter {
    /// Creates an idle emitter for the card at `card`.
    #[must_use]
    pub fn new(card: usize, count: usize, color: GlowColor, timings: ParticleTimings, seed: u64) -> Self {
        let card_seed = seed ^ (card as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            card,
            count,
            color,
            timings,
            hovering: false,
            templates: TemplatePool::new(),
            rng: ChaCha8Rng::seed_from_u64(card_seed),
            live: SlotPool::new(count),
            spawn_timers: Vec::with_capacity(count),
        }
    }

    /// True between hover-enter and hover-exit.
    #[must_use]
    pub const fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Number of attached particles, fading ones included.
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of spawns still waiting on their stagger delay.
    #[must_use]
    pub fn scheduled_spawns(&self) -> usize {
        self.spawn_timers.len()
    }

    /// The template arena.
    #[must_use]
    pub const fn templates(&self) -> &TemplatePool {
        &self.templates
    }

    /// Attached particles.
    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        let card = self.card;
        self.live.iter().map(move |(slot, particle)| (ParticleId { card, slot }, particle))
    }

    /// Stage of every pending spawn and attached particle.
    #[must_use]
    pub fn stages(&self) -> Vec<ParticleStage> {
        std::iter::repeat(ParticleStage::Scheduled)
            .take(self.spawn_timers.len())
            .chain(self.live.iter().map(|(_, particle)| particle.stage))
            .collect()
    }

    /// Hover-enter: generate templates on first use and stagger one spawn per template.
    pub fn hover_enter(&mut self, card_size: (f32, f32), clock: &mut Scheduler<EmitterTimer>) {
        self.hovering = true;
        self.cancel_spawns(clock);

        if self.count == 0 {
            return;
        }

        let templates = self
            .templates
            .get_or_generate(self.count, card_size.0, card_size.1, self.color, &mut self.rng)
            .len();

        for index in 0..templates {
            let id = clock.schedule_once(self.card, self.timings.spawn_delay(index), EmitterTimer::Spawn(index));
            self.spawn_timers.push((index, id));
        }
        tracing::debug!(card = self.card, spawns = templates, "hover enter");
    }

    /// Hover-exit: cancel spawns and floats, fade every particle, detach after the grace period.
    pub fn hover_exit<S: VisualSink + ?Sized>(&mut self, clock: &mut Scheduler<EmitterTimer>, sink: &mut S) {
        self.hovering = false;
        let cancelled = self.cancel_spawns(clock);

        let card = self.card;
        let grace = self.timings.fade_grace();
        let mut fading = 0;
        for (slot, particle) in self.live.iter_mut() {
            if particle.stage == ParticleStage::Fading {
                continue;
            }
            for id in [particle.enter_timer.take(), particle.float_timer.take()].into_iter().flatten() {
                clock.cancel(id);
            }
            particle.stage = ParticleStage::Fading;
            particle.removal_timer = Some(clock.schedule_once(card, grace, EmitterTimer::Remove(slot)));
            sink.submit(VisualCommand::ParticleVisual {
                id: ParticleId { card, slot },
                position: particle.position(),
                opacity: 0.0,
                scale: 0.0,
                transition: Transition::PARTICLE,
            });
            fading += 1;
        }
        tracing::debug!(card, cancelled, fading, "hover exit");
    }

    /// Immediate teardown: cancel everything and detach every particle now.
    pub fn teardown<S: VisualSink + ?Sized>(&mut self, clock: &mut Scheduler<EmitterTimer>, sink: &mut S) {
        self.hovering = false;
        self.cancel_spawns(clock);

        for (slot, particle) in self.live.drain() {
            for id in particle.timers() {
                clock.cancel(id);
            }
            sink.submit(VisualCommand::DetachParticle {
                id: ParticleId { card: self.card, slot },
            });
        }
        tracing::debug!(card = self.card, "emitter torn down");
    }

    /// Handles one of this emitter's timers.
    pub fn fire<S: VisualSink + ?Sized>(
        &mut self,
        timer: EmitterTimer,
        clock: &mut Scheduler<EmitterTimer>,
        sink: &mut S,
    ) {
        match timer {
            EmitterTimer::Spawn(index) => self.spawn(index, clock, sink),
            EmitterTimer::Enter(slot) => self.enter(slot, sink),
            EmitterTimer::Float(slot) => self.float(slot, sink),
            EmitterTimer::Remove(slot) => {
                if let Some(particle) = self.live.get_mut(slot) {
                    particle.removal_timer = None;
                }
                self.detach(slot, clock, sink);
            }
        }
    }

    fn spawn<S: VisualSink + ?Sized>(&mut self, index: usize, clock: &mut Scheduler<EmitterTimer>, sink: &mut S) {
        self.spawn_timers.retain(|(template, _)| *template != index);

        // Late cancellation: the pointer may have left after this was queued.
        if !self.hovering {
            tracing::trace!(card = self.card, index, "spawn dropped after hover exit");
            return;
        }
        let Some(template) = self.templates.get(index).copied() else {
            return;
        };

        if self.live.is_full() {
            self.evict_oldest_fading(clock, sink);
        }

        let amplitude = Point::new(
            (self.rng.gen::<f32>() - 0.5) * MAX_AMPLITUDE * 2.0,
            (self.rng.gen::<f32>() - 0.5) * MAX_AMPLITUDE * 2.0,
        );
        let particle = Particle {
            template: index,
            origin: template.position,
            amplitude,
            progress: 0.0,
            stage: ParticleStage::Spawning,
            spawned_at: clock.now(),
            enter_timer: None,
            float_timer: None,
            removal_timer: None,
        };
        let Some(slot) = self.live.allocate(particle) else {
            tracing::trace!(card = self.card, index, "particle cap reached, spawn skipped");
            return;
        };

        let card = self.card;
        let enter = clock.schedule_once(card, self.timings.enter(), EmitterTimer::Enter(slot));
        let float = clock.schedule_repeating(card, self.timings.float_interval(), EmitterTimer::Float(slot));
        if let Some(particle) = self.live.get_mut(slot) {
            particle.enter_timer = Some(enter);
            particle.float_timer = Some(float);
        }

        sink.submit(VisualCommand::AttachParticle {
            id: ParticleId { card, slot },
            position: template.position,
            color: template.color.alpha(1.0),
            shadow: template.color.alpha(SHADOW_ALPHA),
            diameter: PARTICLE_DIAMETER,
        });
    }

    fn enter<S: VisualSink + ?Sized>(&mut self, slot: PoolHandle, sink: &mut S) {
        let hovering = self.hovering;
        let Some(particle) = self.live.get_mut(slot) else {
            return;
        };
        particle.enter_timer = None;
        if !hovering || particle.stage != ParticleStage::Spawning {
            return;
        }

        particle.stage = ParticleStage::Active;
        sink.submit(VisualCommand::ParticleVisual {
            id: ParticleId { card: self.card, slot },
            position: particle.position(),
            opacity: 1.0,
            scale: 1.0,
            transition: Transition::PARTICLE,
        });
    }

    fn float<S: VisualSink + ?Sized>(&mut self, slot: PoolHandle, sink: &mut S) {
        // A sample that outlived its cancellation does nothing.
        if !self.hovering {
            tracing::trace!(card = self.card, "float tick after hover exit ignored");
            return;
        }
        let Some(particle) = self.live.get_mut(slot) else {
            return;
        };
        if particle.stage == ParticleStage::Fading {
            return;
        }

        particle.progress += PROGRESS_STEP;
        let scale = if particle.stage == ParticleStage::Active { 1.0 } else { 0.0 };
        sink.submit(VisualCommand::ParticleVisual {
            id: ParticleId { card: self.card, slot },
            position: particle.position(),
            opacity: particle.float_opacity(),
            scale,
            transition: Transition::PARTICLE,
        });
    }

    /// Detaches a particle. Detaching one that is already gone is a no-op.
    fn detach<S: VisualSink + ?Sized>(&mut self, slot: PoolHandle, clock: &mut Scheduler<EmitterTimer>, sink: &mut S) -> bool {
        let Some(particle) = self.live.free(slot) else {
            return false;
        };
        for id in particle.timers() {
            clock.cancel(id);
        }
        sink.submit(VisualCommand::DetachParticle {
            id: ParticleId { card: self.card, slot },
        });
        true
    }

    /// Frees a slot for a new spawn by detaching the oldest fading particle early.
    fn evict_oldest_fading<S: VisualSink + ?Sized>(&mut self, clock: &mut Scheduler<EmitterTimer>, sink: &mut S) {
        let oldest = self
            .live
            .iter()
            .filter(|(_, particle)| particle.stage == ParticleStage::Fading)
            .min_by_key(|(slot, particle)| (particle.spawned_at, *slot))
            .map(|(slot, _)| slot);

        if let Some(slot) = oldest {
            tracing::debug!(card = self.card, "evicting fading particle to respect the live cap");
            self.detach(slot, clock, sink);
        }
    }

    fn cancel_spawns(&mut self, clock: &mut Scheduler<EmitterTimer>) -> usize {
        self.spawn_timers
            .drain(..)
            .filter(|(_, id)| clock.cancel(*id))
            .count()
    }
}
