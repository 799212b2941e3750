//! Particle prototypes.

use bento_core::Point;
use bento_ui::GlowColor;
use rand::Rng;

/// Diameter of a particle in host units.
pub const PARTICLE_DIAMETER: f32 = 10.0;

/// One particle prototype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleTemplate {
    /// Spawn position relative to the card.
    pub position: Point,
    /// Fill color.
    pub color: GlowColor,
}

/// Immutable arena of prototypes, generated lazily at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplatePool {
    templates: Option<Box<[ParticleTemplate]>>,
}

impl TemplatePool {
    /// Creates an empty, ungenerated pool.
    #[must_use]
    pub const fn new() -> Self {
        Self { templates: None }
    }

    /// True once the prototypes exist.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.templates.is_some()
    }

    /// Returns the prototypes, generating `count` of them on first call.
    ///
    /// Positions are uniform within a `width` x `height` card. Later calls
    /// return the same prototypes and do not touch `rng`.
    pub fn get_or_generate<R: Rng>(
        &mut self,
        count: usize,
        width: f32,
        height: f32,
        color: GlowColor,
        rng: &mut R,
    ) -> &[ParticleTemplate] {
        self.templates.get_or_insert_with(|| {
            tracing::debug!(count, width, height, "generating particle templates");
            (0..count)
                .map(|_| ParticleTemplate {
                    position: Point::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
                    color,
                })
                .collect()
        })
    }

    /// The prototypes, empty until generated.
    #[must_use]
    pub fn templates(&self) -> &[ParticleTemplate] {
        self.templates.as_deref().unwrap_or(&[])
    }

    /// Prototype at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParticleTemplate> {
        self.templates().get(index)
    }
}
