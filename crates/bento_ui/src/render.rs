//! The visual parameter channel.
//!
//! Effect units never draw. They submit [`VisualCommand`]s carrying plain
//! numbers to a [`VisualSink`] supplied by the host, which maps them onto
//! whatever it renders with (style properties, a canvas, GPU uniforms).

use bento_core::{Point, PoolHandle};

use crate::animation::Transition;
use crate::style::{Color, GlowColor};

/// Identity of a live particle: owning card plus pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId {
    /// Owning card index.
    pub card: usize,
    /// Slot in the card's particle pool.
    pub slot: PoolHandle,
}

/// Border-glow parameters for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowField {
    /// Glow strength (0-1).
    pub intensity: f32,
    /// Glow center as a percentage of card width/height.
    pub anchor: Point,
    /// Glow radius in host units.
    pub radius: f32,
}

impl GlowField {
    /// Packs the field for GPU upload.
    #[must_use]
    pub fn uniform(&self, color: GlowColor) -> GlowUniform {
        GlowUniform {
            anchor: [self.anchor.x, self.anchor.y],
            intensity: self.intensity,
            radius: self.radius,
            color: color.alpha(1.0).to_array(),
        }
    }
}

/// GPU-side layout of one card's glow.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlowUniform {
    /// Anchor percentage (x, y).
    pub anchor: [f32; 2],
    /// Intensity (0-1).
    pub intensity: f32,
    /// Radius in host units.
    pub radius: f32,
    /// Glow color (RGBA).
    pub color: [f32; 4],
}

/// The single transform slot of a card.
///
/// Tilt writes the rotation and clears the translation; magnetism does the
/// opposite. Whichever is written last wins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardTransform {
    /// Perspective distance for the rotation, `None` for a flat transform.
    pub perspective: Option<f32>,
    /// Rotation about the horizontal axis, in degrees.
    pub rotate_x: f32,
    /// Rotation about the vertical axis, in degrees.
    pub rotate_y: f32,
    /// Horizontal translation.
    pub translate_x: f32,
    /// Vertical translation.
    pub translate_y: f32,
}

impl CardTransform {
    /// Perspective distance used by every rotation.
    pub const PERSPECTIVE: f32 = 1000.0;

    /// A perspective rotation.
    #[must_use]
    pub const fn rotation(rotate_x: f32, rotate_y: f32) -> Self {
        Self {
            perspective: Some(Self::PERSPECTIVE),
            rotate_x,
            rotate_y,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// A flat translation.
    #[must_use]
    pub const fn translation(translate_x: f32, translate_y: f32) -> Self {
        Self {
            perspective: None,
            rotate_x: 0.0,
            rotate_y: 0.0,
            translate_x,
            translate_y,
        }
    }

    /// True when neither rotation nor translation is applied.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.rotate_x == 0.0 && self.rotate_y == 0.0 && self.translate_x == 0.0 && self.translate_y == 0.0
    }
}

/// Look of the ambient spotlight element.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientStyle {
    /// Diameter in host units.
    pub diameter: f32,
    /// Radial gradient stops: (color, position 0-1).
    pub stops: [(Color, f32); 3],
    /// How the host animates opacity changes.
    pub fade: Transition,
    /// How the host animates position changes.
    pub follow: Transition,
}

impl AmbientStyle {
    /// Radial glow of the accent color.
    #[must_use]
    pub fn for_color(color: GlowColor) -> Self {
        Self {
            diameter: 800.0,
            stops: [
                (color.alpha(0.1), 0.0),
                (color.alpha(0.05), 0.2),
                (Color::TRANSPARENT, 0.7),
            ],
            fade: Transition::AMBIENT_OPACITY,
            follow: Transition::AMBIENT_POSITION,
        }
    }
}

/// A visual parameter update for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualCommand {
    /// Create the ambient spotlight element (hidden).
    MountAmbient {
        /// Element look.
        style: AmbientStyle,
    },
    /// Move the ambient spotlight and set its opacity.
    MoveAmbient {
        /// Center position.
        position: Point,
        /// Target opacity.
        opacity: f32,
    },
    /// Set only the ambient spotlight opacity.
    AmbientOpacity {
        /// Target opacity.
        opacity: f32,
    },
    /// Remove the ambient spotlight element.
    UnmountAmbient,
    /// Update a card's border glow.
    CardGlow {
        /// Card index.
        card: usize,
        /// Glow parameters.
        glow: GlowField,
    },
    /// Update a card's transform slot.
    CardTransform {
        /// Card index.
        card: usize,
        /// New transform.
        transform: CardTransform,
        /// How to get there.
        transition: Transition,
    },
    /// Attach a particle under its card, invisible and at zero scale.
    AttachParticle {
        /// Particle identity.
        id: ParticleId,
        /// Position relative to the card.
        position: Point,
        /// Fill color.
        color: Color,
        /// Shadow color.
        shadow: Color,
        /// Diameter in host units.
        diameter: f32,
    },
    /// Update a particle's position, opacity and scale.
    ParticleVisual {
        /// Particle identity.
        id: ParticleId,
        /// Position relative to the card.
        position: Point,
        /// Target opacity.
        opacity: f32,
        /// Target scale.
        scale: f32,
        /// How to get there.
        transition: Transition,
    },
    /// Remove a particle from its card.
    DetachParticle {
        /// Particle identity.
        id: ParticleId,
    },
    /// Show a message in place of the grid.
    Placeholder {
        /// Message text.
        message: String,
    },
}

/// Receiver of visual commands.
pub trait VisualSink {
    /// Accepts one command.
    fn submit(&mut self, command: VisualCommand);
}

/// A sink that records every command in order.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<VisualCommand>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[VisualCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Takes every recorded command, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<VisualCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clears the buffer.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Counts recorded commands matching a predicate.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&VisualCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }
}

impl VisualSink for CommandBuffer {
    fn submit(&mut self, command: VisualCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_buffer_records_in_order() {
        let mut buffer = CommandBuffer::new();
        buffer.submit(VisualCommand::AmbientOpacity { opacity: 0.0 });
        buffer.submit(VisualCommand::UnmountAmbient);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.count(|c| matches!(c, VisualCommand::UnmountAmbient)), 1);

        let taken = buffer.take();
        assert_eq!(taken[0], VisualCommand::AmbientOpacity { opacity: 0.0 });
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_glow_uniform_layout() {
        assert_eq!(std::mem::size_of::<GlowUniform>(), 32);

        let glow = GlowField {
            intensity: 0.5,
            anchor: Point::new(25.0, 75.0),
            radius: 400.0,
        };
        let uniform = glow.uniform(GlowColor::new(255, 255, 255));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniform));

        assert_eq!(floats[..4], [25.0, 75.0, 0.5, 400.0]);
        assert_eq!(floats[4..], [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_ambient_style() {
        let style = AmbientStyle::for_color(GlowColor::DEFAULT);
        assert_eq!(style.diameter, 800.0);
        assert_eq!(style.stops[0].0.a, 0.1);
        assert_eq!(style.stops[2], (Color::TRANSPARENT, 0.7));
        assert_eq!(style.follow.duration, std::time::Duration::from_millis(100));
    }

    #[test]
    fn test_transform_slots() {
        let tilt = CardTransform::rotation(2.0, 2.0);
        assert_eq!(tilt.perspective, Some(1000.0));
        assert_eq!(tilt.translate_x, 0.0);

        let magnet = CardTransform::translation(3.0, -1.0);
        assert_eq!(magnet.perspective, None);
        assert_eq!(magnet.rotate_x, 0.0);

        assert!(CardTransform::default().is_identity());
        assert!(!magnet.is_identity());
    }
}
