//! # Effect Configuration
//!
//! Every option the grid recognises, with the defaults the effects were
//! tuned for. Loaded from TOML:
//!
//! ```toml
//! stars_enabled = true
//! spotlight_radius = 300
//! glow_color = "132, 0, 255"
//!
//! [timings]
//! fade_grace_ms = 300
//! ```

use std::path::Path;
use std::time::Duration;

use bento_ui::GlowColor;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default number of particle templates per card.
pub const DEFAULT_PARTICLE_COUNT: usize = 15;
/// Default spotlight radius in host units.
pub const DEFAULT_SPOTLIGHT_RADIUS: f32 = 400.0;
/// Default viewport width at or below which animations switch off.
pub const DEFAULT_BREAKPOINT: f32 = 1024.0;
/// Default template seed.
pub const DEFAULT_SEED: u64 = 0x5EED_BE70;

/// Grid-wide effect options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Hover particles (and with them tilt and magnetism).
    pub stars_enabled: bool,
    /// Grid-wide ambient spotlight.
    pub spotlight_enabled: bool,
    /// Per-card border glow.
    pub border_glow_enabled: bool,
    /// Switch every effect off regardless of viewport.
    pub disable_animations: bool,
    /// Spotlight radius in host units.
    pub spotlight_radius: f32,
    /// Particle templates per card, and the live cap.
    pub particle_count: usize,
    /// Pointer-following tilt.
    pub tilt_enabled: bool,
    /// Pointer-following magnetism.
    pub magnetism_enabled: bool,
    /// Accent color.
    pub glow_color: GlowColor,
    /// Viewport width at or below which animations switch off.
    pub breakpoint: f32,
    /// Seed for template positions and float amplitudes.
    pub seed: u64,
    /// Particle timings.
    pub timings: ParticleTimings,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            stars_enabled: false,
            spotlight_enabled: true,
            border_glow_enabled: true,
            disable_animations: false,
            spotlight_radius: DEFAULT_SPOTLIGHT_RADIUS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            tilt_enabled: false,
            magnetism_enabled: true,
            glow_color: GlowColor::DEFAULT,
            breakpoint: DEFAULT_BREAKPOINT,
            seed: DEFAULT_SEED,
            timings: ParticleTimings::default(),
        }
    }
}

impl EffectsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and the validation
    /// errors of [`EffectsConfig::validate`].
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EffectsConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks numeric ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidRadius`] or [`ConfigError::InvalidBreakpoint`].
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.spotlight_radius.is_finite() || self.spotlight_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.spotlight_radius));
        }
        if !self.breakpoint.is_finite() || self.breakpoint < 0.0 {
            return Err(ConfigError::InvalidBreakpoint(self.breakpoint));
        }
        Ok(())
    }

    /// Sets the glow color from its `r,g,b` text form.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGlowColor`] if the text is not a valid triple.
    pub fn with_glow_color(mut self, raw: &str) -> ConfigResult<Self> {
        self.glow_color = raw.parse()?;
        Ok(self)
    }

    /// Enables particles.
    #[must_use]
    pub const fn with_stars(mut self, enabled: bool) -> Self {
        self.stars_enabled = enabled;
        self
    }

    /// Sets the particle count.
    #[must_use]
    pub const fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Enables tilt.
    #[must_use]
    pub const fn with_tilt(mut self, enabled: bool) -> Self {
        self.tilt_enabled = enabled;
        self
    }

    /// Enables magnetism.
    #[must_use]
    pub const fn with_magnetism(mut self, enabled: bool) -> Self {
        self.magnetism_enabled = enabled;
        self
    }
}

/// Particle lifecycle timings in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTimings {
    /// Delay between successive template spawns.
    pub stagger_ms: u64,
    /// Delay from attach to the appear transition.
    pub enter_ms: u64,
    /// Float sampling period.
    pub float_interval_ms: u64,
    /// Grace period between fade-out and detachment.
    pub fade_grace_ms: u64,
}

impl Default for ParticleTimings {
    fn default() -> Self {
        Self {
            stagger_ms: 100,
            enter_ms: 10,
            float_interval_ms: 50,
            fade_grace_ms: 300,
        }
    }
}

impl ParticleTimings {
    /// Spawn delay of the template at `index`.
    #[must_use]
    pub fn spawn_delay(&self, index: usize) -> Duration {
        Duration::from_millis(self.stagger_ms.saturating_mul(index as u64))
    }

    /// Delay from attach to the appear transition.
    #[must_use]
    pub const fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    /// Float sampling period.
    #[must_use]
    pub const fn float_interval(&self) -> Duration {
        Duration::from_millis(self.float_interval_ms)
    }

    /// Grace period between fade-out and detachment.
    #[must_use]
    pub const fn fade_grace(&self) -> Duration {
        Duration::from_millis(self.fade_grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EffectsConfig::default();
        assert_eq!(config.spotlight_radius, 400.0);
        assert_eq!(config.particle_count, 15);
        assert_eq!(config.glow_color, GlowColor::new(93, 205, 219));
        assert_eq!(config.breakpoint, 1024.0);
        assert!(config.spotlight_enabled);
        assert!(!config.stars_enabled);
        assert_eq!(config.timings.spawn_delay(3), Duration::from_millis(300));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EffectsConfig::from_toml_str(
            r#"
            stars_enabled = true
            particle_count = 4
            glow_color = "132, 0, 255"

            [timings]
            fade_grace_ms = 500
            "#,
        )
        .unwrap();

        assert!(config.stars_enabled);
        assert_eq!(config.particle_count, 4);
        assert_eq!(config.glow_color, GlowColor::new(132, 0, 255));
        assert_eq!(config.timings.fade_grace_ms, 500);
        assert_eq!(config.timings.stagger_ms, 100);
        assert_eq!(config.spotlight_radius, 400.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EffectsConfig::from_toml_str("spotlight_radius = 0.0"),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            EffectsConfig::from_toml_str("breakpoint = -1.0"),
            Err(ConfigError::InvalidBreakpoint(_))
        ));
        assert!(matches!(
            EffectsConfig::from_toml_str("glow_color = \"red\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EffectsConfig::default().with_glow_color("1,2"),
            Err(ConfigError::InvalidGlowColor(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EffectsConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
