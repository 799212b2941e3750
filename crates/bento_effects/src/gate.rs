//! Responsive gate.
//!
//! One boolean switches every effect off: the explicit opt-out, or a
//! viewport at or below the breakpoint.

/// Derived "animations disabled" state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveGate {
    breakpoint: f32,
    explicit_disable: bool,
    width: f32,
}

impl ResponsiveGate {
    /// Creates a gate for the current viewport width.
    #[must_use]
    pub const fn new(breakpoint: f32, explicit_disable: bool, width: f32) -> Self {
        Self {
            breakpoint,
            explicit_disable,
            width,
        }
    }

    /// True when effects must not allocate timers or listeners.
    #[must_use]
    pub fn animations_disabled(&self) -> bool {
        self.explicit_disable || self.width <= self.breakpoint
    }

    /// Last observed viewport width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Records a new viewport width.
    ///
    /// Returns the new state if it flipped.
    pub fn observe_width(&mut self, width: f32) -> Option<bool> {
        let before = self.animations_disabled();
        self.width = width;
        self.flipped(before)
    }

    /// Sets the explicit opt-out.
    ///
    /// Returns the new state if it flipped.
    pub fn set_explicit_disable(&mut self, disabled: bool) -> Option<bool> {
        let before = self.animations_disabled();
        self.explicit_disable = disabled;
        self.flipped(before)
    }

    fn flipped(&self, before: bool) -> Option<bool> {
        let after = self.animations_disabled();
        (after != before).then_some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(ResponsiveGate::new(1024.0, false, 1024.0).animations_disabled());
        assert!(!ResponsiveGate::new(1024.0, false, 1025.0).animations_disabled());
        assert!(ResponsiveGate::new(1024.0, true, 1920.0).animations_disabled());
    }

    #[test]
    fn test_flip_reporting() {
        let mut gate = ResponsiveGate::new(1024.0, false, 1200.0);

        assert_eq!(gate.observe_width(1300.0), None);
        assert_eq!(gate.observe_width(800.0), Some(true));
        assert_eq!(gate.observe_width(700.0), None);
        assert_eq!(gate.observe_width(1100.0), Some(false));
        assert_eq!(gate.set_explicit_disable(true), Some(true));
        assert_eq!(gate.observe_width(600.0), None);
        assert_eq!(gate.width(), 600.0);
    }
}
