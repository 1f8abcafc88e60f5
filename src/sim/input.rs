//! Per-tick input snapshot.

/// Abstract controls, read once per tick by whoever owns the input device.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Rotation input in `[-1, 1]`; positive turns counter-clockwise.
    pub rotate: f32,
    /// Forward thrust in `[0, 1]`.
    pub thrust: f32,
    /// Fire a projectile this tick.
    pub fire: bool,
    /// Fire the laser this tick.
    pub laser: bool,
}

impl InputFrame {
    /// Clamp analog values into their nominal ranges.
    pub fn sanitized(self) -> Self {
        Self {
            rotate: finite_or_zero(self.rotate).clamp(-1.0, 1.0),
            thrust: finite_or_zero(self.thrust).clamp(0.0, 1.0),
            ..self
        }
    }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
