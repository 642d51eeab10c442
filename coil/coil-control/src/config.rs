//! Controller tuning parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning for the ghost controller and transform smoothing.
///
/// # Example
///
/// ```
/// use coil_control::ControlConfig;
///
/// let config = ControlConfig::default().with_rates(0.8, 0.8);
/// assert!((config.yaw_rate - 0.8).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Yaw angular rate (rad/s) at neutral modifiers.
    pub yaw_rate: f64,
    /// Pitch angular rate (rad/s) at neutral modifiers.
    pub pitch_rate: f64,
    /// Twist angular rate (rad/s).
    pub twist_rate: f64,
    /// Tilt angular rate (rad/s).
    pub tilt_rate: f64,
    /// Rate multiplier while the precision modifier is held.
    pub precision_scale: f64,
    /// Rate multiplier while the boost modifier is held.
    pub boost_scale: f64,
    /// Exponential smoothing stiffness for position (1/s).
    pub position_smoothing: f64,
    /// Exponential smoothing stiffness for rotation (1/s).
    pub rotation_smoothing: f64,
    /// Upper clamp on a single tick delta (seconds). Guards against
    /// pathological catch-up after a hitch or a backgrounded tab.
    pub max_tick_delta: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            yaw_rate: 1.2,
            pitch_rate: 1.2,
            twist_rate: 1.6,
            tilt_rate: 1.0,
            precision_scale: 0.25,
            boost_scale: 3.0,
            position_smoothing: 18.0,
            rotation_smoothing: 14.0,
            max_tick_delta: 0.1,
        }
    }
}

impl ControlConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the yaw and pitch movement rates.
    #[must_use]
    pub const fn with_rates(mut self, yaw_rate: f64, pitch_rate: f64) -> Self {
        self.yaw_rate = yaw_rate;
        self.pitch_rate = pitch_rate;
        self
    }

    /// Set the twist and tilt rates.
    #[must_use]
    pub const fn with_orientation_rates(mut self, twist_rate: f64, tilt_rate: f64) -> Self {
        self.twist_rate = twist_rate;
        self.tilt_rate = tilt_rate;
        self
    }

    /// Set the position and rotation smoothing stiffness.
    #[must_use]
    pub const fn with_smoothing(mut self, position: f64, rotation: f64) -> Self {
        self.position_smoothing = position;
        self.rotation_smoothing = rotation;
        self
    }

    /// Set the tick-delta clamp.
    #[must_use]
    pub const fn with_max_tick_delta(mut self, max_tick_delta: f64) -> Self {
        self.max_tick_delta = max_tick_delta;
        self
    }
}
