//! Logical input actions and key state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The ten logical control actions.
///
/// Actions are head-relative by construction: `MoveUp` always moves the coil
/// toward the vertex of the head and `MoveLeft` always circles it leftward,
/// regardless of where the camera sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlAction {
    /// Increase pitch (toward the vertex).
    MoveUp,
    /// Decrease pitch (toward the rim).
    MoveDown,
    /// Increase yaw (leftward around the head).
    MoveLeft,
    /// Decrease yaw (rightward around the head).
    MoveRight,
    /// Rotate the coil counter-clockwise about the surface normal.
    TwistLeft,
    /// Rotate the coil clockwise about the surface normal.
    TwistRight,
    /// Lean the coil forward.
    TiltForward,
    /// Lean the coil backward.
    TiltBackward,
    /// Modifier: scale rates down for fine positioning.
    Precision,
    /// Modifier: scale rates up for coarse travel.
    Boost,
}

impl ControlAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::MoveUp,
        Self::MoveDown,
        Self::MoveLeft,
        Self::MoveRight,
        Self::TwistLeft,
        Self::TwistRight,
        Self::TiltForward,
        Self::TiltBackward,
        Self::Precision,
        Self::Boost,
    ];

    const fn index(self) -> usize {
        match self {
            Self::MoveUp => 0,
            Self::MoveDown => 1,
            Self::MoveLeft => 2,
            Self::MoveRight => 3,
            Self::TwistLeft => 4,
            Self::TwistRight => 5,
            Self::TiltForward => 6,
            Self::TiltBackward => 7,
            Self::Precision => 8,
            Self::Boost => 9,
        }
    }
}

/// Boolean key state for the logical actions.
///
/// The embedding UI translates physical keys to actions and feeds the
/// resulting state in once per tick.
///
/// # Example
///
/// ```
/// use coil_control::{ControlAction, InputState};
///
/// let mut input = InputState::new();
/// input.press(ControlAction::MoveLeft);
/// assert!((input.yaw_axis() - 1.0).abs() < f64::EPSILON);
///
/// input.press(ControlAction::MoveRight);
/// assert!(input.yaw_axis().abs() < f64::EPSILON); // opposing keys cancel
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputState {
    pressed: [bool; 10],
}

impl InputState {
    /// Create a state with no actions pressed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed: [false; 10],
        }
    }

    /// Mark an action as pressed.
    pub fn press(&mut self, action: ControlAction) {
        self.pressed[action.index()] = true;
    }

    /// Mark an action as released.
    pub fn release(&mut self, action: ControlAction) {
        self.pressed[action.index()] = false;
    }

    /// Set an action's state directly.
    pub fn set(&mut self, action: ControlAction, pressed: bool) {
        self.pressed[action.index()] = pressed;
    }

    /// Whether an action is currently pressed.
    #[must_use]
    pub const fn is_pressed(&self, action: ControlAction) -> bool {
        self.pressed[action.index()]
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.pressed = [false; 10];
    }

    /// Signed axis value from a positive/negative action pair.
    fn axis(&self, positive: ControlAction, negative: ControlAction) -> f64 {
        f64::from(self.is_pressed(positive)) - f64::from(self.is_pressed(negative))
    }

    /// Yaw input in `{-1, 0, 1}`: left minus right.
    #[must_use]
    pub fn yaw_axis(&self) -> f64 {
        self.axis(ControlAction::MoveLeft, ControlAction::MoveRight)
    }

    /// Pitch input in `{-1, 0, 1}`: up minus down.
    #[must_use]
    pub fn pitch_axis(&self) -> f64 {
        self.axis(ControlAction::MoveUp, ControlAction::MoveDown)
    }

    /// Twist input in `{-1, 0, 1}`: left minus right.
    #[must_use]
    pub fn twist_axis(&self) -> f64 {
        self.axis(ControlAction::TwistLeft, ControlAction::TwistRight)
    }

    /// Tilt input in `{-1, 0, 1}`: forward minus backward.
    #[must_use]
    pub fn tilt_axis(&self) -> f64 {
        self.axis(ControlAction::TiltForward, ControlAction::TiltBackward)
    }
}
