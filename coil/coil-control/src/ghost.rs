//! The ghost-coordinate movement controller.

use std::f64::consts::FRAC_PI_6;

use nalgebra::{Point3, UnitQuaternion, Vector3};
use tracing::debug;

use scalp_plane::wrap_yaw;
use scalp_track::SurfaceTracker;
use scalp_types::Ray;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ControlConfig;
use crate::diagnostics::PlacementDiagnostics;
use crate::input::InputState;
use crate::orient::OrientationBuilder;
use crate::smooth::TransformSmoother;

/// Lower pitch clamp (radians). Keeps candidates above the dome rim margin.
pub const PITCH_MIN: f64 = 0.05;

/// Upper pitch clamp (radians). Keeps candidates off the pole singularity of
/// the inverse spherical mapping.
pub const PITCH_MAX: f64 = 1.45;

/// Symmetric tilt clamp (radians): +/- 30 degrees.
pub const TILT_LIMIT: f64 = FRAC_PI_6;

/// Authoritative placement intent in head-relative spherical coordinates.
///
/// Invariants (maintained by the controller): `yaw` in `[0, 2*pi)`, `pitch`
/// in `[PITCH_MIN, PITCH_MAX]`, `tilt` in `[-TILT_LIMIT, TILT_LIMIT]`,
/// `twist` in `[0, 2*pi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GhostState {
    /// Azimuth around the head, from the anterior axis.
    pub yaw: f64,
    /// Elevation from the reference plane toward the vertex.
    pub pitch: f64,
    /// Rotation about the surface normal.
    pub twist: f64,
    /// Forward/back lean.
    pub tilt: f64,
}

impl Default for GhostState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 1.0,
            twist: 0.0,
            tilt: 0.0,
        }
    }
}

/// The transform derived from the last *successful* ghost projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTransform {
    /// Surface contact point.
    pub position: Point3<f64>,
    /// Outward surface normal at the contact point.
    pub normal: Vector3<f64>,
    /// Full coil orientation (normal + twist + tilt).
    pub orientation: UnitQuaternion<f64>,
}

/// The rendered coil transform for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoilPose {
    /// Smoothed world position.
    pub position: Point3<f64>,
    /// Smoothed world orientation.
    pub orientation: UnitQuaternion<f64>,
}

/// A one-shot snap-to-target request.
///
/// Tokens increase monotonically at the call site; the controller consumes
/// each distinct token value at most once, so replaying a stale request is
/// harmless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRequest {
    /// Monotonically increasing request id.
    pub token: u64,
    /// World-space point to snap to.
    pub target: Point3<f64>,
}

/// Commit-on-hit movement controller.
///
/// Owns the ghost state, the target transform, and the render smoother. See
/// the crate docs for the movement model.
///
/// # Example
///
/// ```
/// use coil_control::{ControlAction, ControlConfig, GhostController, InputState,
///                    PlacementDiagnostics};
/// use scalp_plane::estimate_reference_plane;
/// use scalp_proxy::{build_proxy_surface, ProxyConfig};
/// use scalp_track::SurfaceTracker;
/// use scalp_types::SurfaceMesh;
///
/// let positions = [
///     1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
///     0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0,
/// ];
/// let indices = [
///     0, 2, 4, 2, 1, 4, 1, 3, 4, 3, 0, 4,
///     2, 0, 5, 1, 2, 5, 3, 1, 5, 0, 3, 5,
/// ];
/// let source = SurfaceMesh::from_raw(&positions, &indices);
/// let plane = estimate_reference_plane(None, &source);
/// let proxy = build_proxy_surface(&plane, &source, &ProxyConfig::preview()).unwrap();
/// let tracker = SurfaceTracker::new(proxy, plane);
///
/// let mut controller = GhostController::new(ControlConfig::default(), &tracker);
/// let mut diagnostics = PlacementDiagnostics::new();
/// let mut input = InputState::new();
/// input.press(ControlAction::MoveLeft);
///
/// let pose = controller.update(&input, 0.016, &tracker, &mut diagnostics);
/// assert!(pose.position.coords.norm() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct GhostController {
    config: ControlConfig,
    ghost: GhostState,
    target: TargetTransform,
    smoother: TransformSmoother,
    orientation_builder: OrientationBuilder,
    locked: bool,
    last_snap_token: Option<u64>,
}

impl GhostController {
    /// Create a controller seeded from the default ghost placement.
    ///
    /// If even the default placement fails to project (a degenerate proxy),
    /// the controller starts from a synthetic pose at the dome apex; the
    /// first successful query replaces it.
    #[must_use]
    pub fn new(config: ControlConfig, tracker: &SurfaceTracker) -> Self {
        let orientation_builder = OrientationBuilder::from_plane(tracker.plane());
        let ghost = GhostState::default();

        let target = tracker
            .project_spherical(ghost.yaw, ghost.pitch, None)
            .map_or_else(
                || {
                    let plane = tracker.plane();
                    let normal = plane.normal;
                    TargetTransform {
                        position: plane.origin + normal * plane.base_radius,
                        normal,
                        orientation: orientation_builder.orientation(&normal, 0.0, 0.0),
                    }
                },
                |hit| TargetTransform {
                    position: hit.point,
                    normal: hit.normal,
                    orientation: orientation_builder.orientation(&hit.normal, 0.0, 0.0),
                },
            );

        Self {
            config,
            ghost,
            target,
            smoother: TransformSmoother::new(target.position, target.orientation),
            orientation_builder,
            locked: false,
            last_snap_token: None,
        }
    }

    /// The authoritative ghost state.
    #[must_use]
    pub const fn ghost(&self) -> &GhostState {
        &self.ghost
    }

    /// The transform of the last successful projection.
    #[must_use]
    pub const fn target(&self) -> &TargetTransform {
        &self.target
    }

    /// The controller configuration.
    #[must_use]
    pub const fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Whether input is currently ignored.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock input processing. Smoothing continues while locked.
    pub fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            debug!(locked, "controller lock changed");
        }
        self.locked = locked;
    }

    /// The current rendered pose.
    #[must_use]
    pub fn pose(&self) -> CoilPose {
        CoilPose {
            position: self.smoother.position(),
            orientation: self.smoother.rotation(),
        }
    }

    /// Advance one tick: process input, project, commit on hit, smooth.
    ///
    /// A failed projection yields "no change this tick" for the ghost and
    /// target; the smoother keeps converging toward the unchanged target.
    pub fn update(
        &mut self,
        input: &InputState,
        dt: f64,
        tracker: &SurfaceTracker,
        diagnostics: &mut PlacementDiagnostics,
    ) -> CoilPose {
        let dt = clamp_tick_delta(dt, self.config.max_tick_delta);

        if dt > 0.0 && !self.locked {
            self.apply_movement(input, dt, tracker, diagnostics);
            self.apply_orientation_input(input, dt);
        }

        self.target.orientation = self.orientation_builder.orientation(
            &self.target.normal,
            self.ghost.twist,
            self.ghost.tilt,
        );
        self.smoother.advance(
            &self.target.position,
            &self.target.orientation,
            dt,
            self.config.position_smoothing,
            self.config.rotation_smoothing,
        );
        self.pose()
    }

    /// Place the coil by pointer drag.
    ///
    /// The drag ray is resolved against the proxy with the current target as
    /// continuity reference, converted to spherical coordinates, clamped,
    /// and committed through the same on-hit rule as key movement. Unlike a
    /// snap, drags stay damped.
    ///
    /// Returns whether the placement was committed.
    pub fn drag(
        &mut self,
        ray: &Ray,
        tracker: &SurfaceTracker,
        diagnostics: &mut PlacementDiagnostics,
    ) -> bool {
        if self.locked {
            return false;
        }
        let Some(pointer_hit) = tracker.raycast(ray, Some(&self.target.position)) else {
            return false;
        };

        let (yaw, raw_pitch) = tracker.spherical_coordinates(&pointer_hit.point);
        let pitch = raw_pitch.clamp(PITCH_MIN, PITCH_MAX);

        diagnostics.projection_attempts += 1;
        match tracker.project_spherical(yaw, pitch, Some(&pointer_hit.point)) {
            Some(hit) => {
                self.commit(yaw, pitch, &hit.point, &hit.normal);
                diagnostics.committed_moves += 1;
                true
            }
            None => {
                diagnostics.rejected_commits += 1;
                false
            }
        }
    }

    /// Apply a snap request, consuming its token.
    ///
    /// Stale or repeated tokens are ignored. On a successful projection the
    /// ghost adopts the snapped coordinates and the smoother jumps straight
    /// to the target - snaps are instantaneous by design.
    ///
    /// Returns whether the snap was applied.
    pub fn snap(
        &mut self,
        request: &SnapRequest,
        tracker: &SurfaceTracker,
        diagnostics: &mut PlacementDiagnostics,
    ) -> bool {
        if self.last_snap_token.is_some_and(|t| request.token <= t) {
            return false;
        }
        self.last_snap_token = Some(request.token);

        let (yaw, raw_pitch) = tracker.spherical_coordinates(&request.target);
        let pitch = raw_pitch.clamp(PITCH_MIN, PITCH_MAX);

        diagnostics.projection_attempts += 1;
        let Some(hit) = tracker.project_spherical(yaw, pitch, Some(&request.target)) else {
            diagnostics.snaps_rejected += 1;
            return false;
        };

        self.commit(yaw, pitch, &hit.point, &hit.normal);
        self.smoother
            .snap_to(&self.target.position, &self.target.orientation);
        diagnostics.snaps_applied += 1;
        debug!(token = request.token, "snap applied");
        true
    }

    /// Key-driven movement with the commit-on-hit rule.
    fn apply_movement(
        &mut self,
        input: &InputState,
        dt: f64,
        tracker: &SurfaceTracker,
        diagnostics: &mut PlacementDiagnostics,
    ) {
        let yaw_axis = input.yaw_axis();
        let pitch_axis = input.pitch_axis();
        if yaw_axis == 0.0 && pitch_axis == 0.0 {
            return;
        }

        let scale = self.modifier_scale(input);
        let candidate_yaw = wrap_yaw(self.ghost.yaw + yaw_axis * self.config.yaw_rate * scale * dt);
        let candidate_pitch = (self.ghost.pitch
            + pitch_axis * self.config.pitch_rate * scale * dt)
            .clamp(PITCH_MIN, PITCH_MAX);

        diagnostics.projection_attempts += 1;
        match tracker.project_spherical(candidate_yaw, candidate_pitch, Some(&self.target.position))
        {
            Some(hit) => {
                self.commit(candidate_yaw, candidate_pitch, &hit.point, &hit.normal);
                diagnostics.committed_moves += 1;
            }
            None => diagnostics.rejected_commits += 1,
        }
    }

    /// Twist/tilt accumulation. Independent of projection outcome.
    fn apply_orientation_input(&mut self, input: &InputState, dt: f64) {
        let scale = self.modifier_scale(input);
        self.ghost.twist = wrap_yaw(
            self.ghost.twist + input.twist_axis() * self.config.twist_rate * scale * dt,
        );
        self.ghost.tilt = (self.ghost.tilt
            + input.tilt_axis() * self.config.tilt_rate * scale * dt)
            .clamp(-TILT_LIMIT, TILT_LIMIT);
    }

    /// Adopt a successfully projected placement.
    fn commit(&mut self, yaw: f64, pitch: f64, position: &Point3<f64>, normal: &Vector3<f64>) {
        self.ghost.yaw = yaw;
        self.ghost.pitch = pitch;
        self.target.position = *position;
        self.target.normal = *normal;
        self.target.orientation = self.orientation_builder.orientation(
            normal,
            self.ghost.twist,
            self.ghost.tilt,
        );
    }

    fn modifier_scale(&self, input: &InputState) -> f64 {
        let mut scale = 1.0;
        if input.is_pressed(crate::input::ControlAction::Precision) {
            scale *= self.config.precision_scale;
        }
        if input.is_pressed(crate::input::ControlAction::Boost) {
            scale *= self.config.boost_scale;
        }
        scale
    }
}

/// Clamp a tick delta into `[0, max]`, treating non-finite input as zero.
fn clamp_tick_delta(dt: f64, max: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, max)
    } else {
        0.0
    }
}
